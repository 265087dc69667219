//! Field-level command validation, run before any store access. Failures
//! surface as 400 responses with a per-field error map.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ApiError;

pub const NAME_MAX_LEN: usize = 200;
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 500;
pub const PRODUCT_DESCRIPTION_MAX_LEN: usize = 1000;

pub fn validate_category(name: &str, description: Option<&str>) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    check_name(&mut field_errors, name, "category");
    check_description(&mut field_errors, description, CATEGORY_DESCRIPTION_MAX_LEN);
    finish(field_errors)
}

pub fn validate_product(
    name: &str,
    description: Option<&str>,
    price: Decimal,
    stock: i32,
    category_id: Uuid,
) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    check_name(&mut field_errors, name, "product");
    check_description(&mut field_errors, description, PRODUCT_DESCRIPTION_MAX_LEN);

    if price < Decimal::ZERO {
        field_errors.insert("price".to_string(), "Price cannot be negative".to_string());
    }
    if stock < 0 {
        field_errors.insert("stock".to_string(), "Stock cannot be negative".to_string());
    }
    if category_id.is_nil() {
        field_errors.insert("categoryId".to_string(), "Category id is required".to_string());
    }

    finish(field_errors)
}

/// Trim the name for storage; validation has already run against the raw
/// input.
pub fn clean_name(name: &str) -> String {
    name.trim().to_string()
}

/// Blank descriptions are stored as NULL, everything else trimmed.
pub fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
}

fn check_name(field_errors: &mut HashMap<String, String>, name: &str, kind: &str) {
    if name.trim().is_empty() {
        field_errors.insert("name".to_string(), format!("The {} name is required", kind));
    } else if name.trim().chars().count() > NAME_MAX_LEN {
        field_errors.insert(
            "name".to_string(),
            format!("The {} name must not exceed {} characters", kind, NAME_MAX_LEN),
        );
    }
}

fn check_description(
    field_errors: &mut HashMap<String, String>,
    description: Option<&str>,
    max_len: usize,
) {
    if let Some(d) = description {
        if d.trim().chars().count() > max_len {
            field_errors.insert(
                "description".to_string(),
                format!("The description must not exceed {} characters", max_len),
            );
        }
    }
}

fn finish(field_errors: HashMap<String, String>) -> Result<(), ApiError> {
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid input", Some(field_errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let err = validate_category("   ", None).unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["name"], "The category name is required");
    }

    #[test]
    fn name_boundary_is_200_chars() {
        let exactly = "x".repeat(200);
        assert!(validate_category(&exactly, None).is_ok());

        let over = "x".repeat(201);
        assert!(validate_category(&over, None).is_err());
    }

    #[test]
    fn category_description_caps_at_500() {
        let exactly = "d".repeat(500);
        assert!(validate_category("Ropa", Some(&exactly)).is_ok());
        assert!(validate_category("Ropa", Some(&"d".repeat(501))).is_err());
    }

    #[test]
    fn product_description_caps_at_1000() {
        let name = "Laptop";
        let id = Uuid::new_v4();
        assert!(validate_product(name, Some(&"d".repeat(1000)), Decimal::ONE, 1, id).is_ok());
        assert!(validate_product(name, Some(&"d".repeat(1001)), Decimal::ONE, 1, id).is_err());
    }

    #[test]
    fn negative_price_and_stock_are_rejected_together() {
        let err = validate_product("Laptop", None, Decimal::NEGATIVE_ONE, -1, Uuid::new_v4())
            .unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"]["price"].is_string());
        assert!(body["field_errors"]["stock"].is_string());
    }

    #[test]
    fn nil_category_id_is_rejected() {
        let err = validate_product("Laptop", None, Decimal::ONE, 1, Uuid::nil()).unwrap_err();
        assert!(err.to_json()["field_errors"]["categoryId"].is_string());
    }

    #[test]
    fn cleaning_trims_and_nulls_blank_descriptions() {
        assert_eq!(clean_name("  Ropa  "), "Ropa");
        assert_eq!(clean_description(Some("  detail  ")), Some("detail".to_string()));
        assert_eq!(clean_description(Some("   ")), None);
        assert_eq!(clean_description(None), None);
    }
}
