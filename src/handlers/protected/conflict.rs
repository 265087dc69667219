//! Conflict gates run after the store lookups: duplicate names and
//! restrict-delete. The decisions are pure over the looked-up state so the
//! handlers stay thin and the rules stay testable without a database.

use uuid::Uuid;

use crate::error::ApiError;
use crate::search::Identifiable;

/// Reject a name already taken by another record. On update, a match on the
/// record being written is not a conflict.
pub fn check_unique_name<T: Identifiable>(
    existing: Option<&T>,
    updating: Option<Uuid>,
    kind: &str,
    name: &str,
) -> Result<(), ApiError> {
    match existing {
        Some(found) if updating != Some(found.id()) => Err(ApiError::conflict(format!(
            "A {} named '{}' already exists",
            kind, name
        ))),
        _ => Ok(()),
    }
}

/// Restrict-delete: a category with products referencing it cannot go.
pub fn check_no_referencing_products(reference_count: i64) -> Result<(), ApiError> {
    if reference_count > 0 {
        return Err(ApiError::conflict(format!(
            "The category is referenced by {} product(s) and cannot be deleted",
            reference_count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::database::models::Category;

    fn category(name: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn create_with_taken_name_conflicts() {
        let existing = category("Ropa");
        let err = check_unique_name(Some(&existing), None, "category", "Ropa").unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(
            err.to_json()["message"],
            "A category named 'Ropa' already exists"
        );
    }

    #[test]
    fn create_with_free_name_passes() {
        assert!(check_unique_name::<Category>(None, None, "category", "Ropa").is_ok());
    }

    #[test]
    fn update_keeping_own_name_is_not_a_conflict() {
        let existing = category("Ropa");
        assert!(check_unique_name(Some(&existing), Some(existing.id), "category", "Ropa").is_ok());
    }

    #[test]
    fn update_stealing_another_records_name_conflicts() {
        let existing = category("Ropa");
        let err = check_unique_name(Some(&existing), Some(Uuid::new_v4()), "category", "Ropa")
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn referenced_category_cannot_be_deleted() {
        let err = check_no_referencing_products(3).unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(
            err.to_json()["message"],
            "The category is referenced by 3 product(s) and cannot be deleted"
        );
    }

    #[test]
    fn unreferenced_category_can_be_deleted() {
        assert!(check_no_referencing_products(0).is_ok());
    }
}
