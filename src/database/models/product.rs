use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::search::{normalize_for_search, Identifiable, Searchable};

/// A catalog product. `category_name` is joined from the owning category at
/// query time and never stored on the products table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub category_name: String,
    pub created_date: DateTime<Utc>,
}

impl Identifiable for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Product {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn matches(&self, normalized_term: &str) -> bool {
        if normalized_term.is_empty() {
            return true;
        }
        normalize_for_search(&self.name).contains(normalized_term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| normalize_for_search(d).contains(normalized_term))
            || normalize_for_search(&self.category_name).contains(normalized_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: Option<&str>, category_name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(String::from),
            price: Decimal::new(1999, 2),
            stock: 5,
            category_id: Uuid::new_v4(),
            category_name: category_name.to_string(),
            created_date: Utc::now(),
        }
    }

    #[test]
    fn matches_joined_category_name() {
        let p = product("Balón de Fútbol", None, "Deportes y Fitness");
        assert!(p.matches("deportes"));
        assert!(p.matches("balon"));
        assert!(p.matches("futbol"));
        assert!(!p.matches("ropa"));
    }

    #[test]
    fn matches_description_when_present() {
        let p = product("Laptop HP", Some("Intel Core i7, 16GB RAM"), "Computadoras");
        assert!(p.matches("intel"));
        assert!(!p.matches("amd"));
    }
}
