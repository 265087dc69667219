use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::search::{normalize_for_search, Identifiable, Searchable};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Minimal projection for type-ahead widgets: id and name only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLookup {
    pub id: Uuid,
    pub name: String,
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Category {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, description: Option<&str>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(String::from),
            created_date: Utc::now(),
        }
    }

    #[test]
    fn matches_on_name_ignoring_accents() {
        let c = category("Electrónica", None);
        assert!(c.matches("electronica"));
        assert!(c.matches("tron"));
        assert!(!c.matches("ropa"));
    }

    #[test]
    fn matches_on_description() {
        let c = category("Hogar", Some("Artículos para el hogar"));
        assert!(c.matches("articulos"));
        assert!(!c.matches("deportes"));
    }

    #[test]
    fn missing_description_is_not_an_error() {
        let c = category("Ropa", None);
        assert!(!c.matches("algodon"));
    }
}
