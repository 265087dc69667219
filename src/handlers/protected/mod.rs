pub mod categories;
pub mod conflict;
pub mod logs;
pub mod products;
pub mod validation;

use serde::Deserialize;

/// Query parameters shared by both paged list endpoints. Defaults mirror the
/// clamping rules: page 1, ten rows.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub search_term: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    crate::search::DEFAULT_PAGE_SIZE
}
