// Diacritic-insensitive search and pagination, shared by categories and
// products.
//
// The store cannot match accent-insensitively on its own, so the filtered
// path loads the candidate set and matches in process (see
// `filter_sort_page`). Acceptable at catalog-sized data volumes; revisit with
// a normalized column if tables grow.

pub mod normalize;
pub mod page;

pub use normalize::normalize_for_search;
pub use page::{PagedResult, PageParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use uuid::Uuid;

/// Typed identity for rows that participate in generic search/pagination.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// A row that can be matched against a normalized search term and sorted by
/// its display name.
pub trait Searchable: Identifiable {
    /// Name used for ordering results.
    fn sort_name(&self) -> &str;

    /// True when any searchable field contains `normalized_term`.
    /// `normalized_term` is already the output of [`normalize_for_search`].
    fn matches(&self, normalized_term: &str) -> bool;
}

/// In-process filter + sort + slice over a full candidate set.
///
/// Returns one page of rows and the total count of rows passing the filter.
/// Callers pass already-clamped page parameters; clamping lives one layer up
/// in the query handlers. Ordering is case-folded name with the row id as a
/// deterministic tie-break so repeated calls paginate identically.
pub fn filter_sort_page<T: Searchable>(
    rows: Vec<T>,
    normalized_term: &str,
    params: PageParams,
) -> (Vec<T>, i64) {
    let mut filtered: Vec<T> = rows
        .into_iter()
        .filter(|row| row.matches(normalized_term))
        .collect();

    let total_count = filtered.len() as i64;

    filtered.sort_by(|a, b| {
        a.sort_name()
            .to_lowercase()
            .cmp(&b.sort_name().to_lowercase())
            .then_with(|| a.id().cmp(&b.id()))
    });

    let items = filtered
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.page_size as usize)
        .collect();

    (items, total_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Uuid,
        name: String,
    }

    impl Row {
        fn new(name: &str) -> Self {
            Self {
                id: Uuid::new_v4(),
                name: name.to_string(),
            }
        }
    }

    impl Identifiable for Row {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    impl Searchable for Row {
        fn sort_name(&self) -> &str {
            &self.name
        }

        fn matches(&self, normalized_term: &str) -> bool {
            normalized_term.is_empty()
                || normalize_for_search(&self.name).contains(normalized_term)
        }
    }

    fn dataset() -> Vec<Row> {
        vec![Row::new("Electrónica"), Row::new("Ropa"), Row::new("Hogar")]
    }

    #[test]
    fn accent_insensitive_match() {
        let (items, total) = filter_sort_page(
            dataset(),
            &normalize_for_search("electronica"),
            PageParams::clamped(1, 10),
        );
        assert_eq!(total, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Electrónica");
    }

    #[test]
    fn empty_term_passes_everything_sorted() {
        let (items, total) = filter_sort_page(dataset(), "", PageParams::clamped(1, 10));
        assert_eq!(total, 3);
        let names: Vec<&str> = items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Electrónica", "Hogar", "Ropa"]);
    }

    #[test]
    fn pages_concatenate_to_full_set_without_duplicates() {
        let rows: Vec<Row> = (0..25).map(|i| Row::new(&format!("item {:02}", i))).collect();
        let mut seen = Vec::new();

        for page in 1..=3 {
            let (items, total) = filter_sort_page(rows.clone(), "", PageParams::clamped(page, 10));
            assert_eq!(total, 25);
            seen.extend(items.into_iter().map(|r| r.id));
        }

        assert_eq!(seen.len(), 25);
        let mut deduped = seen.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 25, "pagination produced duplicate rows");
    }

    #[test]
    fn pagination_is_deterministic_across_calls() {
        // Equal names force the id tie-break to decide ordering
        let rows: Vec<Row> = (0..20).map(|_| Row::new("same")).collect();

        let (first, _) = filter_sort_page(rows.clone(), "", PageParams::clamped(2, 5));
        let (second, _) = filter_sort_page(rows, "", PageParams::clamped(2, 5));
        assert_eq!(first, second);
    }

    #[test]
    fn last_page_is_short() {
        let rows: Vec<Row> = (0..25).map(|i| Row::new(&format!("item {:02}", i))).collect();
        let (items, total) = filter_sort_page(rows, "", PageParams::clamped(3, 10));
        assert_eq!(total, 25);
        assert_eq!(items.len(), 5);
    }
}
