use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalized pagination parameters. Construct through [`PageParams::clamped`]
/// so repositories can assume positive, capped values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub page_size: i64,
}

impl PageParams {
    /// page < 1 becomes 1; pageSize < 1 becomes the default (10); pageSize
    /// above the hard cap (100) is clamped down.
    pub fn clamped(page: i64, page_size: i64) -> Self {
        let page = if page < 1 { 1 } else { page };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else if page_size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            page_size
        };
        Self { page, page_size }
    }

    /// Rows to skip before this page. Saturates so absurd page numbers
    /// produce an empty page instead of an overflow or a negative OFFSET.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the metadata the UI needs to build a pager.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, params: PageParams, total_count: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + params.page_size - 1) / params.page_size
        };

        Self {
            items,
            page: params.page,
            page_size: params.page_size,
            total_count,
            total_pages,
            has_previous_page: params.page > 1,
            has_next_page: params.page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_parameters() {
        assert_eq!(PageParams::clamped(0, 10), PageParams { page: 1, page_size: 10 });
        assert_eq!(PageParams::clamped(-3, 10), PageParams { page: 1, page_size: 10 });
        assert_eq!(PageParams::clamped(1, 0), PageParams { page: 1, page_size: 10 });
        assert_eq!(PageParams::clamped(1, -1), PageParams { page: 1, page_size: 10 });
        assert_eq!(PageParams::clamped(1, 150), PageParams { page: 1, page_size: 100 });
        assert_eq!(PageParams::clamped(2, 25), PageParams { page: 2, page_size: 25 });
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageParams::clamped(1, 10).offset(), 0);
        assert_eq!(PageParams::clamped(3, 10).offset(), 20);
        assert_eq!(PageParams::clamped(5, 7).offset(), 28);
    }

    #[test]
    fn offset_saturates_at_extreme_page_numbers() {
        let params = PageParams::clamped(i64::MAX, 100);
        assert_eq!(params.offset(), i64::MAX);

        let params = PageParams::clamped(i64::MAX, 1);
        assert_eq!(params.offset(), i64::MAX - 1);
    }

    #[test]
    fn derives_navigation_metadata() {
        let result = PagedResult::new(vec![1, 2, 3], PageParams::clamped(2, 10), 25);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_previous_page);
        assert!(result.has_next_page);

        let last = PagedResult::new(vec![1], PageParams::clamped(3, 10), 25);
        assert_eq!(last.total_pages, 3);
        assert!(last.has_previous_page);
        assert!(!last.has_next_page);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let result: PagedResult<i32> = PagedResult::new(vec![], PageParams::clamped(1, 10), 0);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_previous_page);
        assert!(!result.has_next_page);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let result: PagedResult<i32> = PagedResult::new(vec![], PageParams::clamped(1, 10), 30);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = PagedResult::new(vec!["a"], PageParams::clamped(1, 10), 1);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["hasNextPage"], false);
    }
}
