use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination parameters for listing properties.
/// Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    page: u64,
    /// Page size. Not capped.
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Zero page or limit falls back to the default
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Build from raw query values. Missing, non-numeric and zero values
    /// fall back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_or_zero(page), parse_or_zero(limit))
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// ceil(total / limit)
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

// zero means "use the default"
fn parse_or_zero(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Paginated envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
    }

    #[test]
    fn defaults_when_non_numeric_or_zero() {
        let req = PageRequest::from_query(Some("abc"), Some("0"));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);

        let req = PageRequest::from_query(Some("-3"), Some("2.5"));
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn parses_positive_values() {
        let req = PageRequest::from_query(Some("3"), Some(" 25 "));
        assert_eq!(req.page(), 3);
        assert_eq!(req.limit(), 25);
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn large_limits_are_not_capped() {
        let req = PageRequest::from_query(Some("1"), Some("100000"));
        assert_eq!(req.limit(), 100_000);
    }

    #[test]
    fn zero_page_or_limit_uses_defaults() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.offset(), 0);
        assert_eq!(req.total_pages(25), 3);

        let req = PageRequest::new(4, 0);
        assert_eq!(req.page(), 4);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(1, 10);
        assert_eq!(req.total_pages(0), 0);
        assert_eq!(req.total_pages(1), 1);
        assert_eq!(req.total_pages(10), 1);
        assert_eq!(req.total_pages(25), 3);
    }

    #[test]
    fn envelope_uses_camel_case() {
        let page: Page<u8> = Page {
            items: vec![1, 2],
            current_page: 1,
            total_pages: 1,
            total_count: 2,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["totalCount"], 2);
        assert_eq!(value["items"], serde_json::json!([1, 2]));
    }
}
