//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Query parameters for paginated listings
///
/// The page size is fixed by the service configuration; clients only
/// choose the page.
///
/// # Example
/// ```rust,ignore
/// pub async fn list_items(
///     Query(params): Query<QueryParams>,
/// ) -> Json<PaginatedResponse<Item>> {
///     // params.page() defaults to 1
/// }
///
/// // Usage:
/// GET /items?page=2
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }
}

/// One page of records as returned by a repository
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Wrap the page into the response envelope
    pub fn into_response(self) -> PaginatedResponse<T> {
        PaginatedResponse {
            pagination: PaginationMeta::new(self.page, self.per_page, self.total),
            data: self.items,
        }
    }
}

/// Single-entity response envelope: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, PartialEq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::default();
        assert_eq!(params.page(), 1);

        let params = QueryParams { page: 0 };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_meta_last_page() {
        let meta = PaginationMeta::new(3, 20, 45);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_pagination_meta_huge_page() {
        let meta = PaginationMeta::new(usize::MAX, 20, 3);
        assert_eq!(meta.page, usize::MAX);
        assert!(meta.has_prev);
        assert!(!meta.has_next);

        let meta = PaginationMeta::new(2, usize::MAX, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_empty_page_envelope() {
        let page: Page<u32> = Page {
            items: vec![],
            page: 1,
            per_page: 20,
            total: 0,
        };
        let response = page.into_response();
        assert!(response.data.is_empty());
        assert_eq!(response.pagination.total_pages, 0);
        assert!(!response.pagination.has_next);
    }
}
