//! Page/size pagination used by the style listing.

use serde::Serialize;

use crate::error::CoreError;

/// A validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Resolve optional `page`/`size` query values against the configured
    /// defaults. Out-of-range values are rejected rather than clamped.
    pub fn resolve(
        page: Option<i64>,
        size: Option<i64>,
        default_size: i64,
        max_size: i64,
    ) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        let size = size.unwrap_or(default_size);

        if page < 1 {
            return Err(CoreError::BadRequest(format!(
                "page must be >= 1, got {page}"
            )));
        }
        if !(1..=max_size).contains(&size) {
            return Err(CoreError::BadRequest(format!(
                "size must be between 1 and {max_size}, got {size}"
            )));
        }

        Ok(Self { page, size })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Number of pages needed for `total` rows at `size` rows per page.
pub fn page_count(total: i64, size: i64) -> i64 {
    if total <= 0 || size <= 0 {
        return 0;
    }
    (total + size - 1) / size
}

/// A page of results with its position in the full result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
    pub items: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(request: PageRequest, total: i64, items: Vec<T>) -> Self {
        Self {
            total,
            page: request.page,
            size: request.size,
            pages: page_count(total, request.size),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_apply() {
        let req = PageRequest::resolve(None, None, 20, 100).unwrap();
        assert_eq!(req, PageRequest { page: 1, size: 20 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn offset_advances_by_size() {
        let req = PageRequest::resolve(Some(3), Some(20), 20, 100).unwrap();
        assert_eq!(req.offset(), 40);
        assert_eq!(req.limit(), 20);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_matches!(
            PageRequest::resolve(Some(0), None, 20, 100),
            Err(CoreError::BadRequest(_))
        );
        assert_matches!(
            PageRequest::resolve(None, Some(101), 20, 100),
            Err(CoreError::BadRequest(_))
        );
        assert_matches!(
            PageRequest::resolve(None, Some(0), 20, 100),
            Err(CoreError::BadRequest(_))
        );
    }

    #[test]
    fn forty_five_rows_make_three_pages() {
        assert_eq!(page_count(45, 20), 3);
        assert_eq!(page_count(40, 20), 2);
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
    }
}
