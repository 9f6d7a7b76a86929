//! Offset/limit pagination for report queries.
//!
//! The statistics reports page with plain offset/limit windows. Limits are
//! defaulted and clamped here so every query sees a sane range; offsets past
//! the end of the result set simply yield an empty page.

/// A validated offset/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: i64,
    limit: i64,
}

/// Default page size when the caller does not specify one.
const DEFAULT_LIMIT: i64 = 25;

/// Upper bound on a single page.
const MAX_LIMIT: i64 = 100;

impl Page {
    /// Build a page from raw caller input, applying defaults and bounds.
    ///
    /// Negative offsets are treated as 0; limits are clamped to 1..=100 and
    /// default to 25 when absent.
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Page {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn test_clamps_limit() {
        assert_eq!(Page::new(None, Some(1000)).limit(), 100);
        assert_eq!(Page::new(None, Some(0)).limit(), 1);
        assert_eq!(Page::new(None, Some(-3)).limit(), 1);
    }

    #[test]
    fn test_negative_offset_is_zeroed() {
        assert_eq!(Page::new(Some(-10), None).offset(), 0);
    }

    #[test]
    fn test_passthrough_in_range() {
        let page = Page::new(Some(50), Some(10));
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 10);
    }
}
