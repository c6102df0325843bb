//! HTTP handlers for club-service.

pub mod clients;
pub mod documents;
pub mod events;
pub mod expenses;
pub mod export;
pub mod health;
pub mod plannings;
pub mod profile;

/// Highest page number a list endpoint will serve. Bounds the offset so the
/// multiplication below cannot overflow on a hostile query string.
const MAX_PAGE: i64 = 1_000_000;

/// Translate page/page_size query params into limit/offset, clamping both to
/// a sane window.
pub(crate) fn page_window(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
    let page_size = page_size.unwrap_or(20).clamp(1, 100);
    (page_size, (page - 1) * page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_twenty() {
        assert_eq!(page_window(None, None), (20, 0));
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(page_window(Some(3), Some(50)), (50, 100));
    }

    #[test]
    fn clamps_out_of_range_params() {
        assert_eq!(page_window(Some(0), Some(0)), (1, 0));
        assert_eq!(page_window(Some(-5), Some(500)), (100, 0));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let (limit, offset) = page_window(Some(i64::MAX), Some(100));
        assert_eq!(limit, 100);
        assert_eq!(offset, (MAX_PAGE - 1) * 100);
    }
}
