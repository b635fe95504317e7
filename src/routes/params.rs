use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number, default 1.
    pub page: Option<i64>,
    /// Items per page, default 20, max 100.
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_out_of_range_values() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
        assert_eq!(Pagination::new(0, 500).normalize(), (1, 100, 0));
        assert_eq!(Pagination::new(3, 10).normalize(), (3, 10, 20));
    }

    #[test]
    fn normalize_saturates_huge_pages() {
        let (page, per_page, offset) = Pagination::new(i64::MAX, 100).normalize();
        assert_eq!(page, i64::MAX);
        assert_eq!(per_page, 100);
        assert_eq!(offset, i64::MAX);
    }
}
