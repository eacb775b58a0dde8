use schemars::JsonSchema;
use serde::Serialize;

const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}
pub(crate) fn default_per_page() -> u32 {
    20
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn response<T>(&self, data: Vec<T>, total: usize) -> PaginatedResponse<T> {
        let per_page = self.per_page as usize;

        PaginatedResponse {
            data,
            page: self.page as usize,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

#[derive(Serialize, JsonSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_pages() {
        let pagination = Pagination::new(3, 10);
        assert_eq!(pagination.offset(), 20);

        let response = pagination.response(vec![1, 2], 22);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.page, 3);
    }

    #[test]
    fn test_clamps_values() {
        let pagination = Pagination::new(0, 1000);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 100);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_huge_page_offset() {
        let pagination = Pagination::new(50_000_000, 100);
        assert_eq!(pagination.offset(), 4_999_999_900);

        let pagination = Pagination::new(u32::MAX, u32::MAX);
        assert_eq!(pagination.offset(), u64::from(u32::MAX - 1) * 100);
    }
}
