//! Page number / page size normalization for list queries.

/// Largest page a client can request.
pub const MAX_PAGE_SIZE: u64 = 50;

/// Page size used when the requested size is missing or below 1.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest row offset a store is asked to skip. PostgreSQL binds `OFFSET`
/// as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Rows to skip before the first item of page `page_number`, capped at
/// [`MAX_OFFSET`].
pub fn page_offset(page_number: u64, page_size: u64) -> u64 {
    page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(MAX_OFFSET)
}

/// A normalized `(page_number, page_size)` pair.
///
/// Construction never fails: out-of-range input is clamped silently.
///
/// | requested            | result                 |
/// |----------------------|------------------------|
/// | `page_number < 1`    | 1                      |
/// | `page_size > 50`     | 50                     |
/// | `page_size < 1`      | 10                     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParameters {
    page_number: u64,
    page_size: u64,
}

impl PaginationParameters {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        let page_number = if page_number < 1 { 1 } else { page_number as u64 };

        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            (page_size as u64).min(MAX_PAGE_SIZE)
        };

        Self {
            page_number,
            page_size,
        }
    }

    /// Normalizes optional query values, treating a missing value as the default.
    pub fn from_query(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        Self::new(
            page_number.unwrap_or(1),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        )
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip before the first item of this page.
    pub fn offset(&self) -> u64 {
        page_offset(self.page_number, self.page_size)
    }
}

impl Default for PaginationParameters {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}
