/// Domain records as stored by the repositories
pub mod cart;
pub mod newsletter;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use newsletter::Newsletter;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use user::User;

/// Default page size when a client sends none
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// One-based page request, already clamped to sane bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Build from raw client values; non-positive values fall back to defaults
    pub fn new(page: i64, per_page: i64) -> Self {
        let page = if page < 1 { 1 } else { page.min(u32::MAX as i64) as u32 };
        let per_page = if per_page < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            per_page.min(MAX_PAGE_SIZE as i64) as u32
        };
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Number of pages needed for `total_items`
    pub fn page_count(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.limit())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// A page of records plus the size of the whole result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
}
