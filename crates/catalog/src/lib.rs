//! Catalog domain module.
//!
//! Product records plus the pure discovery stages the storefront runs over a
//! fetched product list (no IO, no HTTP, no storage).

pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod product;
pub mod sort;

#[cfg(test)]
pub(crate) mod test_support;

pub use filter::{FilterCriteria, PriceRange, filter};
pub use paginate::{DEFAULT_PAGE_SIZE, Page, PageRequest, page_count, paginate};
pub use pipeline::discover;
pub use product::{Category, MAX_RATING, NewProduct, ProductRecord};
pub use sort::{SortKey, sort};
