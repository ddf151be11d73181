//! Paginate stage: fixed-size, 1-based pages with count metadata.

use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, ValueObject};

/// Page size used by the storefront listing pages.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Wire shape of a [`PageRequest`], checked by [`PageRequest::new`] on the way in.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    page_size: u32,
    page_number: u32,
}

impl TryFrom<PageParams> for PageRequest {
    type Error = DomainError;

    fn try_from(params: PageParams) -> DomainResult<Self> {
        Self::new(params.page_size, params.page_number)
    }
}

/// Which page to show and how large pages are. Both values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageParams")]
pub struct PageRequest {
    page_size: u32,
    page_number: u32,
}

impl PageRequest {
    pub fn new(page_size: u32, page_number: u32) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::validation("page_size must be positive"));
        }
        if page_number == 0 {
            return Err(DomainError::validation("page_number is 1-based"));
        }
        Ok(Self {
            page_size,
            page_number,
        })
    }

    /// First page for a given size.
    pub fn first(page_size: u32) -> DomainResult<Self> {
        Self::new(page_size, 1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Same size, different page. `0` is treated as page 1.
    pub fn with_page(self, page_number: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self
        }
    }

    fn offset(&self) -> usize {
        (self.page_number as usize)
            .saturating_sub(1)
            .saturating_mul(self.page_size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
        }
    }
}

impl ValueObject for PageRequest {}

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}

/// `max(1, ceil(total / page_size))`; an empty list still has one (empty) page.
pub fn page_count(total: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `records` into the requested page.
///
/// A page number past the end yields an empty page rather than an error.
pub fn paginate<T: Clone>(records: &[T], request: &PageRequest) -> Page<T> {
    let total = records.len();
    let start = request.offset().min(total);
    let end = start.saturating_add(request.page_size as usize).min(total);

    Page {
        items: records[start..end].to_vec(),
        page_number: request.page_number,
        page_size: request.page_size,
        page_count: page_count(total, request.page_size),
        total_count: total,
    }
}
