//! Product discovery pipeline: filter, then sort, then paginate.

use crate::filter::{FilterCriteria, filter};
use crate::paginate::{Page, PageRequest, paginate};
use crate::product::ProductRecord;
use crate::sort::{SortKey, sort};

/// Run the three stages in their fixed order over an unfiltered catalog list.
///
/// Filtering always happens before pagination so page counts reflect matches,
/// not the raw catalog.
pub fn discover(
    records: &[ProductRecord],
    criteria: &FilterCriteria,
    key: SortKey,
    page: &PageRequest,
) -> Page<ProductRecord> {
    let matched = filter(records, criteria);
    let ordered = sort(&matched, key);
    paginate(&ordered, page)
}
