//! Row processing: search, filter, sort, deletion and pagination.
//!
//! Each stage is a pure function of its inputs. [`process`] composes them and
//! is called again whenever any input changes.

pub mod deletion;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod sort;

pub use deletion::DeletedIds;
pub use filter::{FilterSet, MatchMode, unique_values};
pub use pagination::Pagination;
pub use sort::{Direction, SortSpec};

use crate::product::Product;

/// Everything the displayed rows depend on.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub query: String,
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub deleted: DeletedIds,
    pub pagination: Pagination,
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct Processed<'a> {
    /// Searched, filtered, sorted rows without the deleted ones.
    pub rows: Vec<&'a Product>,
    pub page_count: usize,
}

impl<'a> Processed<'a> {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn page(&self, pagination: &Pagination) -> &[&'a Product] {
        pagination.slice(&self.rows)
    }
}

pub fn process<'a>(rows: &'a [Product], input: &PipelineInput) -> Processed<'a> {
    let rows = search::search(rows.iter().collect(), &input.query);
    let rows = input.filters.apply(rows);
    let rows = input.sort.apply(rows);
    let rows = input.deleted.retain(rows);
    let page_count = input.pagination.page_count(rows.len());
    Processed { rows, page_count }
}
