//! Relevance merging and match highlighting.
//!
//! - [`merge`]: combines record pools under a filter and query into a [`RankedList`]
//! - [`highlight`]: computes highlight spans over `source/name`

pub mod highlight;
pub mod merge;

pub use highlight::highlight_spans;
pub use merge::{merge, merge_installed, RankedEntry, RankedList};
