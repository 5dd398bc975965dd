//! Core domain types.
//!
//! - [`package`]: package records and repository tags
//! - [`filter`]: the `tags:query` filter grammar
//! - [`dashboard`]: system overview figures and size formatting
//! - [`error`]: the crate error type

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod package;

pub use dashboard::{format_bytes, parse_size_to_bytes, DashboardStats, PackageSize};
pub use error::{Result, ZacmanError};
pub use filter::{
    parse_installed_filter, parse_repo_filter, InstalledFilter, InstalledFilterSet, RepoFilter,
    RepoFilterSet,
};
pub use package::{PackageRecord, PendingUpdate, Source};
