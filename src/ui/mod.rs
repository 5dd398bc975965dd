//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: display-ready frame description
//! - [`renderer`]: entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor, width and highlight utilities
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{
    Body, BrowseInfo, DashboardInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, ModalInfo, SearchBarInfo,
    SelectionPanelInfo, TabInfo, UIViewModel, UpdatesInfo,
};
