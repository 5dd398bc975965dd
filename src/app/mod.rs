//! Application layer: state, dispatcher, and the state machines it drives.
//!
//! # Architecture
//!
//! Data flows in one direction:
//!
//! ```text
//! Key / Tick / Completion → handle_event → AppState mutations → Actions
//!          ↑                                                       ↓
//!          └──────────── backend::dispatch (commands, timers) ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect requests emitted by the dispatcher
//! - [`handler`]: key routing and completion handling
//! - [`modal`]: confirmation dialog and error overlay
//! - [`modes`]: browse modes and input focus
//! - [`selection`]: marked packages and the selection panel cursor
//! - [`state`]: the state container
//! - [`view`]: view model computation

pub mod actions;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod selection;
pub mod state;
pub mod view;

pub use actions::{Action, ActionKind};
pub use handler::{handle_event, Event, Key};
pub use modal::{Confirmation, ErrorOverlay, ModalOutcome, ModalState};
pub use modes::{BrowseMode, Focus};
pub use selection::{SelectionPanel, SelectionSet};
pub use state::{AppState, DetailPane, PendingLoads, Settings, StatusLevel, StatusLine};
