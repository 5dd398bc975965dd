//! Package manager backend.
//!
//! Maps [`Action`](crate::app::Action)s to command lines, runs them through an
//! [`Executor`], and decodes the host's results back into [`Completion`]s.
//!
//! - [`commands`]: command plans, context keys, result decoding
//! - [`parse`]: parsers for pacman and helper output
//! - [`executor`]: the host seam and [`dispatch`]
//! - [`messages`]: the completion type

pub mod commands;
pub mod executor;
pub mod messages;
pub mod parse;

pub use commands::{decode_command_result, decode_pane_exit, CommandPlan, RequestKind};
pub use executor::{dispatch, BackendConfig, Executor};
pub use messages::Completion;
