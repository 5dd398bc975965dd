//! Query scheduling: generations, debounced detail fetches and remote-search gating.
//!
//! None of these types perform I/O or read the clock. The dispatcher feeds them
//! the current time and the query session, and they answer with what to send or
//! whether an arriving answer may be applied.

pub mod detail;
pub mod remote;
pub mod session;

pub use detail::{DetailScheduler, DetailTick, PendingDetailRequest};
pub use remote::{Admission, IssuedSearch, RemoteSearchGate};
pub use session::QuerySession;
