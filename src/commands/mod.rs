//! One-shot write commands against the ops API.
//!
//! Commands hold no state, never retry, and never mutate store data
//! optimistically; any server rejection surfaces its message text verbatim.

mod alerts;
mod assign;

pub use alerts::AlertCommand;
pub use assign::{AssignError, AssignmentCommand, AssignmentRequest};
