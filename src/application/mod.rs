//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the form, the submission state machine and request dispatch.

pub mod state;
pub mod submission;

pub use state::*;
pub use submission::*;
