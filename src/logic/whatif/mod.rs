//! What-If Module
//!
//! Interactive, never-persisted exploration over a copy of a prediction's
//! input.
//!
//! ## Structure
//! - `fields`: slider fields and ranges
//! - `session`: the session state machine
//! - `store`: shared registry used by the HTTP layer

pub mod fields;
pub mod session;
pub mod store;


pub use fields::FieldRange;
pub use session::{RecalcOutcome, SessionError, SessionSnapshot, WhatIfSession};
pub use store::{RecalcError, SessionStore};
