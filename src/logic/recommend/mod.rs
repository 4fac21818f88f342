//! Recommendation Module
//!
//! Deterministic advisories derived from student attributes.
//!
//! ## Structure
//! - `rules`: ordered rule table and advisory texts
//! - `engine`: rule evaluation
//!
//! ## Usage
//! ```ignore
//! use crate::logic::recommend::evaluate;
//!
//! for advisory in evaluate(&record) {
//!     println!("- {}", advisory);
//! }
//! ```

pub mod engine;
pub mod rules;

pub use engine::evaluate;
pub use rules::FALLBACK_ADVISORY;
