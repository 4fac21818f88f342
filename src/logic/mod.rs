//! Domain logic
//!
//! Pure decision and layout code plus the what-if session state. Nothing in
//! here talks HTTP except through the `Predictor` seam.
//!
//! ## Structure
//! - `types`, `ordered`: shared data model
//! - `drivers`: feature-importance ranking
//! - `recommend`: rule-based advisories
//! - `whatif`: interactive simulation sessions
//! - `report`: report document composition
//! - `feedback`: correct/incorrect verdict mapping

pub mod drivers;
pub mod feedback;
pub mod ordered;
pub mod recommend;
pub mod report;
pub mod types;
pub mod whatif;
