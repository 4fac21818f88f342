//! Request and response models

pub mod feedback;
pub mod insight;
pub mod session;

pub use feedback::*;
pub use insight::*;
pub use session::*;
