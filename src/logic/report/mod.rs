//! Report Module
//!
//! Composes the downloadable student report as a paginated list of drawing
//! instructions. Rendering to PDF bytes happens outside this crate.
//!
//! ## Structure
//! - `types`: document, section and draw-op types
//! - `layout`: cursor/page accumulator and text wrapping
//! - `profile`: profile field table
//! - `composer`: section emission
//!
//! ## Usage
//! ```ignore
//! use crate::logic::report::compose;
//!
//! let doc = compose(&record, &prediction, &drivers, &recommendations, Utc::now());
//! println!("{} page(s)", doc.page_count);
//! ```

pub mod composer;
pub mod layout;
pub mod profile;
pub mod types;


pub use composer::{compose, report_filename};
