//! HTTP handlers

pub mod feedback;
pub mod health;
pub mod insights;
pub mod predictions;
pub mod reports;
pub mod sessions;

#[cfg(test)]
mod tests;
