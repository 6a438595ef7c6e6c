//! Export core modules shared across front ends.

#[cfg(feature = "excel")]
pub mod chart_book;
