//! newsvet-vector
//!
//! Dense-vector matching of free text against the TTP pattern catalogue:
//! build an inner-product index over embedded pattern descriptions, persist
//! it next to the catalogue it was built from, and answer thresholded
//! nearest-neighbor queries. See `index`, `catalog`, and `matcher`.

pub mod catalog;
pub mod index;
pub mod matcher;

pub use index::{embedding_input, TtpIndex};
pub use matcher::TtpMatcher;
