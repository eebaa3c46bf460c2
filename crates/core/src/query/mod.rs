//! Catalog query engine.
//!
//! The set of read-only operations the assistant's tools wrap: search,
//! detail lookup, stock check, category listing, recommendation, and the
//! featured sample. All of them read the immutable catalog snapshot.

mod engine;
mod ranking;
mod types;

pub use engine::QueryEngine;
pub use ranking::rank_score;
pub use types::*;
