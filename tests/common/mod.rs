//! Common test infrastructure
//!
//! This module provides everything end-to-end tests need: constants for the
//! fixture records and a builder for temporary song/log datasets.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestDataset, SONG_1_ID};
//!
//! #[test]
//! fn test_load() {
//!     let dataset = TestDataset::new().with_catalog().with_play_log();
//!     let summary = dataset.run().unwrap();
//!     assert_eq!(summary.totals.songplays, 2);
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{log_event, song_record, TestDataset};
