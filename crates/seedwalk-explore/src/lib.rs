//! Time-travel seed-test generation over UI transition graphs.
//!
//! Each seed test is one bounded walk from the graph's start state. The walk
//! always fires the globally least-selected event available, remembers
//! highly-connected ("interesting") states as it passes them, and when it
//! revisits a state too often it travels back to the fittest interesting state
//! and tries a different path from there.
//!
//! ```text
//! enter state ─► count visit ─► interesting? record ─► stuck? rewind to fittest
//!      ▲                                                        │
//!      └──── record step ◄── least-selected event ◄── out-events┘
//! ```
//!
//! # Module Structure
//!
//! - [`walk`] — per-walk bookkeeping (step log, visits, interesting states,
//!   fitness, event selection) and the generation driver
//! - [`suite`] — seed tests handed to the downstream mutation stage
//! - [`coverage`] — edge coverage of a finished suite
//! - [`config`] — policy thresholds

pub mod config;
pub mod coverage;
pub mod suite;
pub mod walk;

pub use config::{PolicyConfig, WalkFailureMode};
pub use coverage::CoverageReport;
pub use suite::{SeedTest, SeedTestSuite};
pub use walk::runner::{generate_seed_tests, GenerationReport, SeedGenError, SeedGenerator};
pub use walk::engine::{Walk, WalkError, WalkOutcome, WalkSummary};
