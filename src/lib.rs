//! Evaluation harness for documentation-review agents.
//!
//! Measures whether a review agent correctly flags semantic information loss
//! in staged documentation changes. Each labeled test case is reconstructed
//! from a unified diff into an isolated git working tree, reviewed by the
//! external agent under a hard timeout, and scored against its ground-truth
//! label; outcomes aggregate into confusion-matrix metrics.

pub mod cases;
pub mod classify;
pub mod errors;
pub mod metrics;
pub mod patch;
pub mod report;
pub mod review;
pub mod runner;
pub mod stage;
