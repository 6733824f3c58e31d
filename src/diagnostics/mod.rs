//! Run diagnostics attached to analysis results.
pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};
