//! Core data models: raw match/timeline inputs and derived outputs.

mod analysis;
mod ids;
mod insight;
mod match_record;
mod report;
mod role;
mod timeline;

pub use analysis::*;
pub use ids::*;
pub use insight::*;
pub use match_record::*;
pub use report::*;
pub use role::*;
pub use timeline::*;
