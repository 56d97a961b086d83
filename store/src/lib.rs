//! Persistence boundary and owning state container for SkillTrack.
//!
//! Storage is best-effort by contract: reads that fail fall back to the
//! empty default state and writes that fail are logged, never surfaced. The
//! derivation engine stays pure; everything impure (filesystem, wall clock,
//! id minting) lives here.

pub mod storage;
pub mod tracker;

pub use storage::Storage;
pub use tracker::{
    AssessmentDraft, PracticeDraft, SkillDraft, SkillPatch, Tracker, TrackerState,
};
