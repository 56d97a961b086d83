//! Derivation engine for SkillTrack. Pure functions turning logged skills,
//! practices, and self-assessments into dashboard metrics, advisories, and
//! achievements. Nothing in here reads a clock or touches I/O; callers pass
//! the collections and the current instant.

pub mod analytics;
pub mod core;
