//! Entity model for tracked skills, logged practices, and self-assessments.
//!
//! Entities are immutable once produced; the owning store updates collections
//! only by wholesale replacement. The `skill_name` carried by practices and
//! assessments is a point-in-time snapshot and is never re-joined against the
//! live skill.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Competency category. `ALL` fixes the evaluation order for categorical
/// breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Behavioral,
    Language,
    Management,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Behavioral,
        SkillCategory::Language,
        SkillCategory::Management,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::Behavioral => "Behavioral",
            SkillCategory::Language => "Language",
            SkillCategory::Management => "Management",
        }
    }
}

/// A tracked competency with current and target proficiency on a 1–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub current_level: u8,
    pub target_level: u8,
    /// User-entered calendar date the skill journey started.
    pub start_date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Set whenever a practice referencing this skill is logged.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_practice: Option<OffsetDateTime>,
}

/// One logged study/practice session tied to a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    pub id: String,
    pub skill_id: String,
    /// Skill name captured when the practice was logged.
    pub skill_name: String,
    /// Minutes; an absent value deserializes to zero.
    #[serde(default)]
    pub duration: u32,
    pub activity_type: String,
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// ISO form of `timestamp`, kept for display.
    pub date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A periodic self-rating that moves a skill's current level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub skill_id: String,
    /// Skill name captured when the assessment was recorded.
    pub skill_name: String,
    /// The skill's current level at the moment of recording.
    pub previous_level: u8,
    pub new_level: u8,
    pub achievements: String,
    pub challenges: String,
    pub next_steps: String,
    /// User-entered calendar date for the assessment.
    pub date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Profile data shown on the profile screen; carries no derivation logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Static achievement catalog entry; earned status is always derived, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}
