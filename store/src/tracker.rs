//! Owning state container for the tracked collections.
//!
//! Collections are stored newest first and replaced wholesale on every
//! mutation; several derivations depend on that ordering. Practices and
//! assessments referencing a deleted skill are cascade-deleted with it.

use engine::analytics::badges::earned_badges;
use engine::core::model::{Assessment, Badge, Practice, Skill, SkillCategory, UserProfile};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::storage::Storage;

/// The persisted document: the three entity collections plus the profile.
/// Every field defaults so partially written documents normalize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub practices: Vec<Practice>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub profile: UserProfile,
}

/// Input for registering a skill.
#[derive(Debug, Clone)]
pub struct SkillDraft {
    pub name: String,
    pub category: SkillCategory,
    pub current_level: u8,
    pub target_level: u8,
    pub start_date: String,
}

/// Partial direct edit of a skill; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub current_level: Option<u8>,
    pub target_level: Option<u8>,
    pub start_date: Option<String>,
}

/// Input for logging a practice session.
#[derive(Debug, Clone)]
pub struct PracticeDraft {
    pub skill_id: String,
    pub duration: u32,
    pub activity_type: String,
    pub difficulty: u8,
    pub note: Option<String>,
}

/// Input for recording a self-assessment.
#[derive(Debug, Clone)]
pub struct AssessmentDraft {
    pub skill_id: String,
    pub new_level: u8,
    pub achievements: String,
    pub challenges: String,
    pub next_steps: String,
    pub date: String,
}

pub struct Tracker {
    storage: Storage,
    state: TrackerState,
}

impl Tracker {
    /// Loads the last-saved state (or the empty default) from storage.
    pub fn load(storage: Storage) -> Self {
        let state = storage.load();
        Self { storage, state }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Re-reads the persisted state, discarding the in-memory copy.
    pub fn reload(&mut self) {
        self.state = self.storage.load();
    }

    /// Registers a skill and returns its freshly minted id.
    pub fn add_skill(&mut self, draft: SkillDraft) -> String {
        let skill = Skill {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            category: draft.category,
            current_level: draft.current_level,
            target_level: draft.target_level,
            start_date: draft.start_date,
            created_at: OffsetDateTime::now_utc(),
            last_practice: None,
        };
        let id = skill.id.clone();
        self.state.skills = prepend(skill, &self.state.skills);
        self.persist();
        id
    }

    /// Applies a partial direct edit to one skill.
    pub fn update_skill(&mut self, skill_id: &str, patch: SkillPatch) {
        let skills: Vec<Skill> = self
            .state
            .skills
            .iter()
            .map(|skill| {
                if skill.id != skill_id {
                    return skill.clone();
                }
                let mut updated = skill.clone();
                if let Some(name) = patch.name.clone() {
                    updated.name = name;
                }
                if let Some(category) = patch.category {
                    updated.category = category;
                }
                if let Some(level) = patch.current_level {
                    updated.current_level = level;
                }
                if let Some(level) = patch.target_level {
                    updated.target_level = level;
                }
                if let Some(date) = patch.start_date.clone() {
                    updated.start_date = date;
                }
                updated
            })
            .collect();
        self.state.skills = skills;
        self.persist();
    }

    /// Removes a skill and cascade-deletes its practices and assessments.
    pub fn delete_skill(&mut self, skill_id: &str) {
        let skills: Vec<Skill> = self
            .state
            .skills
            .iter()
            .filter(|skill| skill.id != skill_id)
            .cloned()
            .collect();
        let practices: Vec<Practice> = self
            .state
            .practices
            .iter()
            .filter(|practice| practice.skill_id != skill_id)
            .cloned()
            .collect();
        let assessments: Vec<Assessment> = self
            .state
            .assessments
            .iter()
            .filter(|assessment| assessment.skill_id != skill_id)
            .cloned()
            .collect();
        self.state.skills = skills;
        self.state.practices = practices;
        self.state.assessments = assessments;
        self.persist();
    }

    /// Logs a practice for an existing skill and stamps the skill's
    /// `last_practice`. Drafts referencing an unknown skill are ignored.
    pub fn add_practice(&mut self, draft: PracticeDraft) -> Option<String> {
        let skill_name = self
            .state
            .skills
            .iter()
            .find(|skill| skill.id == draft.skill_id)?
            .name
            .clone();

        let now = OffsetDateTime::now_utc();
        let practice = Practice {
            id: Uuid::new_v4().to_string(),
            skill_id: draft.skill_id.clone(),
            skill_name,
            duration: draft.duration,
            activity_type: draft.activity_type,
            difficulty: draft.difficulty,
            note: draft.note,
            date: now.format(&Rfc3339).unwrap_or_default(),
            timestamp: now,
        };
        let id = practice.id.clone();
        self.state.practices = prepend(practice, &self.state.practices);
        self.touch_last_practice(&draft.skill_id, now);
        self.persist();
        Some(id)
    }

    /// Records a self-assessment: captures the skill's current level as
    /// `previous_level`, then moves the skill to the new level. Drafts
    /// referencing an unknown skill are ignored.
    pub fn add_assessment(&mut self, draft: AssessmentDraft) -> Option<String> {
        let (skill_name, previous_level) = {
            let skill = self
                .state
                .skills
                .iter()
                .find(|skill| skill.id == draft.skill_id)?;
            (skill.name.clone(), skill.current_level)
        };

        let assessment = Assessment {
            id: Uuid::new_v4().to_string(),
            skill_id: draft.skill_id.clone(),
            skill_name,
            previous_level,
            new_level: draft.new_level,
            achievements: draft.achievements,
            challenges: draft.challenges,
            next_steps: draft.next_steps,
            date: draft.date,
            timestamp: OffsetDateTime::now_utc(),
        };
        let id = assessment.id.clone();
        self.state.assessments = prepend(assessment, &self.state.assessments);
        self.set_current_level(&draft.skill_id, draft.new_level);
        self.persist();
        Some(id)
    }

    pub fn update_profile(&mut self, profile: UserProfile) {
        self.state.profile = profile;
        self.persist();
    }

    /// Erases everything, in memory and on disk.
    pub fn clear_all(&mut self) {
        self.state = self.storage.clear();
    }

    /// Currently earned badges, derived from the live collections.
    pub fn badges(&self) -> Vec<&'static Badge> {
        earned_badges(
            &self.state.skills,
            &self.state.practices,
            OffsetDateTime::now_utc(),
        )
    }

    fn touch_last_practice(&mut self, skill_id: &str, at: OffsetDateTime) {
        let skills: Vec<Skill> = self
            .state
            .skills
            .iter()
            .map(|skill| {
                let mut updated = skill.clone();
                if updated.id == skill_id {
                    updated.last_practice = Some(at);
                }
                updated
            })
            .collect();
        self.state.skills = skills;
    }

    fn set_current_level(&mut self, skill_id: &str, level: u8) {
        let skills: Vec<Skill> = self
            .state
            .skills
            .iter()
            .map(|skill| {
                let mut updated = skill.clone();
                if updated.id == skill_id {
                    updated.current_level = level;
                }
                updated
            })
            .collect();
        self.state.skills = skills;
    }

    fn persist(&self) {
        self.storage.save(&self.state);
    }
}

fn prepend<T: Clone>(head: T, rest: &[T]) -> Vec<T> {
    let mut next = Vec::with_capacity(rest.len() + 1);
    next.push(head);
    next.extend(rest.iter().cloned());
    next
}
