//! Threshold-based achievement unlocking.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::core::catalog::BADGE_CATALOG;
use crate::core::dates::practice_streak;
use crate::core::model::{Badge, Practice, Skill};

const DEDICATED_HOURS: f64 = 100.0;
const STREAK_DAYS: u32 = 7;
const POLYMATH_SKILLS: usize = 5;
const EXPERT_LEVEL: u8 = 10;

/// Catalog entries whose unlock predicate holds, in catalog order.
pub fn earned_badges(
    skills: &[Skill],
    practices: &[Practice],
    now: OffsetDateTime,
) -> Vec<&'static Badge> {
    let mut earned: HashSet<&str> = HashSet::new();

    if !practices.is_empty() {
        earned.insert("first_practice");
    }

    let timestamps: Vec<OffsetDateTime> = practices.iter().map(|p| p.timestamp).collect();
    if practice_streak(&timestamps, now) >= STREAK_DAYS {
        earned.insert("weekly_streak");
    }

    if skills.len() >= POLYMATH_SKILLS {
        earned.insert("polymath");
    }

    let total_minutes: u64 = practices.iter().map(|p| u64::from(p.duration)).sum();
    if total_minutes as f64 / 60.0 >= DEDICATED_HOURS {
        earned.insert("dedicated");
    }

    if skills.iter().any(|skill| skill.current_level >= EXPERT_LEVEL) {
        earned.insert("expert");
    }

    BADGE_CATALOG
        .iter()
        .filter(|badge| earned.contains(badge.id))
        .collect()
}
