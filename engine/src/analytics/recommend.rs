//! Rule-based advisory messages for the dashboard.
//!
//! Rules are independent predicate → message functions evaluated in a fixed
//! order: per-skill rules in skill iteration order, then global rules. The
//! never-practiced rule is terminal for its skill, so a skill with no logged
//! practices emits that single message and nothing else.

use time::OffsetDateTime;

use crate::core::dates::day_diff;
use crate::core::model::{Assessment, Practice, Skill, SkillCategory};

const PRACTICE_GAP_MESSAGE: &str =
    "⏰ More than 3 days without practicing. How about logging a study session today?";
const MONTHLY_ASSESSMENT_MESSAGE: &str =
    "📝 Run a self-assessment to refresh your monthly levels.";
const TECHNICAL_BALANCE_MESSAGE: &str =
    "💡 Consider balancing technical skills with more practice.";

struct RuleContext<'a> {
    practices: &'a [Practice],
    assessments: &'a [Assessment],
    now: OffsetDateTime,
    total_minutes: u64,
    technical_minutes: u64,
}

type SkillRule = fn(&RuleContext<'_>, &Skill) -> Option<String>;
type GlobalRule = fn(&RuleContext<'_>) -> Option<String>;

const SKILL_RULES: &[SkillRule] = &[stale_practice, goal_reached, assessment_gap];
const GLOBAL_RULES: &[GlobalRule] = &[technical_balance, recent_practice_gap, monthly_assessment];

/// Advisory strings, fully recomputed on every call and never deduplicated
/// across sessions.
pub fn recommendations(
    skills: &[Skill],
    practices: &[Practice],
    assessments: &[Assessment],
    now: OffsetDateTime,
) -> Vec<String> {
    let ctx = RuleContext {
        practices,
        assessments,
        now,
        total_minutes: practices.iter().map(|p| u64::from(p.duration)).sum(),
        technical_minutes: technical_minutes(skills, practices),
    };

    let mut messages = Vec::new();
    for skill in skills {
        if let Some(message) = never_practiced(&ctx, skill) {
            messages.push(message);
            continue;
        }
        for rule in SKILL_RULES {
            if let Some(message) = rule(&ctx, skill) {
                messages.push(message);
            }
        }
    }
    for rule in GLOBAL_RULES {
        if let Some(message) = rule(&ctx) {
            messages.push(message);
        }
    }
    messages
}

fn never_practiced(ctx: &RuleContext<'_>, skill: &Skill) -> Option<String> {
    if ctx.practices.iter().any(|p| p.skill_id == skill.id) {
        return None;
    }
    Some(format!(
        "⚠️ {} needs attention! No practices logged yet.",
        skill.name
    ))
}

fn stale_practice(ctx: &RuleContext<'_>, skill: &Skill) -> Option<String> {
    let latest = ctx
        .practices
        .iter()
        .filter(|p| p.skill_id == skill.id)
        .map(|p| p.timestamp)
        .max()?;
    (day_diff(ctx.now, latest) > 14).then(|| {
        format!(
            "⚠️ {} needs attention! More than 14 days without practice.",
            skill.name
        )
    })
}

fn goal_reached(_ctx: &RuleContext<'_>, skill: &Skill) -> Option<String> {
    (skill.current_level >= skill.target_level).then(|| {
        format!(
            "🎉 You reached your goal for {}! Set a new target.",
            skill.name
        )
    })
}

fn assessment_gap(ctx: &RuleContext<'_>, skill: &Skill) -> Option<String> {
    let practice_count = ctx.practices.iter().filter(|p| p.skill_id == skill.id).count();
    let assessment_count = ctx
        .assessments
        .iter()
        .filter(|a| a.skill_id == skill.id)
        .count();
    (practice_count > 5 && assessment_count < 2).then(|| {
        format!(
            "📊 Run a self-assessment for {} to measure your progress.",
            skill.name
        )
    })
}

fn technical_balance(ctx: &RuleContext<'_>) -> Option<String> {
    if ctx.total_minutes == 0 {
        return None;
    }
    let share = ctx.technical_minutes as f64 / ctx.total_minutes as f64;
    (share < 0.3).then(|| TECHNICAL_BALANCE_MESSAGE.to_string())
}

fn recent_practice_gap(ctx: &RuleContext<'_>) -> Option<String> {
    // Collections are stored newest first; the head is the latest practice.
    let stale = match ctx.practices.first() {
        Some(latest) => day_diff(ctx.now, latest.timestamp) >= 3,
        None => true,
    };
    stale.then(|| PRACTICE_GAP_MESSAGE.to_string())
}

fn monthly_assessment(ctx: &RuleContext<'_>) -> Option<String> {
    let overdue = match ctx.assessments.first() {
        Some(latest) => day_diff(ctx.now, latest.timestamp) > 30,
        None => true,
    };
    overdue.then(|| MONTHLY_ASSESSMENT_MESSAGE.to_string())
}

fn technical_minutes(skills: &[Skill], practices: &[Practice]) -> u64 {
    practices
        .iter()
        .filter(|practice| {
            skills
                .iter()
                .find(|skill| skill.id == practice.skill_id)
                .map_or(false, |skill| skill.category == SkillCategory::Technical)
        })
        .map(|practice| u64::from(practice.duration))
        .sum()
}
