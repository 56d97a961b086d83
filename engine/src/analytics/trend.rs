//! Linear projection of assessed growth toward a skill's target level.

use serde::Serialize;
use time::OffsetDateTime;

use super::aggregate::weekly_hours;
use crate::core::model::{Assessment, Practice, Skill};

/// Modeling constant: one self-assessment roughly every 30 days.
const ASSESSMENT_CADENCE_DAYS: f64 = 30.0;

/// Projected path for the skill with the widest remaining gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictiveInsight {
    pub skill_name: String,
    /// Hours practiced across all skills in the current week.
    pub weekly_hours: f64,
    pub weeks: u32,
}

/// Mean signed level change per assessment for one skill. None with fewer
/// than two assessments on record.
pub fn average_growth(assessments: &[Assessment], skill_id: &str) -> Option<f64> {
    let deltas: Vec<f64> = assessments
        .iter()
        .filter(|assessment| assessment.skill_id == skill_id)
        .map(|assessment| f64::from(assessment.new_level) - f64::from(assessment.previous_level))
        .collect();
    if deltas.len() < 2 {
        return None;
    }
    Some(deltas.iter().sum::<f64>() / deltas.len() as f64)
}

/// Weeks until the target level at the observed growth rate. None when the
/// rate is unknown or non-positive; zero when the goal is already met.
pub fn estimate_weeks_to_goal(
    current_level: u8,
    target_level: u8,
    avg_growth: Option<f64>,
) -> Option<u32> {
    let growth = avg_growth?;
    if growth <= 0.0 {
        return None;
    }
    let delta = f64::from(target_level) - f64::from(current_level);
    if delta <= 0.0 {
        return Some(0);
    }
    let estimated_days = (delta / growth) * ASSESSMENT_CADENCE_DAYS;
    Some((estimated_days / 7.0).ceil() as u32)
}

/// Projection for the skill with the largest remaining gap; the first skill
/// encountered wins ties. None when there are no skills, no assessments, or
/// no estimate can be produced.
pub fn predictive_insight(
    skills: &[Skill],
    assessments: &[Assessment],
    practices: &[Practice],
    now: OffsetDateTime,
) -> Option<PredictiveInsight> {
    if skills.is_empty() || assessments.is_empty() {
        return None;
    }

    let mut target: Option<&Skill> = None;
    for skill in skills {
        let gap = i32::from(skill.target_level) - i32::from(skill.current_level);
        let best = target.map(|t| i32::from(t.target_level) - i32::from(t.current_level));
        if best.map_or(true, |best_gap| gap > best_gap) {
            target = Some(skill);
        }
    }
    let target = target?;

    let growth = average_growth(assessments, &target.id);
    let weeks = estimate_weeks_to_goal(target.current_level, target.target_level, growth)?;

    Some(PredictiveInsight {
        skill_name: target.name.clone(),
        weekly_hours: weekly_hours(practices, now),
        weeks,
    })
}
