//! Aggregate metrics over the logged collections.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::core::catalog::CHART_PALETTE;
use crate::core::dates::{day_month_label, start_of_week, within_last_days};
use crate::core::model::{Assessment, Practice, Skill, SkillCategory};

/// Parallel label/value arrays feeding bar and line charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One slice of the practice-minutes-per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: &'static str,
    pub minutes: u64,
    pub color: &'static str,
}

/// All-time hour totals for the dashboard header, preformatted to one
/// decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursSummary {
    pub total_hours: String,
    pub weekly_average: String,
}

/// Highlight of the skill whose assessed level climbed the most.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressHighlight {
    pub skill_name: String,
    pub diff: i32,
}

/// Practice-weighted mean of current levels, one decimal. Each skill weighs
/// `1 + linked practice count`, so unpracticed skills still participate.
pub fn professional_level(skills: &[Skill], practices: &[Practice]) -> f64 {
    if skills.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for practice in practices {
        *counts.entry(practice.skill_id.as_str()).or_insert(0) += 1;
    }

    let mut weighted = 0.0;
    let mut weight_total = 0.0;
    for skill in skills {
        let weight = f64::from(counts.get(skill.id.as_str()).copied().unwrap_or(0) + 1);
        weighted += weight * f64::from(skill.current_level);
        weight_total += weight;
    }

    round1(weighted / weight_total)
}

/// Hours practiced since the start of the current week, one decimal.
pub fn weekly_hours(practices: &[Practice], now: OffsetDateTime) -> f64 {
    let start = start_of_week(now);
    let minutes: u64 = practices
        .iter()
        .filter(|practice| practice.timestamp >= start)
        .map(|practice| u64::from(practice.duration))
        .sum();
    round1(minutes as f64 / 60.0)
}

/// Number of practices logged for a skill inside the trailing window.
pub fn practice_count_in_window(
    skill_id: &str,
    practices: &[Practice],
    days: i64,
    now: OffsetDateTime,
) -> usize {
    practices
        .iter()
        .filter(|practice| {
            practice.skill_id == skill_id && within_last_days(practice.timestamp, days, now)
        })
        .count()
}

/// Skills with fewer than 3 practices in the trailing 30 days, in input
/// order.
pub fn risk_skills<'a>(
    skills: &'a [Skill],
    practices: &[Practice],
    now: OffsetDateTime,
) -> Vec<&'a Skill> {
    skills
        .iter()
        .filter(|skill| practice_count_in_window(&skill.id, practices, 30, now) < 3)
        .collect()
}

/// Skill with the largest all-time practice minutes. The earliest-logged
/// skill id wins ties; None when nothing is logged or the top id no longer
/// resolves to a skill.
pub fn most_practiced_skill<'a>(skills: &'a [Skill], practices: &[Practice]) -> Option<&'a Skill> {
    if skills.is_empty() || practices.is_empty() {
        return None;
    }

    let mut totals: Vec<(&str, u64)> = Vec::new();
    for practice in practices {
        match totals.iter_mut().find(|(id, _)| *id == practice.skill_id) {
            Some((_, minutes)) => *minutes += u64::from(practice.duration),
            None => totals.push((practice.skill_id.as_str(), u64::from(practice.duration))),
        }
    }

    let mut top: Option<(&str, u64)> = None;
    for (id, minutes) in totals {
        if top.map_or(true, |(_, best)| minutes > best) {
            top = Some((id, minutes));
        }
    }

    let (id, _) = top?;
    skills.iter().find(|skill| skill.id == id)
}

/// Trailing-30-day practice hours grouped by the name snapshot each practice
/// carries, in first-seen order. Renamed skills keep their history under the
/// old name.
pub fn hours_by_skill(practices: &[Practice], now: OffsetDateTime) -> SeriesData {
    let mut groups: Vec<(String, u64)> = Vec::new();
    for practice in practices {
        if !within_last_days(practice.timestamp, 30, now) {
            continue;
        }
        match groups.iter_mut().find(|(name, _)| *name == practice.skill_name) {
            Some((_, minutes)) => *minutes += u64::from(practice.duration),
            None => groups.push((practice.skill_name.clone(), u64::from(practice.duration))),
        }
    }

    let mut series = SeriesData::default();
    for (name, minutes) in groups {
        series.labels.push(name);
        series.values.push(round1(minutes as f64 / 60.0));
    }
    series
}

/// All-time practice minutes per category, zero-minute categories omitted.
/// Practices whose skill no longer resolves are dropped. Colors come from the
/// fixed palette, cycled by the slice's position in the output.
pub fn category_distribution(skills: &[Skill], practices: &[Practice]) -> Vec<CategorySlice> {
    let mut slices = Vec::new();
    for category in SkillCategory::ALL {
        let minutes: u64 = practices
            .iter()
            .filter(|practice| {
                skills
                    .iter()
                    .find(|skill| skill.id == practice.skill_id)
                    .map_or(false, |skill| skill.category == category)
            })
            .map(|practice| u64::from(practice.duration))
            .sum();
        if minutes == 0 {
            continue;
        }
        slices.push(CategorySlice {
            name: category.label(),
            minutes,
            color: CHART_PALETTE[slices.len() % CHART_PALETTE.len()],
        });
    }
    slices
}

/// Percentage of skills whose current level meets the target, rounded to the
/// nearest whole percent.
pub fn goal_completion_rate(skills: &[Skill]) -> u32 {
    if skills.is_empty() {
        return 0;
    }
    let completed = skills
        .iter()
        .filter(|skill| skill.current_level >= skill.target_level)
        .count();
    ((completed as f64 / skills.len() as f64) * 100.0).round() as u32
}

/// Skill whose assessed level climbed the most between its first and latest
/// assessment. The first-grouped skill wins ties.
pub fn skill_progression(assessments: &[Assessment]) -> Option<ProgressHighlight> {
    if assessments.is_empty() {
        return None;
    }

    let mut groups: Vec<(&str, Vec<&Assessment>)> = Vec::new();
    for assessment in assessments {
        match groups.iter_mut().find(|(id, _)| *id == assessment.skill_id) {
            Some((_, list)) => list.push(assessment),
            None => groups.push((assessment.skill_id.as_str(), vec![assessment])),
        }
    }

    let mut best: Option<ProgressHighlight> = None;
    for (_, mut list) in groups {
        list.sort_by_key(|assessment| assessment.timestamp);
        let (Some(first), Some(last)) = (list.first(), list.last()) else {
            continue;
        };
        let diff = i32::from(last.new_level) - i32::from(first.previous_level);
        if best.as_ref().map_or(true, |current| diff > current.diff) {
            best = Some(ProgressHighlight {
                skill_name: last.skill_name.clone(),
                diff,
            });
        }
    }
    best
}

/// All-time totals for the dashboard header. Collections are stored newest
/// first, so the last element is the oldest practice and anchors the weekly
/// average; the week count is clamped to at least one.
pub fn hours_summary(practices: &[Practice], now: OffsetDateTime) -> HoursSummary {
    let total_minutes: u64 = practices.iter().map(|p| u64::from(p.duration)).sum();
    let total_hours = total_minutes as f64 / 60.0;

    let reference = practices.last().map_or(now, |practice| practice.timestamp);
    let weeks = (now - reference).whole_weeks().max(1);

    HoursSummary {
        total_hours: format!("{total_hours:.1}"),
        weekly_average: format!("{:.1}", total_hours / weeks as f64),
    }
}

/// Assessed levels over time for the progress line, oldest first. Labels come
/// from the user-entered assessment dates.
pub fn assessment_series(assessments: &[Assessment]) -> SeriesData {
    let mut sorted: Vec<&Assessment> = assessments.iter().collect();
    sorted.sort_by_key(|assessment| assessment.timestamp);

    let mut series = SeriesData::default();
    for assessment in sorted {
        series.labels.push(day_month_label(&assessment.date));
        series.values.push(f64::from(assessment.new_level));
    }
    series
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::Duration;

    const NOW: OffsetDateTime = datetime!(2026-08-04 15:00 UTC);

    fn skill(id: &str, name: &str, category: SkillCategory, current: u8, target: u8) -> Skill {
        Skill {
            id: id.into(),
            name: name.into(),
            category,
            current_level: current,
            target_level: target,
            start_date: "2026-01-05".into(),
            created_at: datetime!(2026-01-05 09:00 UTC),
            last_practice: None,
        }
    }

    fn practice(skill_id: &str, skill_name: &str, duration: u32, ts: OffsetDateTime) -> Practice {
        Practice {
            id: format!("p-{skill_id}-{ts}"),
            skill_id: skill_id.into(),
            skill_name: skill_name.into(),
            duration,
            activity_type: "Hands-on practice".into(),
            difficulty: 3,
            note: None,
            date: ts.to_string(),
            timestamp: ts,
        }
    }

    fn assessment(
        skill_id: &str,
        skill_name: &str,
        previous: u8,
        new: u8,
        ts: OffsetDateTime,
    ) -> Assessment {
        Assessment {
            id: format!("a-{skill_id}-{ts}"),
            skill_id: skill_id.into(),
            skill_name: skill_name.into(),
            previous_level: previous,
            new_level: new,
            achievements: String::new(),
            challenges: String::new(),
            next_steps: String::new(),
            date: "2026-08-01".into(),
            timestamp: ts,
        }
    }

    #[test]
    fn professional_level_weighs_practiced_skills_heavier() {
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 4, 8),
            skill("b", "Facilitation", SkillCategory::Behavioral, 8, 9),
        ];
        let practices = [
            practice("a", "Rust", 30, NOW - Duration::days(1)),
            practice("a", "Rust", 30, NOW - Duration::days(2)),
        ];
        // Weights 3 and 1: (3*4 + 1*8) / 4.
        assert_eq!(professional_level(&skills, &practices), 5.0);
    }

    #[test]
    fn professional_level_defaults_to_zero_without_skills() {
        assert_eq!(professional_level(&[], &[]), 0.0);
    }

    #[test]
    fn professional_level_stays_within_level_bounds() {
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 1, 8),
            skill("b", "Go", SkillCategory::Technical, 10, 10),
        ];
        let practices: Vec<Practice> = (0..7)
            .map(|i| practice("b", "Go", 15, NOW - Duration::days(i)))
            .collect();
        let level = professional_level(&skills, &practices);
        assert!((1.0..=10.0).contains(&level));
    }

    #[test]
    fn weekly_hours_only_counts_the_current_week() {
        let practices = [
            practice("a", "Rust", 90, NOW - Duration::days(1)),
            practice("a", "Rust", 60, NOW - Duration::days(7)),
        ];
        // The week started Sunday 2026-08-02; only the 90-minute session counts.
        assert_eq!(weekly_hours(&practices, NOW), 1.5);
    }

    #[test]
    fn unpracticed_skills_are_flagged_as_risk() {
        let skills = [skill("a", "Rust", SkillCategory::Technical, 3, 8)];
        let flagged = risk_skills(&skills, &[], NOW);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, "a");
    }

    #[test]
    fn three_recent_practices_clear_the_risk_flag() {
        let skills = [skill("a", "Rust", SkillCategory::Technical, 3, 8)];
        let practices: Vec<Practice> = (0..3)
            .map(|i| practice("a", "Rust", 30, NOW - Duration::days(i)))
            .collect();
        assert!(risk_skills(&skills, &practices, NOW).is_empty());
        assert_eq!(practice_count_in_window("a", &practices, 30, NOW), 3);
    }

    #[test]
    fn most_practiced_ranks_by_total_minutes() {
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 3, 8),
            skill("b", "Go", SkillCategory::Technical, 3, 8),
        ];
        let practices = [
            practice("a", "Rust", 30, NOW - Duration::days(3)),
            practice("b", "Go", 120, NOW - Duration::days(2)),
        ];
        assert_eq!(most_practiced_skill(&skills, &practices).unwrap().id, "b");
        assert!(most_practiced_skill(&skills, &[]).is_none());
    }

    #[test]
    fn most_practiced_tie_goes_to_the_first_seen_skill() {
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 3, 8),
            skill("b", "Go", SkillCategory::Technical, 3, 8),
        ];
        let practices = [
            practice("a", "Rust", 60, NOW - Duration::days(2)),
            practice("b", "Go", 60, NOW - Duration::days(1)),
        ];
        assert_eq!(most_practiced_skill(&skills, &practices).unwrap().id, "a");
    }

    #[test]
    fn hours_by_skill_groups_by_name_snapshot() {
        let practices = [
            // The skill was renamed after these were logged; history stays
            // under the old name.
            practice("a", "Rust (old)", 60, NOW - Duration::days(5)),
            practice("a", "Rust", 90, NOW - Duration::days(2)),
            practice("b", "Go", 45, NOW - Duration::days(40)),
        ];
        let series = hours_by_skill(&practices, NOW);
        assert_eq!(series.labels, vec!["Rust (old)".to_string(), "Rust".to_string()]);
        assert_eq!(series.values, vec![1.0, 1.5]);
    }

    #[test]
    fn hours_by_skill_totals_match_the_filtered_durations() {
        let practices = [
            practice("a", "Rust", 30, NOW - Duration::days(1)),
            practice("a", "Rust", 45, NOW - Duration::days(2)),
        ];
        let series = hours_by_skill(&practices, NOW);
        let summed: f64 = series.values.iter().sum();
        assert_eq!(summed, 1.3); // 75 minutes, rounded per group
    }

    #[test]
    fn category_distribution_skips_empty_and_orphaned() {
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 3, 8),
            skill("b", "Spanish", SkillCategory::Language, 2, 6),
        ];
        let practices = [
            practice("a", "Rust", 60, NOW - Duration::days(1)),
            practice("b", "Spanish", 30, NOW - Duration::days(2)),
            practice("ghost", "Deleted", 500, NOW - Duration::days(3)),
        ];
        let slices = category_distribution(&skills, &practices);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "Technical");
        assert_eq!(slices[0].minutes, 60);
        assert_eq!(slices[0].color, CHART_PALETTE[0]);
        assert_eq!(slices[1].name, "Language");
        assert_eq!(slices[1].minutes, 30);
        assert_eq!(slices[1].color, CHART_PALETTE[1]);
    }

    #[test]
    fn goal_completion_rounds_to_whole_percent() {
        assert_eq!(goal_completion_rate(&[]), 0);
        let skills = [
            skill("a", "Rust", SkillCategory::Technical, 8, 8),
            skill("b", "Go", SkillCategory::Technical, 3, 8),
            skill("c", "Spanish", SkillCategory::Language, 2, 6),
        ];
        assert_eq!(goal_completion_rate(&skills), 33);
    }

    #[test]
    fn progression_spans_first_to_latest_assessment() {
        let assessments = [
            assessment("a", "Rust", 3, 5, datetime!(2026-05-01 10:00 UTC)),
            assessment("a", "Rust", 5, 7, datetime!(2026-06-01 10:00 UTC)),
            assessment("b", "Go", 4, 5, datetime!(2026-06-15 10:00 UTC)),
        ];
        let highlight = skill_progression(&assessments).unwrap();
        assert_eq!(highlight.skill_name, "Rust");
        assert_eq!(highlight.diff, 4);
        assert!(skill_progression(&[]).is_none());
    }

    #[test]
    fn hours_summary_clamps_to_one_week() {
        let practices = [practice("a", "Rust", 120, NOW)];
        let summary = hours_summary(&practices, NOW);
        assert_eq!(summary.total_hours, "2.0");
        assert_eq!(summary.weekly_average, "2.0");
    }

    #[test]
    fn hours_summary_divides_by_weeks_since_the_oldest_entry() {
        // Newest first: the last element anchors the week count.
        let practices = [
            practice("a", "Rust", 90, NOW - Duration::days(2)),
            practice("a", "Rust", 180, NOW - Duration::weeks(3)),
        ];
        let summary = hours_summary(&practices, NOW);
        assert_eq!(summary.total_hours, "4.5");
        assert_eq!(summary.weekly_average, "1.5");
    }

    #[test]
    fn empty_history_yields_zero_hours() {
        let summary = hours_summary(&[], NOW);
        assert_eq!(summary.total_hours, "0.0");
        assert_eq!(summary.weekly_average, "0.0");
    }

    #[test]
    fn assessment_series_is_chronological() {
        let assessments = [
            assessment("a", "Rust", 5, 7, datetime!(2026-06-01 10:00 UTC)),
            assessment("a", "Rust", 3, 5, datetime!(2026-05-01 10:00 UTC)),
        ];
        let series = assessment_series(&assessments);
        assert_eq!(series.values, vec![5.0, 7.0]);
        assert_eq!(series.labels.len(), 2);
    }
}
