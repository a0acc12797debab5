//! Readiness scoring.
//!
//! The base score rewards extraction coverage and input completeness and is
//! frozen at creation. The live score layers per-skill confidence on top and is
//! recomputed from scratch on every confidence change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::skills::ExtractedSkills;

const BASE_START: i64 = 35;
const POINTS_PER_CATEGORY: i64 = 5;
const MAX_CATEGORY_POINTS: i64 = 30;
const COMPANY_POINTS: i64 = 10;
const ROLE_POINTS: i64 = 10;
const LONG_JD_POINTS: i64 = 10;
const LONG_JD_CHARS: usize = 800;
const KNOW_POINTS: i64 = 2;

pub const NEXT_STEP_HINT: &str = "Start Day 1 plan now.";
pub const WEAK_SKILL_LIMIT: usize = 3;

/// Per-skill self-assessment. Skills missing from a confidence map are `Practice`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    #[default]
    Practice,
}

pub struct ScoreInput<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub jd_text: &'a str,
    pub extracted: &'a ExtractedSkills,
}

pub fn clamp_score(score: i64) -> u32 {
    score.clamp(0, 100) as u32
}

pub fn compute_base_score(input: &ScoreInput<'_>) -> u32 {
    let categories = input.extracted.category_count() as i64;
    let mut score = BASE_START + (POINTS_PER_CATEGORY * categories).min(MAX_CATEGORY_POINTS);
    if !input.company.trim().is_empty() {
        score += COMPANY_POINTS;
    }
    if !input.role.trim().is_empty() {
        score += ROLE_POINTS;
    }
    if input.jd_text.trim().chars().count() > LONG_JD_CHARS {
        score += LONG_JD_POINTS;
    }
    clamp_score(score)
}

/// `all_skills` is the per-category flattening: a skill listed under two
/// categories counts twice.
pub fn compute_live_score(
    base_score: u32,
    confidence: &BTreeMap<String, Confidence>,
    all_skills: &[String],
) -> u32 {
    let known = all_skills
        .iter()
        .filter(|skill| confidence.get(skill.as_str()).copied().unwrap_or_default() == Confidence::Know)
        .count() as i64;
    clamp_score(base_score as i64 + KNOW_POINTS * known)
}

/// First `limit` skills still at `Practice`, in skill order, without repeats.
pub fn weak_skills(
    confidence: &BTreeMap<String, Confidence>,
    all_skills: &[String],
    limit: usize,
) -> Vec<String> {
    let mut weak: Vec<String> = Vec::new();
    for skill in all_skills {
        if weak.len() >= limit {
            break;
        }
        let level = confidence.get(skill.as_str()).copied().unwrap_or_default();
        if level == Confidence::Practice && !weak.contains(skill) {
            weak.push(skill.clone());
        }
    }
    weak
}

/// Action summary shown alongside a stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSummary {
    pub live_score: u32,
    pub weak_skills: Vec<String>,
    pub next_step: String,
}

impl ReadinessSummary {
    pub fn compute(
        base_score: u32,
        confidence: &BTreeMap<String, Confidence>,
        all_skills: &[String],
    ) -> Self {
        ReadinessSummary {
            live_score: compute_live_score(base_score, confidence, all_skills),
            weak_skills: weak_skills(confidence, all_skills, WEAK_SKILL_LIMIT),
            next_step: NEXT_STEP_HINT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::SkillCategory;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn know(list: &[&str]) -> BTreeMap<String, Confidence> {
        list.iter()
            .map(|s| (s.to_string(), Confidence::Know))
            .collect()
    }

    #[test]
    fn test_base_score_empty_input() {
        let extracted = ExtractedSkills::empty();
        let score = compute_base_score(&ScoreInput {
            company: "  ",
            role: "",
            jd_text: "",
            extracted: &extracted,
        });
        assert_eq!(score, 35);
    }

    #[test]
    fn test_base_score_category_points_cap_at_thirty() {
        let extracted = ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::Languages, "Java"),
            (SkillCategory::Web, "React"),
            (SkillCategory::Data, "SQL"),
            (SkillCategory::CloudDevOps, "AWS"),
            (SkillCategory::Testing, "JUnit"),
            (SkillCategory::Other, "Communication"),
        ]);
        let long_jd = "x".repeat(801);
        let score = compute_base_score(&ScoreInput {
            company: "Acme",
            role: "SDE",
            jd_text: &long_jd,
            extracted: &extracted,
        });
        assert_eq!(score, 35 + 30 + 10 + 10 + 10);
    }

    #[test]
    fn test_long_jd_bonus_needs_more_than_800_trimmed_chars() {
        let extracted = ExtractedSkills::empty();
        let padded = format!("   {}   ", "x".repeat(800));
        let score = compute_base_score(&ScoreInput {
            company: "",
            role: "",
            jd_text: &padded,
            extracted: &extracted,
        });
        assert_eq!(score, 35);
    }

    #[test]
    fn test_live_score_adds_two_per_known_skill() {
        let skills = names(&["DSA", "Java", "SQL"]);
        assert_eq!(compute_live_score(70, &BTreeMap::new(), &skills), 70);
        assert_eq!(compute_live_score(70, &know(&["DSA", "SQL"]), &skills), 74);
    }

    #[test]
    fn test_live_score_counts_each_category_occurrence() {
        let skills = names(&["SQL", "SQL"]);
        assert_eq!(compute_live_score(50, &know(&["SQL"]), &skills), 54);
    }

    #[test]
    fn test_live_score_is_monotonic_and_bounded() {
        let skills: Vec<String> = (0..40).map(|i| format!("skill-{i}")).collect();
        let mut map = BTreeMap::new();
        let mut previous = compute_live_score(90, &map, &skills);
        for skill in &skills {
            map.insert(skill.clone(), Confidence::Know);
            let next = compute_live_score(90, &map, &skills);
            assert!(next >= previous);
            assert!(next <= 100);
            previous = next;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_live_score_is_idempotent() {
        let skills = names(&["DSA", "OOP"]);
        let map = know(&["OOP"]);
        assert_eq!(
            compute_live_score(60, &map, &skills),
            compute_live_score(60, &map, &skills)
        );
    }

    #[test]
    fn test_explicit_practice_counts_as_zero() {
        let skills = names(&["DSA"]);
        let mut map = BTreeMap::new();
        map.insert("DSA".to_string(), Confidence::Practice);
        assert_eq!(compute_live_score(40, &map, &skills), 40);
    }

    #[test]
    fn test_summary_lists_first_three_practice_skills() {
        let skills = names(&["DSA", "OOP", "Java", "SQL", "React"]);
        let summary = ReadinessSummary::compute(70, &know(&["OOP"]), &skills);
        assert_eq!(summary.live_score, 72);
        assert_eq!(summary.weak_skills, names(&["DSA", "Java", "SQL"]));
        assert_eq!(summary.next_step, "Start Day 1 plan now.");
    }

    #[test]
    fn test_confidence_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::Know).unwrap(), r#""know""#);
        let parsed: Confidence = serde_json::from_str(r#""practice""#).unwrap();
        assert_eq!(parsed, Confidence::Practice);
    }
}
