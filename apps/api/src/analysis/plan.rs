//! 7-day preparation plan, laid out as five day-blocks.

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{ExtractedSkills, SkillCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBlock {
    pub day: String,
    pub focus: String,
    pub tasks: Vec<String>,
}

struct DaySpec {
    day: &'static str,
    focus: &'static str,
    base: &'static [&'static str],
    bonus: fn(&ExtractedSkills) -> Vec<String>,
}

const DAYS: &[DaySpec] = &[
    DaySpec {
        day: "Day 1–2",
        focus: "Basics + core CS",
        base: &[
            "Revise CS fundamentals: OS, DBMS, networks.",
            "Brush up OOP and basic data structures.",
        ],
        bonus: basics_bonus,
    },
    DaySpec {
        day: "Day 3–4",
        focus: "DSA + coding practice",
        base: &[
            "Solve 8–10 DSA problems (mix easy/medium).",
            "Focus on arrays, strings, hashing, two pointers.",
            "Practice writing code on paper/whiteboard.",
        ],
        bonus: |e| {
            if e.contains(SkillCategory::CoreCS, "DSA") {
                vec!["Revise trees and graphs if time permits.".to_string()]
            } else {
                Vec::new()
            }
        },
    },
    DaySpec {
        day: "Day 5",
        focus: "Project + resume alignment",
        base: &[
            "Map your projects to JD requirements.",
            "Prepare 2–3 project stories with metrics.",
            "Update resume bullets to match JD keywords.",
        ],
        bonus: projects_bonus,
    },
    DaySpec {
        day: "Day 6",
        focus: "Mock interview questions",
        base: &[
            "Practice 5–10 mock technical questions aloud.",
            "Time yourself on problem-solving.",
        ],
        bonus: mock_bonus,
    },
    DaySpec {
        day: "Day 7",
        focus: "Revision + weak areas",
        base: &[
            "Revise weak areas identified in mocks.",
            "Quick pass over DSA patterns and core CS.",
            "Rest and stay calm before the interview.",
        ],
        bonus: |e| {
            if e.contains(SkillCategory::Web, "React") {
                vec!["Final pass: React lifecycle and state management.".to_string()]
            } else {
                Vec::new()
            }
        },
    },
];

fn basics_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let mut extra = Vec::new();
    let languages = extracted.skills_in(SkillCategory::Languages);
    if !languages.is_empty() {
        extra.push(format!("Review {} basics and syntax.", languages.join(", ")));
    }
    if extracted.contains(SkillCategory::CoreCS, "DSA") {
        extra.push("Start with arrays and strings in DSA.".to_string());
    }
    extra
}

fn projects_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let mut extra = Vec::new();
    if extracted.contains(SkillCategory::Web, "React") {
        extra.push("Revise React concepts: components, hooks, state management.".to_string());
    }
    let web = extracted.skills_in(SkillCategory::Web);
    if !web.is_empty() {
        extra.push(format!("Align web stack ({}) with projects.", web.join(", ")));
    }
    extra
}

fn mock_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let mut extra = Vec::new();
    if extracted.has_category(SkillCategory::Data) {
        extra.push("Practice SQL/DB questions if applicable.".to_string());
    }
    if extracted.has_category(SkillCategory::Testing) {
        extra.push("Revise testing concepts and frameworks.".to_string());
    }
    extra
}

/// Always five blocks, in fixed order. Task lists are not truncated.
pub fn build_plan(extracted: &ExtractedSkills) -> Vec<PlanBlock> {
    DAYS.iter()
        .map(|spec| PlanBlock {
            day: spec.day.to_string(),
            focus: spec.focus.to_string(),
            tasks: spec
                .base
                .iter()
                .map(|s| s.to_string())
                .chain((spec.bonus)(extracted))
                .collect(),
        })
        .collect()
}
