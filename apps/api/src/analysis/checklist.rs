//! Round-wise preparation checklist.
//!
//! Four fixed rounds. Each starts from its base items and appends
//! category-conditional bonus items; the result is capped per round.

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{ExtractedSkills, SkillCategory};

pub const MAX_ITEMS_PER_ROUND: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRound {
    pub id: String,
    pub name: String,
    pub items: Vec<String>,
}

struct RoundSpec {
    id: &'static str,
    name: &'static str,
    base: &'static [&'static str],
    bonus: fn(&ExtractedSkills) -> Vec<String>,
}

const ROUNDS: &[RoundSpec] = &[
    RoundSpec {
        id: "r1",
        name: "Round 1: Aptitude / Basics",
        base: &[
            "Revise quantitative aptitude: percentages, ratios, time-speed-distance.",
            "Practice logical reasoning and puzzles.",
            "Brush up verbal ability and reading comprehension.",
            "Time yourself on sample aptitude tests.",
        ],
        bonus: aptitude_bonus,
    },
    RoundSpec {
        id: "r2",
        name: "Round 2: DSA + Core CS",
        base: &[
            "Revise core data structures: arrays, linked lists, trees, graphs.",
            "Practice time/space complexity analysis.",
            "Solve 5–10 medium DSA problems from arrays and strings.",
            "Revise sorting and searching algorithms.",
        ],
        bonus: core_cs_bonus,
    },
    RoundSpec {
        id: "r3",
        name: "Round 3: Tech interview (projects + stack)",
        base: &[
            "Prepare 2–3 project stories with STAR format.",
            "Align resume points with JD keywords.",
            "Prepare “Tell me about yourself” and project deep-dives.",
        ],
        bonus: stack_bonus,
    },
    RoundSpec {
        id: "r4",
        name: "Round 4: Managerial / HR",
        base: &[
            "Prepare behavioral questions: conflict, failure, leadership.",
            "Research company values and recent news.",
            "Prepare questions to ask the interviewer.",
            "Practice salary and expectation discussion (if applicable).",
            "Review body language and communication clarity.",
            "Prepare for “Why this company?” and “Where do you see yourself?”.",
        ],
        bonus: |_| Vec::new(),
    },
];

fn aptitude_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let mut extra = Vec::new();
    if extracted.has_category(SkillCategory::CoreCS) {
        extra.push("Revise CS fundamentals: OS, DBMS, networks basics.".to_string());
    }
    if extracted.has_category(SkillCategory::Languages) {
        extra.push("Review syntax and basics of mentioned languages.".to_string());
    }
    extra
}

fn core_cs_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let core = extracted.skills_in(SkillCategory::CoreCS);
    if core.is_empty() {
        return Vec::new();
    }
    let mut extra = vec![format!("Prepare short answers on: {}.", core.join(", "))];
    if extracted.contains(SkillCategory::CoreCS, "OOP") {
        extra.push("Revise OOP concepts: encapsulation, inheritance, polymorphism.".to_string());
    }
    if extracted.contains(SkillCategory::CoreCS, "DBMS") {
        extra.push("Revise DBMS: normalization, ACID, transactions, indexing.".to_string());
    }
    extra
}

fn stack_bonus(extracted: &ExtractedSkills) -> Vec<String> {
    let mut extra = Vec::new();
    let web = extracted.skills_in(SkillCategory::Web);
    if !web.is_empty() {
        extra.push(format!("Revise {}: architecture and common patterns.", web.join(", ")));
    }
    let data = extracted.skills_in(SkillCategory::Data);
    if !data.is_empty() {
        extra.push(format!("Prepare for {}: queries and design.", data.join(", ")));
    }
    let cloud = extracted.skills_in(SkillCategory::CloudDevOps);
    if !cloud.is_empty() {
        extra.push(format!("Revise {} basics and your experience.", cloud.join(", ")));
    }
    let testing = extracted.skills_in(SkillCategory::Testing);
    if !testing.is_empty() {
        extra.push(format!("Prepare testing concepts: {}.", testing.join(", ")));
    }
    if extracted.has_category(SkillCategory::Languages) {
        extra.push("Review language-specific best practices and common pitfalls.".to_string());
    }
    extra
}

/// Builds the four-round checklist for the detected skills.
pub fn build_checklist(extracted: &ExtractedSkills) -> Vec<ChecklistRound> {
    ROUNDS
        .iter()
        .map(|round| {
            let items = round
                .base
                .iter()
                .map(|s| s.to_string())
                .chain((round.bonus)(extracted))
                .take(MAX_ITEMS_PER_ROUND)
                .collect();
            ChecklistRound {
                id: round.id.to_string(),
                name: round.name.to_string(),
                items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_rounds_with_base_items_when_nothing_detected() {
        let rounds = build_checklist(&ExtractedSkills::empty());
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[0].items.len(), 4);
        assert_eq!(rounds[1].items.len(), 4);
        assert_eq!(rounds[2].items.len(), 3);
        assert_eq!(rounds[3].items.len(), 6);
    }

    #[test]
    fn test_core_cs_bonuses_follow_base_items() {
        let rounds = build_checklist(&ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::CoreCS, "OOP"),
            (SkillCategory::CoreCS, "DBMS"),
        ]));
        let r2 = &rounds[1].items;
        assert_eq!(r2.len(), 7);
        assert_eq!(r2[4], "Prepare short answers on: DSA, OOP, DBMS.");
        assert!(r2[5].starts_with("Revise OOP concepts"));
        assert!(r2[6].starts_with("Revise DBMS"));
        assert_eq!(rounds[0].items[4], "Revise CS fundamentals: OS, DBMS, networks basics.");
    }

    #[test]
    fn test_stack_round_bonus_order_and_cap() {
        let all = ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::Languages, "Java"),
            (SkillCategory::Web, "React"),
            (SkillCategory::Data, "SQL"),
            (SkillCategory::CloudDevOps, "AWS"),
            (SkillCategory::Testing, "JUnit"),
        ]);
        let rounds = build_checklist(&all);
        let r3 = &rounds[2].items;
        assert_eq!(r3.len(), MAX_ITEMS_PER_ROUND);
        assert_eq!(r3[3], "Revise React: architecture and common patterns.");
        assert_eq!(r3[6], "Prepare testing concepts: JUnit.");
        assert_eq!(r3[7], "Review language-specific best practices and common pitfalls.");
        assert!(rounds.iter().all(|r| r.items.len() <= MAX_ITEMS_PER_ROUND));
    }
}
