//! Company intel and interview-round mapping.
//!
//! Heuristic only: the company name is bucketed by size (known enterprise name
//! fragments, then corporate suffixes or long names, else startup) and by
//! industry (first matching keyword rule over name + JD head). The round flow
//! is then picked from static templates by size bucket and three skill flags.

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{ExtractedSkills, SkillCategory};

/// Only this many leading characters of the JD take part in industry matching.
const JD_INDUSTRY_WINDOW: usize = 500;

fn default_mid_size_name_length() -> usize {
    25
}

/// Company classification rules, loaded from the heuristics document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRules {
    pub enterprise_names: Vec<String>,
    pub mid_size_keywords: Vec<String>,
    /// Names longer than this (in characters) are treated as mid-size.
    #[serde(default = "default_mid_size_name_length")]
    pub mid_size_name_length: usize,
    pub industry_rules: Vec<IndustryRule>,
    pub default_industry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryRule {
    pub keywords: Vec<String>,
    pub industry: String,
}

impl CompanyRules {
    /// Lowercases every matching fragment so lookups can compare directly.
    pub fn normalized(mut self) -> Self {
        let lower = |v: &mut Vec<String>| {
            for s in v.iter_mut() {
                *s = s.trim().to_lowercase();
            }
            v.retain(|s| !s.is_empty());
        };
        lower(&mut self.enterprise_names);
        lower(&mut self.mid_size_keywords);
        for rule in &mut self.industry_rules {
            lower(&mut rule.keywords);
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Startup,
    #[serde(rename = "Mid-size")]
    MidSize,
    Enterprise,
}

impl SizeCategory {
    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Startup => "Startup (<200)",
            SizeCategory::MidSize => "Mid-size (200–2000)",
            SizeCategory::Enterprise => "Enterprise (2000+)",
        }
    }

    pub fn typical_hiring_focus(self) -> &'static str {
        match self {
            SizeCategory::Enterprise => "Structured process with emphasis on DSA, core CS fundamentals, system design, and behavioral rounds. High bar on consistency across many candidates.",
            SizeCategory::MidSize => "Mix of problem-solving, core fundamentals, and hands-on skills. Often 2–3 technical rounds plus culture fit.",
            SizeCategory::Startup => "Practical problem-solving and stack depth. Focus on what you can build, past projects, and culture fit. Fewer formal rounds.",
        }
    }
}

/// Heuristic company profile. Derived data; recomputed when missing on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntel {
    pub name: String,
    pub industry: String,
    pub size_category: SizeCategory,
    pub size_label: String,
    pub typical_hiring_focus: String,
}

/// Classifies `company_name`. Returns `None` for a blank name.
pub fn classify_company(
    company_name: &str,
    jd_text: &str,
    rules: &CompanyRules,
) -> Option<CompanyIntel> {
    let name = company_name.trim();
    if name.is_empty() {
        return None;
    }

    let lower = name.to_lowercase();
    let jd_head: String = jd_text
        .trim()
        .to_lowercase()
        .chars()
        .take(JD_INDUSTRY_WINDOW)
        .collect();
    let combined = format!("{lower} {jd_head}");

    let size_category = if rules.enterprise_names.iter().any(|c| lower.contains(c.as_str())) {
        SizeCategory::Enterprise
    } else if rules.mid_size_keywords.iter().any(|k| lower.contains(k.as_str()))
        || name.chars().count() > rules.mid_size_name_length
    {
        SizeCategory::MidSize
    } else {
        SizeCategory::Startup
    };

    let industry = rules
        .industry_rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| combined.contains(k.as_str())))
        .map(|rule| rule.industry.clone())
        .unwrap_or_else(|| rules.default_industry.clone());

    Some(CompanyIntel {
        name: name.to_string(),
        industry,
        size_category,
        size_label: size_category.label().to_string(),
        typical_hiring_focus: size_category.typical_hiring_focus().to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Round mapping
// ────────────────────────────────────────────────────────────────────────────

/// Static round template. Content depends only on the size bucket and skill flags.
#[derive(Debug, Clone, Copy)]
pub struct RoundTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub why_matters: &'static str,
    pub focus_areas: &'static [&'static str],
}

const ENTERPRISE_TECHNICAL: &[RoundTemplate] = &[
    RoundTemplate {
        id: "e1",
        name: "Round 1: Online Test (DSA + Aptitude)",
        why_matters: "Filters for baseline problem-solving and aptitude; often elimination round.",
        focus_areas: &["DSA", "Aptitude"],
    },
    RoundTemplate {
        id: "e2",
        name: "Round 2: Technical (DSA + Core CS)",
        why_matters: "Deep dive into data structures, algorithms, and CS fundamentals.",
        focus_areas: &["DSA", "Core CS"],
    },
    RoundTemplate {
        id: "e3",
        name: "Round 3: Tech + Projects",
        why_matters: "Evaluates real-world application and how you apply knowledge in projects.",
        focus_areas: &["Projects", "Tech stack"],
    },
    RoundTemplate {
        id: "e4",
        name: "Round 4: HR / Behavioral",
        why_matters: "Culture fit, motivation, and soft skills; final gate before offer.",
        focus_areas: &["Behavioral", "Communication"],
    },
];

const ENTERPRISE_GENERIC: &[RoundTemplate] = &[
    RoundTemplate {
        id: "e1",
        name: "Round 1: Aptitude / Screening",
        why_matters: "Initial filter for logical and verbal ability.",
        focus_areas: &["Aptitude", "Verbal ability"],
    },
    RoundTemplate {
        id: "e2",
        name: "Round 2: Technical Interview",
        why_matters: "Domain and technical depth relevant to the role.",
        focus_areas: &["Tech stack", "Role fundamentals"],
    },
    RoundTemplate {
        id: "e3",
        name: "Round 3: HR / Behavioral",
        why_matters: "Culture fit and alignment with company values.",
        focus_areas: &["Behavioral", "Company values"],
    },
];

const MID_SIZE: &[RoundTemplate] = &[
    RoundTemplate {
        id: "m1",
        name: "Round 1: Technical / Coding",
        why_matters: "Assesses coding ability and core skills early.",
        focus_areas: &["Coding", "Core fundamentals"],
    },
    RoundTemplate {
        id: "m2",
        name: "Round 2: System / Design Discussion",
        why_matters: "How you think about problems and trade-offs.",
        focus_areas: &["Design", "Trade-offs"],
    },
    RoundTemplate {
        id: "m3",
        name: "Round 3: Team / Culture Fit",
        why_matters: "Fit with the team and company way of working.",
        focus_areas: &["Culture fit", "Collaboration"],
    },
];

const STARTUP_WEB: &[RoundTemplate] = &[
    RoundTemplate {
        id: "s1",
        name: "Round 1: Practical Coding",
        why_matters: "Hands-on task or live coding to see how you build.",
        focus_areas: &["Live coding", "Building features"],
    },
    RoundTemplate {
        id: "s2",
        name: "Round 2: System / Stack Discussion",
        why_matters: "Depth in the stack they use (e.g. React, Node).",
        focus_areas: &["Web stack", "Architecture"],
    },
    RoundTemplate {
        id: "s3",
        name: "Round 3: Culture Fit",
        why_matters: "Motivation, ownership, and how you work in small teams.",
        focus_areas: &["Ownership", "Culture fit"],
    },
];

const STARTUP_CODING: &[RoundTemplate] = &[
    RoundTemplate {
        id: "s1",
        name: "Round 1: Coding Round",
        why_matters: "Problem-solving under time; often 1–2 problems.",
        focus_areas: &["DSA", "Timed problem-solving"],
    },
    RoundTemplate {
        id: "s2",
        name: "Round 2: Technical Depth",
        why_matters: "Follow-up on approach, complexity, and core concepts.",
        focus_areas: &["Complexity", "Core concepts"],
    },
    RoundTemplate {
        id: "s3",
        name: "Round 3: Projects & Fit",
        why_matters: "Projects and how you collaborate.",
        focus_areas: &["Projects", "Collaboration"],
    },
];

const STARTUP_GENERIC: &[RoundTemplate] = &[
    RoundTemplate {
        id: "s1",
        name: "Round 1: Technical Screening",
        why_matters: "Quick assessment of skills and fit for the role.",
        focus_areas: &["Role fundamentals"],
    },
    RoundTemplate {
        id: "s2",
        name: "Round 2: Deep Dive / Projects",
        why_matters: "Experience and how you apply it.",
        focus_areas: &["Projects", "Experience"],
    },
    RoundTemplate {
        id: "s3",
        name: "Round 3: Culture & Fit",
        why_matters: "Alignment with team and company.",
        focus_areas: &["Culture fit"],
    },
];

/// The three skill signals round selection looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSignals {
    pub has_dsa: bool,
    pub has_web: bool,
    pub has_core_cs: bool,
}

impl RoundSignals {
    pub fn from_extracted(extracted: &ExtractedSkills) -> Self {
        Self {
            has_dsa: extracted.contains(SkillCategory::CoreCS, "DSA"),
            has_web: extracted.has_category(SkillCategory::Web),
            has_core_cs: extracted.has_category(SkillCategory::CoreCS),
        }
    }
}

/// Picks the template list for a size bucket and signal set.
pub fn round_templates(size: SizeCategory, signals: RoundSignals) -> &'static [RoundTemplate] {
    match size {
        SizeCategory::Enterprise if signals.has_dsa || signals.has_core_cs => ENTERPRISE_TECHNICAL,
        SizeCategory::Enterprise => ENTERPRISE_GENERIC,
        SizeCategory::MidSize => MID_SIZE,
        SizeCategory::Startup if signals.has_web => STARTUP_WEB,
        SizeCategory::Startup if signals.has_dsa => STARTUP_CODING,
        SizeCategory::Startup => STARTUP_GENERIC,
    }
}

/// One expected interview round, in the shape the analysis record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    pub id: String,
    pub name: String,
    pub why_matters: String,
    pub focus_areas: Vec<String>,
}

impl From<&RoundTemplate> for InterviewRound {
    fn from(t: &RoundTemplate) -> Self {
        InterviewRound {
            id: t.id.to_string(),
            name: t.name.to_string(),
            why_matters: t.why_matters.to_string(),
            focus_areas: t.focus_areas.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Expected round flow. Missing intel is treated as a startup.
pub fn build_round_mapping(
    intel: Option<&CompanyIntel>,
    extracted: &ExtractedSkills,
) -> Vec<InterviewRound> {
    let size = intel
        .map(|i| i.size_category)
        .unwrap_or(SizeCategory::Startup);
    round_templates(size, RoundSignals::from_extracted(extracted))
        .iter()
        .map(InterviewRound::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::heuristics::Heuristics;

    fn rules() -> CompanyRules {
        Heuristics::builtin().unwrap().company
    }

    fn intel(size: SizeCategory) -> CompanyIntel {
        CompanyIntel {
            name: "x".to_string(),
            industry: "y".to_string(),
            size_category: size,
            size_label: size.label().to_string(),
            typical_hiring_focus: size.typical_hiring_focus().to_string(),
        }
    }

    #[test]
    fn test_blank_name_has_no_intel() {
        assert!(classify_company("   ", "anything", &rules()).is_none());
        assert!(classify_company("", "", &rules()).is_none());
    }

    #[test]
    fn test_known_enterprise() {
        let i = classify_company("TCS", "", &rules()).unwrap();
        assert_eq!(i.size_category, SizeCategory::Enterprise);
        assert_eq!(i.size_label, "Enterprise (2000+)");
        assert_eq!(i.industry, "Technology Services");
    }

    #[test]
    fn test_enterprise_beats_suffix() {
        let i = classify_company("Infosys Limited", "", &rules()).unwrap();
        assert_eq!(i.size_category, SizeCategory::Enterprise);
    }

    #[test]
    fn test_corporate_suffix_is_mid_size() {
        let i = classify_company("Acme Widgets Pvt Ltd", "", &rules()).unwrap();
        assert_eq!(i.size_category, SizeCategory::MidSize);
    }

    #[test]
    fn test_long_name_is_mid_size() {
        let i = classify_company("Quantum Leap Robotics Works", "", &rules()).unwrap();
        assert!(i.name.chars().count() > 25);
        assert_eq!(i.size_category, SizeCategory::MidSize);
    }

    #[test]
    fn test_short_unknown_is_startup() {
        let i = classify_company("  Zeptolabs ", "", &rules()).unwrap();
        assert_eq!(i.name, "Zeptolabs");
        assert_eq!(i.size_category, SizeCategory::Startup);
        assert_eq!(i.typical_hiring_focus, SizeCategory::Startup.typical_hiring_focus());
    }

    #[test]
    fn test_industry_from_jd_head() {
        let i = classify_company("Zeptolabs", "We build software for a retail bank.", &rules()).unwrap();
        // "bank" rule precedes "retail" in table order
        assert_eq!(i.industry, "Financial Services");
    }

    #[test]
    fn test_industry_ignores_text_beyond_window() {
        let jd = format!("{}insurance", "x".repeat(600));
        let i = classify_company("Zeptolabs", &jd, &rules()).unwrap();
        assert_eq!(i.industry, "Technology Services");
    }

    #[test]
    fn test_enterprise_with_core_cs_has_four_rounds() {
        let s = ExtractedSkills::from_pairs(&[(SkillCategory::CoreCS, "OOP")]);
        let rounds = build_round_mapping(Some(&intel(SizeCategory::Enterprise)), &s);
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[0].id, "e1");
        assert_eq!(rounds[3].name, "Round 4: HR / Behavioral");
    }

    #[test]
    fn test_enterprise_without_core_cs_has_three_rounds() {
        let s = ExtractedSkills::from_pairs(&[(SkillCategory::Web, "React")]);
        let rounds = build_round_mapping(Some(&intel(SizeCategory::Enterprise)), &s);
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].name, "Round 1: Aptitude / Screening");
    }

    #[test]
    fn test_mid_size_ignores_skills() {
        let mid = intel(SizeCategory::MidSize);
        let a = build_round_mapping(Some(&mid), &ExtractedSkills::empty());
        let b = build_round_mapping(
            Some(&mid),
            &ExtractedSkills::from_pairs(&[
                (SkillCategory::CoreCS, "DSA"),
                (SkillCategory::Web, "React"),
            ]),
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a[0].id, "m1");
    }

    #[test]
    fn test_startup_web_takes_priority_over_dsa() {
        let s = ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::Web, "React"),
        ]);
        let rounds = build_round_mapping(Some(&intel(SizeCategory::Startup)), &s);
        assert_eq!(rounds[0].name, "Round 1: Practical Coding");
    }

    #[test]
    fn test_startup_dsa_gets_coding_rounds() {
        let s = ExtractedSkills::from_pairs(&[(SkillCategory::CoreCS, "DSA")]);
        let rounds = build_round_mapping(None, &s);
        assert_eq!(rounds[0].name, "Round 1: Coding Round");
    }

    #[test]
    fn test_startup_generic_when_no_signals() {
        let rounds = build_round_mapping(None, &ExtractedSkills::empty());
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].name, "Round 1: Technical Screening");
        assert!(!rounds[0].focus_areas.is_empty());
    }

    #[test]
    fn test_size_category_serde_uses_hyphenated_mid_size() {
        assert_eq!(
            serde_json::to_string(&SizeCategory::MidSize).unwrap(),
            r#""Mid-size""#
        );
    }
}
