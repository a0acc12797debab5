//! Likely interview questions, picked from skill-triggered templates with a
//! generic fallback list to fill any remaining slots.

use crate::analysis::skills::SkillCategory::{CloudDevOps, CoreCS, Data, Languages, Testing, Web};
use crate::analysis::skills::{ExtractedSkills, SkillCategory};

pub const QUESTION_COUNT: usize = 10;

/// A question fires when any of its trigger skills was detected in its category.
#[derive(Debug, Clone, Copy)]
pub struct QuestionTemplate {
    pub category: SkillCategory,
    pub triggers: &'static [&'static str],
    pub question: &'static str,
}

const fn q(
    category: SkillCategory,
    triggers: &'static [&'static str],
    question: &'static str,
) -> QuestionTemplate {
    QuestionTemplate {
        category,
        triggers,
        question,
    }
}

/// Grouped by category, in category order.
pub const QUESTION_TEMPLATES: &[QuestionTemplate] = &[
    q(CoreCS, &["DSA"], "How would you optimize search in sorted data? Explain time complexity."),
    q(CoreCS, &["OOP"], "Explain inheritance vs composition. When would you use each?"),
    q(CoreCS, &["DBMS"], "Explain indexing and when it helps. What are trade-offs?"),
    q(CoreCS, &["OS"], "Explain process vs thread. How does the OS schedule them?"),
    q(CoreCS, &["Networks"], "Explain HTTP vs HTTPS. What is TLS handshake?"),
    q(Languages, &["Java"], "Explain JVM memory model and garbage collection in brief."),
    q(Languages, &["Python"], "Explain Python GIL. How does it affect multithreading?"),
    q(Languages, &["JavaScript"], "Explain event loop and async behavior in JavaScript."),
    q(Languages, &["TypeScript"], "What benefits does TypeScript add over JavaScript?"),
    q(Languages, &["C++"], "Explain smart pointers and memory management in C++."),
    q(Languages, &["Go"], "How does Go handle concurrency? Explain goroutines and channels."),
    q(Web, &["React"], "Explain state management options in React (useState, Context, Redux)."),
    q(Web, &["Next.js"], "Explain SSR vs SSG in Next.js. When to use which?"),
    q(Web, &["Node.js"], "Explain event-driven architecture in Node.js."),
    q(Web, &["Express"], "How would you structure middleware for auth and logging?"),
    q(Web, &["REST"], "Explain REST principles. Idempotency and safe methods."),
    q(Web, &["GraphQL"], "When would you choose GraphQL over REST?"),
    q(Data, &["SQL"], "Explain indexing and when it helps. Write a query using JOIN and index."),
    q(Data, &["MongoDB"], "When would you use MongoDB over a relational DB?"),
    q(Data, &["Redis"], "What is Redis used for? Caching vs session store."),
    q(CloudDevOps, &["AWS"], "Explain one AWS service you have used and its use case."),
    q(CloudDevOps, &["Docker"], "Explain Docker image vs container. Why use containers?"),
    q(CloudDevOps, &["Kubernetes"], "What problem does Kubernetes solve? Pod vs Deployment."),
    q(CloudDevOps, &["CI/CD"], "Explain your understanding of CI/CD pipeline."),
    q(Testing, &["Selenium"], "How would you handle flaky tests in Selenium?"),
    q(Testing, &["JUnit"], "Explain unit testing best practices and mocking."),
    q(Testing, &["PyTest"], "How do you structure tests and fixtures in PyTest?"),
];

/// Ten entries, so an empty extraction still yields a full question set.
pub const FALLBACK_QUESTIONS: &[&str] = &[
    "Tell me about yourself and your relevant projects.",
    "What is your approach to solving a new coding problem?",
    "Describe a challenging bug you fixed and how you debugged it.",
    "How do you stay updated with technology?",
    "Where do you see yourself in 2–3 years?",
    "Explain a project from your resume in detail.",
    "What is your greatest strength and weakness?",
    "How do you handle disagreement in a team?",
    "Why do you want to join this company?",
    "Do you have any questions for us?",
];

/// Collects up to `count` distinct questions: triggered templates first (in
/// category order, then table order), then fallbacks in list order.
pub fn pick_questions(extracted: &ExtractedSkills, count: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(count);

    for (category, skills) in &extracted.categories {
        for template in QUESTION_TEMPLATES.iter().filter(|t| t.category == *category) {
            if out.len() >= count {
                return out;
            }
            let fired = template.triggers.iter().any(|t| skills.iter().any(|s| s == t));
            if fired && !out.iter().any(|q| q == template.question) {
                out.push(template.question.to_string());
            }
        }
    }

    for fallback in FALLBACK_QUESTIONS {
        if out.len() >= count {
            break;
        }
        if !out.iter().any(|q| q == fallback) {
            out.push(fallback.to_string());
        }
    }
    out
}

pub fn build_questions(extracted: &ExtractedSkills) -> Vec<String> {
    pick_questions(extracted, QUESTION_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_list_has_enough_entries() {
        assert!(FALLBACK_QUESTIONS.len() >= QUESTION_COUNT);
    }

    #[test]
    fn test_nothing_detected_uses_fallbacks_in_order() {
        let questions = build_questions(&ExtractedSkills::empty());
        assert_eq!(questions, FALLBACK_QUESTIONS);
    }

    #[test]
    fn test_triggered_questions_come_first_in_category_order() {
        let questions = build_questions(&ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "OOP"),
            (SkillCategory::Web, "React"),
        ]));
        assert_eq!(questions.len(), QUESTION_COUNT);
        assert_eq!(
            questions[0],
            "Explain inheritance vs composition. When would you use each?"
        );
        assert_eq!(
            questions[1],
            "Explain state management options in React (useState, Context, Redux)."
        );
        assert_eq!(questions[2], FALLBACK_QUESTIONS[0]);
    }

    #[test]
    fn test_join_question_needs_plain_sql() {
        let mysql_only = build_questions(&ExtractedSkills::from_pairs(&[
            (SkillCategory::Data, "MySQL"),
            (SkillCategory::Data, "PostgreSQL"),
        ]));
        assert!(mysql_only.iter().all(|q| !q.contains("JOIN")));

        let with_sql = build_questions(&ExtractedSkills::from_pairs(&[
            (SkillCategory::Data, "SQL"),
            (SkillCategory::Data, "MySQL"),
        ]));
        assert_eq!(with_sql.iter().filter(|q| q.contains("JOIN")).count(), 1);
    }

    #[test]
    fn test_caps_at_ten_templates() {
        let questions = build_questions(&ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::CoreCS, "OOP"),
            (SkillCategory::CoreCS, "DBMS"),
            (SkillCategory::CoreCS, "OS"),
            (SkillCategory::CoreCS, "Networks"),
            (SkillCategory::Languages, "Java"),
            (SkillCategory::Languages, "Python"),
            (SkillCategory::Languages, "JavaScript"),
            (SkillCategory::Languages, "TypeScript"),
            (SkillCategory::Languages, "C++"),
            (SkillCategory::Languages, "Go"),
        ]));
        assert_eq!(questions.len(), QUESTION_COUNT);
        assert!(questions.iter().all(|q| !FALLBACK_QUESTIONS.contains(&q.as_str())));
        assert_eq!(
            questions[9],
            "Explain smart pointers and memory management in C++."
        );
    }

    #[test]
    fn test_questions_are_distinct() {
        let questions = build_questions(&ExtractedSkills::from_pairs(&[
            (SkillCategory::CoreCS, "DSA"),
            (SkillCategory::Data, "SQL"),
        ]));
        let mut sorted = questions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), questions.len());
    }
}
