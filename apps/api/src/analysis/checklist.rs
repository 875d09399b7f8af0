//! Round-wise preparation checklist: four fixed interview rounds, five items each.
//!
//! Each item is either a generic line or a line tailored to a detected category.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::CategoryKey;
use crate::analysis::extractor::ExtractionResult;
use crate::models::lenient;

pub const ROUND_APTITUDE: &str = "Round 1: Aptitude / Basics";
pub const ROUND_DSA_CORE: &str = "Round 2: DSA + Core CS";
pub const ROUND_TECH: &str = "Round 3: Tech interview (projects + stack)";
pub const ROUND_HR: &str = "Round 4: Managerial / HR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistRound {
    #[serde(deserialize_with = "lenient::or_default")]
    pub round: String,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub items: Vec<String>,
}

/// Category presence flags that drive template selection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Presence {
    pub core: bool,
    pub dsa: bool,
    pub languages: bool,
    pub web: bool,
    pub data: bool,
    pub cloud: bool,
    pub testing: bool,
}

impl Presence {
    pub fn of(extracted: &ExtractionResult) -> Self {
        Self {
            core: extracted.has_category(CategoryKey::CoreCs),
            dsa: extracted.has_skill(CategoryKey::CoreCs, "DSA"),
            languages: extracted.has_category(CategoryKey::Languages),
            web: extracted.has_category(CategoryKey::Web),
            data: extracted.has_category(CategoryKey::Data),
            cloud: extracted.has_category(CategoryKey::CloudDevops),
            testing: extracted.has_category(CategoryKey::Testing),
        }
    }
}

/// Joins up to the first two skills with " / ".
pub(crate) fn first_two(skills: &[String]) -> String {
    skills
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" / ")
}

/// The tailored line when `flag` is set, the generic one otherwise.
pub(crate) fn pick(flag: bool, tailored: impl Into<String>, generic: &str) -> String {
    if flag {
        tailored.into()
    } else {
        generic.to_string()
    }
}

fn round(name: &str, items: Vec<String>) -> ChecklistRound {
    ChecklistRound {
        round: name.to_string(),
        items,
    }
}

/// Builds the four-round checklist for an extraction result.
pub fn build_checklist(extracted: &ExtractionResult) -> Vec<ChecklistRound> {
    let has = Presence::of(extracted);
    let languages = first_two(extracted.categories.get(CategoryKey::Languages));

    vec![
        round(
            ROUND_APTITUDE,
            vec![
                "Revise quantitative aptitude (time & work, percentages, probability).".to_string(),
                pick(
                    has.languages,
                    format!("Brush up {languages} syntax and basics."),
                    "Brush up one primary language syntax and problem-solving basics.",
                ),
                pick(
                    has.core,
                    "Review core CS basics highlighted in the JD.",
                    "Cover high-level basics of DBMS, OS, and networking.",
                ),
                "Prepare a concise self-introduction aligned with the role.".to_string(),
                "Practice 2-3 short online assessments in exam-like timing.".to_string(),
            ],
        ),
        round(
            ROUND_DSA_CORE,
            vec![
                pick(
                    has.dsa,
                    "Solve problems on arrays, strings, hash maps, and recursion.",
                    "Practice at least 10 easy-medium coding problems.",
                ),
                pick(
                    has.dsa,
                    "Revise common patterns: sliding window, two pointers, DP basics.",
                    "Revisit Big-O complexity and data structure trade-offs.",
                ),
                pick(
                    has.core,
                    "Review OS, DBMS, and networking topics emphasized in the JD.",
                    "Cover basic OS, DBMS, and networking interview topics.",
                ),
                pick(
                    has.data,
                    "Prepare explanations for SQL joins, indexing, and transactions.",
                    "Review basic SQL queries: SELECT, JOIN, GROUP BY, ORDER BY.",
                ),
                pick(
                    has.cloud,
                    "Map one backend problem to a cloud deployment approach.",
                    "Be ready to walk through your code and explain design decisions.",
                ),
            ],
        ),
        round(
            ROUND_TECH,
            vec![
                "Shortlist 2-3 projects you can explain confidently end-to-end.".to_string(),
                pick(
                    has.web,
                    "Revise stack topics from the JD: components, APIs, and state/data flow.",
                    "Rehearse how your projects use the stack mentioned in the JD.",
                ),
                pick(
                    has.cloud,
                    "Review how you would deploy apps on AWS/Azure/GCP and basic services.",
                    "Think about how you would deploy your project to production.",
                ),
                pick(
                    has.testing,
                    "Prepare how you would write and run automated tests for your code.",
                    "Be ready to discuss how you test and debug your code.",
                ),
                pick(
                    has.data,
                    "Prepare schema and query optimization decisions from your project.",
                    "Prepare one performance optimization from a project.",
                ),
            ],
        ),
        round(
            ROUND_HR,
            vec![
                "Prepare examples for teamwork, conflict resolution, and ownership.".to_string(),
                "Clarify your preferences: role fit, location, and stack.".to_string(),
                "Align your strengths and learning goals with the company's work.".to_string(),
                "Prepare 3-4 thoughtful questions to ask the interviewer.".to_string(),
                "Review your resume line-by-line so there are no surprises.".to_string(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::extract_skills;

    #[test]
    fn test_always_four_rounds_of_five() {
        for text in [
            "",
            "Java",
            "React, Node.js, SQL, AWS, Docker, Selenium, DSA, OS, Python, C++",
            "lorem ipsum dolor sit amet",
        ] {
            let checklist = build_checklist(&extract_skills(text));
            assert_eq!(checklist.len(), 4);
            for round in &checklist {
                assert_eq!(round.items.len(), 5, "round {} in {text:?}", round.round);
            }
        }
    }

    #[test]
    fn test_round_names_are_fixed() {
        let names: Vec<String> = build_checklist(&extract_skills(""))
            .into_iter()
            .map(|r| r.round)
            .collect();
        assert_eq!(names, vec![ROUND_APTITUDE, ROUND_DSA_CORE, ROUND_TECH, ROUND_HR]);
    }

    #[test]
    fn test_language_item_interpolates_first_two_languages() {
        let checklist = build_checklist(&extract_skills("Java, Python and Go developers"));
        assert_eq!(checklist[0].items[1], "Brush up Java / Python syntax and basics.");
    }

    #[test]
    fn test_single_language_has_no_separator() {
        let checklist = build_checklist(&extract_skills("Python scripting"));
        assert_eq!(checklist[0].items[1], "Brush up Python syntax and basics.");
    }

    #[test]
    fn test_generic_items_without_matches() {
        let checklist = build_checklist(&extract_skills(""));
        assert_eq!(
            checklist[0].items[1],
            "Brush up one primary language syntax and problem-solving basics."
        );
        assert_eq!(
            checklist[1].items[0],
            "Practice at least 10 easy-medium coding problems."
        );
        assert_eq!(
            checklist[2].items[3],
            "Be ready to discuss how you test and debug your code."
        );
    }

    #[test]
    fn test_dsa_flag_requires_dsa_skill_not_just_core() {
        // OOP makes coreCs present without DSA
        let checklist = build_checklist(&extract_skills("object oriented programming"));
        assert_eq!(
            checklist[1].items[0],
            "Practice at least 10 easy-medium coding problems."
        );
        assert_eq!(
            checklist[1].items[2],
            "Review OS, DBMS, and networking topics emphasized in the JD."
        );
    }

    #[test]
    fn test_tailored_items_with_matches() {
        let checklist =
            build_checklist(&extract_skills("DSA, React, MongoDB, Azure and Cypress"));
        assert_eq!(
            checklist[1].items[0],
            "Solve problems on arrays, strings, hash maps, and recursion."
        );
        assert_eq!(
            checklist[1].items[3],
            "Prepare explanations for SQL joins, indexing, and transactions."
        );
        assert_eq!(
            checklist[2].items[1],
            "Revise stack topics from the JD: components, APIs, and state/data flow."
        );
        assert_eq!(
            checklist[2].items[2],
            "Review how you would deploy apps on AWS/Azure/GCP and basic services."
        );
        assert_eq!(
            checklist[2].items[3],
            "Prepare how you would write and run automated tests for your code."
        );
    }

    #[test]
    fn test_first_two_helper() {
        let skills = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(first_two(&skills), "A / B");
        assert_eq!(first_two(&[]), "");
    }

    #[test]
    fn test_pick_helper() {
        assert_eq!(pick(true, format!("Brush up {}", "Go"), "generic"), "Brush up Go");
        assert_eq!(pick(false, "tailored", "generic"), "generic");
    }
}
