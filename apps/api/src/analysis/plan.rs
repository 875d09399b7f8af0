//! 7-day study plan, tailored with up to two detected skills per relevant category.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::CategoryKey;
use crate::analysis::checklist::{first_two, pick, Presence};
use crate::analysis::extractor::ExtractionResult;
use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDay {
    #[serde(deserialize_with = "lenient::or_default")]
    pub day: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub focus: String,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub items: Vec<String>,
}

fn day(number: u8, focus: &str, items: Vec<String>) -> PlanDay {
    PlanDay {
        day: format!("Day {number}"),
        focus: focus.to_string(),
        items,
    }
}

/// Builds the seven-day plan (`Day 1`..`Day 7`).
pub fn build_plan(extracted: &ExtractionResult) -> Vec<PlanDay> {
    let has = Presence::of(extracted);
    let skills = |key: CategoryKey| first_two(extracted.categories.get(key));

    vec![
        day(
            1,
            "Basics + Core CS",
            vec![
                pick(
                    has.languages,
                    format!("Review {} fundamentals and syntax.", skills(CategoryKey::Languages)),
                    "Review programming basics and one primary language syntax.",
                ),
                "Cover OS and DBMS fundamentals at overview level.".to_string(),
                pick(
                    has.data,
                    format!(
                        "Spend 60 minutes on {} fundamentals and queries.",
                        skills(CategoryKey::Data)
                    ),
                    "Attempt 2-3 mixed aptitude + basic coding questions.",
                ),
            ],
        ),
        day(
            2,
            "Basics + Core CS",
            vec![
                "Deepen understanding of DBMS, indexing, and transactions.".to_string(),
                "Revise networking and OS concepts often asked in interviews.".to_string(),
                pick(
                    has.cloud,
                    format!(
                        "Revise deployment basics for {}.",
                        skills(CategoryKey::CloudDevops)
                    ),
                    "Solve one timed aptitude set to simulate Round 1.",
                ),
            ],
        ),
        day(
            3,
            "DSA + coding practice",
            vec![
                pick(
                    has.dsa,
                    "Solve 4-6 medium DSA problems on arrays, strings, and hash maps.".to_string(),
                    "Solve 4-6 easy problems to build coding fluency.",
                ),
                "For each problem, write down your approach and complexity.".to_string(),
                "Revisit at least one previously solved problem without looking.".to_string(),
            ],
        ),
        day(
            4,
            "DSA + coding practice",
            vec![
                pick(
                    has.dsa,
                    "Focus on recursion, DP, and sorting-based problems.".to_string(),
                    "Attempt 2-3 new patterns (two pointers, sliding window).",
                ),
                "Practice explaining your solution out loud as if in an interview.".to_string(),
                "Do one timed coding round to improve speed and clarity.".to_string(),
            ],
        ),
        day(
            5,
            "Project + resume alignment",
            vec![
                pick(
                    has.web,
                    "Walk through your web project architecture, APIs, and state handling."
                        .to_string(),
                    "Prepare detailed explanation for one flagship project.",
                ),
                pick(
                    has.web,
                    format!("Revise {} topics from your projects.", skills(CategoryKey::Web)),
                    "Align your project description with the stack in the JD.",
                ),
                "Update resume bullets to reflect measurable outcomes.".to_string(),
                pick(
                    has.testing,
                    format!(
                        "Add test strategy notes for {}.",
                        skills(CategoryKey::Testing)
                    ),
                    "Add one testing and debugging example from your project.",
                ),
            ],
        ),
        day(
            6,
            "Mock interview questions",
            vec![
                "Run one mock DSA session and one project discussion session.".to_string(),
                "Record yourself answering 5-7 technical questions from this plan.".to_string(),
                "Note weak spots and create a final revision list.".to_string(),
            ],
        ),
        day(
            7,
            "Revision + weak areas",
            vec![
                "Revisit 3-5 concepts you found difficult during the week.".to_string(),
                pick(
                    has.data,
                    "Do a quick pass over SQL and data storage questions.".to_string(),
                    "Review key CS topics most relevant to this JD.",
                ),
                pick(
                    has.web,
                    "Do a final frontend/backend revision of component flow and API handling."
                        .to_string(),
                    "Revisit one coding round strategy for confidence.",
                ),
                "Sleep well and avoid heavy new topics on the final day.".to_string(),
            ],
        ),
    ]
}
