//! Plain-text renderings for copy-to-clipboard and the downloadable report.

use serde::Deserialize;

use crate::analysis::checklist::ChecklistRound;
use crate::analysis::plan::PlanDay;
use crate::models::history::HistoryEntry;

pub const REPORT_TITLE: &str = "Placement Readiness Report";
const UNKNOWN_COMPANY: &str = "Unknown company";
const UNKNOWN_ROLE: &str = "Role not specified";

/// Which artifact of an entry to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Checklist,
    Plan,
    Questions,
    Report,
}

fn bullet_block(heading: &str, items: &[String]) -> String {
    let mut block = heading.to_string();
    for item in items {
        block.push_str("\n- ");
        block.push_str(item);
    }
    block
}

/// `<Round>\n- item\n- item`, rounds separated by a blank line.
pub fn render_checklist_text(checklist: &[ChecklistRound]) -> String {
    checklist
        .iter()
        .map(|round| bullet_block(&round.round, &round.items))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `<Day> (<focus>)\n- item`, days separated by a blank line.
pub fn render_plan_text(plan: &[PlanDay]) -> String {
    plan.iter()
        .map(|day| bullet_block(&format!("{} ({})", day.day, day.focus), &day.items))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Numbered list, one question per line.
pub fn render_questions_text(questions: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(idx, question)| format!("{}. {question}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full report: header, key skills with confidence, checklist, plan and questions.
pub fn render_report(entry: &HistoryEntry) -> String {
    let company = non_empty_or(&entry.company, UNKNOWN_COMPANY);
    let role = non_empty_or(&entry.role, UNKNOWN_ROLE);

    let key_skills = entry
        .skills()
        .iter()
        .map(|skill| format!("- {skill}: {}", entry.confidence_of(skill).report_label()))
        .collect::<Vec<_>>()
        .join("\n");

    let sections = [
        REPORT_TITLE.to_string(),
        format!("Date: {}", entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Company: {company}"),
        format!("Role: {role}"),
        format!("Readiness Score: {}/100", entry.readiness_score),
        String::new(),
        "Key Skills".to_string(),
        key_skills,
        String::new(),
        "Round-wise Preparation Checklist".to_string(),
        render_checklist_text(&entry.checklist),
        String::new(),
        "7-day Plan".to_string(),
        render_plan_text(&entry.plan),
        String::new(),
        "10 Likely Interview Questions".to_string(),
        render_questions_text(&entry.questions),
    ];
    sections.join("\n")
}

/// Text for one export kind.
pub fn render(entry: &HistoryEntry, kind: ExportKind) -> String {
    match kind {
        ExportKind::Checklist => render_checklist_text(&entry.checklist),
        ExportKind::Plan => render_plan_text(&entry.plan),
        ExportKind::Questions => render_questions_text(&entry.questions),
        ExportKind::Report => render_report(entry),
    }
}

pub fn report_file_name(entry: &HistoryEntry) -> String {
    format!("placement-readiness-{}.txt", entry.id)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
