// Placement readiness analysis.
// Implements: skill extraction, readiness scoring, checklist / plan / question
// generation, live readiness and text export. No I/O here except in handlers.

pub mod catalog;
pub mod checklist;
pub mod export;
pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod plan;
pub mod questions;
pub mod readiness;
pub mod scoring;
