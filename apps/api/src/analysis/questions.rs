//! Likely interview questions: one per detected skill, topped up from a generic pool.

use crate::analysis::extractor::ExtractionResult;

pub const MAX_QUESTIONS: usize = 10;

/// Seed question used when no detected skill has a question of its own.
pub const GENERAL_FRESHER_QUESTION: &str =
    "For a general fresher stack, how would you prioritize DSA, Core CS, and one project?";

/// Generic questions appended, in order, until the list is full.
pub const FALLBACK_QUESTIONS: [&str; 10] = [
    "How would you explain one project architecture decision and its trade-offs?",
    "Which part of your resume best matches this role, and why?",
    "Describe a bug you diagnosed systematically from symptom to fix.",
    "How do you break down an unknown coding problem in an interview?",
    "What changes would you make first after receiving code review feedback?",
    "How would you balance correctness and speed in a timed coding round?",
    "How would you prioritize features if given one week to improve your project?",
    "How do you justify one trade-off you made between simplicity and scalability?",
    "Which module in your project is most error-prone and how would you harden it?",
    "How would you validate your final solution before saying it is production-ready?",
];

/// The skill-specific question for a catalog skill, if one exists.
pub fn skill_question(skill: &str) -> Option<&'static str> {
    let question = match skill {
        "DSA" => "How would you optimize search in sorted data and why?",
        "OOP" => "How would you apply SOLID principles in a real feature implementation?",
        "DBMS" => "How would you design tables for consistency and query performance in DBMS?",
        "OS" => "What happens during a context switch and when does it impact performance?",
        "Networks" => {
            "How does TCP differ from UDP, and where would you choose each in applications?"
        }
        "Java" => "What is the difference between JVM, JRE, and JDK in Java development?",
        "Python" => {
            "When would you choose list comprehension vs generator expressions in Python?"
        }
        "JavaScript" => "How do closures work in JavaScript, and where can they cause bugs?",
        "TypeScript" => {
            "How do union types and generics improve reliability in a TypeScript codebase?"
        }
        "C" => "How do pointers and memory allocation choices affect C program safety?",
        "C++" => "When would you use smart pointers in C++, and which type would you choose?",
        "C#" => "How does async/await work in C#, and what are common pitfalls?",
        "Go" => "How do goroutines and channels help with concurrency in Go services?",
        "React" => "Explain state management options in React and when to choose each.",
        "Next.js" => "When should you use SSR, SSG, or ISR in a Next.js application?",
        "Node.js" => "How does the Node.js event loop handle concurrency for I/O-heavy APIs?",
        "Express" => {
            "How would you structure middleware in Express for auth, validation, and errors?"
        }
        "REST" => "How do you design versioned REST APIs without breaking existing clients?",
        "GraphQL" => "What are GraphQL N+1 query issues, and how would you prevent them?",
        "SQL" => "Explain indexing in SQL and when it helps or hurts performance.",
        "MongoDB" => "When would you embed vs reference documents in MongoDB schema design?",
        "PostgreSQL" => "How would you use Postgres transactions and constraints for data integrity?",
        "MySQL" => "How would you tune a slow MySQL query using EXPLAIN output?",
        "Redis" => {
            "Which Redis data structures would you use for caching, rate limiting, and queues?"
        }
        "AWS" => "Which AWS services would you combine to deploy and monitor a web app?",
        "Azure" => "How would you design a basic Azure deployment pipeline for a web service?",
        "GCP" => "How would you deploy and observe an app on GCP for production readiness?",
        "Docker" => "How would you write a production-ready Dockerfile for a Node or Python app?",
        "Kubernetes" => "How do Pods, Deployments, and Services work together in Kubernetes?",
        "CI/CD" => {
            "How would you design a CI/CD pipeline with tests, linting, and safe deployment?"
        }
        "Linux" => "Which Linux commands do you use most for debugging app and server issues?",
        "Selenium" => "How would you make Selenium UI tests stable in dynamic web pages?",
        "Cypress" => "What kinds of tests fit Cypress best, and how do you keep them deterministic?",
        "Playwright" => "How do Playwright fixtures improve end-to-end test maintainability?",
        "JUnit" => {
            "How do you structure JUnit test classes for readable and maintainable test suites?"
        }
        "PyTest" => "How do fixtures and parametrization in PyTest reduce duplicate test code?",
        _ => return None,
    };
    Some(question)
}

fn push_unique(questions: &mut Vec<String>, question: &str) {
    if !questions.iter().any(|q| q == question) {
        questions.push(question.to_string());
    }
}

/// Builds at most ten distinct questions.
///
/// Skill questions come first (category-then-skill order). With none, the list is
/// seeded with the general fresher question. Fallback questions fill the rest.
pub fn build_questions(extracted: &ExtractionResult) -> Vec<String> {
    let mut questions = Vec::with_capacity(MAX_QUESTIONS);

    for skill in extracted.categories.flatten() {
        if let Some(question) = skill_question(skill) {
            push_unique(&mut questions, question);
        }
    }

    if questions.is_empty() {
        questions.push(GENERAL_FRESHER_QUESTION.to_string());
    }

    for fallback in FALLBACK_QUESTIONS {
        if questions.len() >= MAX_QUESTIONS {
            break;
        }
        push_unique(&mut questions, fallback);
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}
