pub mod history;
pub mod lenient;
