pub mod format;
pub mod prompt;
