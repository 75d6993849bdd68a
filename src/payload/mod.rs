pub mod extractor;
pub mod fields;
pub mod parser;

pub use extractor::IssueBody;
