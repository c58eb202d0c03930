pub mod interview;

pub use interview::{InterviewRepository, SqliteInterviewRepository};
