pub mod interview;

pub use interview::{InterviewRecord, NewInterview};
