//! Raw listing parameters as they arrive from a caller.

use interview_core::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use interview_core::{PageRequest, Sort};

use crate::error::Result;

/// Unparsed listing parameters.
///
/// `sort_by` and `sort_dir` are kept as text so that an unknown field name
/// is reported as [`crate::InterviewError::InvalidSort`] by the service
/// rather than rejected by whatever deserialized the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_dir: String,
}

impl ListQuery {
    pub fn new(
        page_number: u32,
        page_size: u32,
        sort_by: impl Into<String>,
        sort_dir: impl Into<String>,
    ) -> Self {
        Self {
            page_number,
            page_size,
            sort_by: sort_by.into(),
            sort_dir: sort_dir.into(),
        }
    }

    /// Parse into a validated page request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSort` for an unknown `sort_by`, or a validation error
    /// when `page_size` is zero.
    pub fn to_page_request(&self) -> Result<PageRequest> {
        let sort = Sort::parse(&self.sort_by, &self.sort_dir)?;
        Ok(PageRequest::new(self.page_number, self.page_size, sort)?)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAGE_NUMBER,
            DEFAULT_PAGE_SIZE,
            DEFAULT_SORT_BY,
            DEFAULT_SORT_DIR,
        )
    }
}
