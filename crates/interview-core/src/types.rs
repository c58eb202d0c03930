use crate::{
    Result,
    constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE},
    error::Error,
    validation::{ValidationErrors, Violation},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column a listing can be ordered by.
///
/// Only these fields are sortable; parsing any other name fails with
/// [`Error::InvalidSort`], which keeps arbitrary caller input out of the
/// `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    OwnerName,
    OwnerEmail,
    Title,
    Content,
    CompanyTag,
    AttachmentRef,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// All sortable fields, in declaration order.
    pub const ALL: [SortField; 9] = [
        SortField::Id,
        SortField::OwnerName,
        SortField::OwnerEmail,
        SortField::Title,
        SortField::Content,
        SortField::CompanyTag,
        SortField::AttachmentRef,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Public (camelCase) name of the field as it appears in the API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::OwnerName => "ownerName",
            SortField::OwnerEmail => "ownerEmail",
            SortField::Title => "title",
            SortField::Content => "content",
            SortField::CompanyTag => "companyTag",
            SortField::AttachmentRef => "attachmentRef",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }

    /// Database column backing the field.
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::OwnerName => "owner_name",
            SortField::OwnerEmail => "owner_email",
            SortField::Title => "title",
            SortField::Content => "content",
            SortField::CompanyTag => "company_tag",
            SortField::AttachmentRef => "attachment_ref",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = Error;

    /// Accepts both the camelCase API name and the snake_case column name.
    /// `imageName` is kept as an alias of `attachmentRef`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name == "imageName" {
            return Ok(SortField::AttachmentRef);
        }
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == name || field.column() == name)
            .ok_or_else(|| Error::InvalidSort(s.to_string()))
    }
}

/// Ordering direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Interpret a caller-supplied direction.
    ///
    /// `asc` in any letter case selects ascending order; every other value
    /// selects descending order.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// SQL keyword for the direction.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort order for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a sort order from raw query parameters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSort`] if `field` is not a sortable field.
    pub fn parse(field: &str, direction: &str) -> Result<Self> {
        Ok(Self::new(field.parse()?, SortDirection::from_param(direction)))
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortField::UpdatedAt, SortDirection::Asc)
    }
}

/// A validated request for one page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `page_size` is zero.
    pub fn new(page_number: u32, page_size: u32, sort: Sort) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::Validation(ValidationErrors::from(vec![
                Violation::new("pageSize", "Page size must be at least 1"),
            ])));
        }
        Ok(Self {
            page_number,
            page_size,
            sort,
        })
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of rows to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

/// Page envelope: a bounded slice of records plus pagination metadata.
///
/// # Examples
///
/// ```
/// use interview_core::{Page, PageRequest, Sort};
///
/// let request = PageRequest::new(2, 10, Sort::default()).unwrap();
/// let page = Page::new(vec![1, 2, 3, 4, 5], &request, 25);
///
/// assert_eq!(page.total_pages, 3);
/// assert!(page.last_page);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last_page: bool,
}

impl<T> Page<T> {
    /// Build the envelope for `content` fetched with `request` out of
    /// `total_elements` rows.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_pages(total_elements, request.page_size);
        let last_page =
            total_elements == 0 || u64::from(request.page_number) + 1 >= u64::from(total_pages);

        Self {
            content,
            page_number: request.page_number,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last_page,
        }
    }

    /// Convert the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last_page: self.last_page,
        }
    }
}

/// Number of pages needed to hold `total_elements` rows, `page_size` at a time.
#[must_use]
pub fn total_pages(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("updatedAt", SortField::UpdatedAt)]
    #[case("updated_at", SortField::UpdatedAt)]
    #[case("createdAt", SortField::CreatedAt)]
    #[case("title", SortField::Title)]
    #[case("companyTag", SortField::CompanyTag)]
    #[case(" ownerEmail ", SortField::OwnerEmail)]
    #[case("content", SortField::Content)]
    #[case("attachmentRef", SortField::AttachmentRef)]
    #[case("attachment_ref", SortField::AttachmentRef)]
    #[case("imageName", SortField::AttachmentRef)]
    fn test_sort_field_valid(#[case] input: &str, #[case] expected: SortField) {
        let field: SortField = input.parse().unwrap();
        assert_eq!(field, expected);
    }

    #[rstest]
    #[case("password")]
    #[case("updated_at; DROP TABLE interview_experiences")]
    #[case("")]
    #[case("UPDATEDAT")]
    fn test_sort_field_invalid(#[case] input: &str) {
        let result: Result<SortField> = input.parse();
        assert_eq!(result, Err(Error::InvalidSort(input.to_string())));
    }

    #[test]
    fn test_every_field_round_trips_through_its_name() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
            assert_eq!(field.column().parse::<SortField>().unwrap(), field);
        }
    }

    #[rstest]
    #[case("asc", SortDirection::Asc)]
    #[case("ASC", SortDirection::Asc)]
    #[case("Asc", SortDirection::Asc)]
    #[case("desc", SortDirection::Desc)]
    #[case("DESC", SortDirection::Desc)]
    #[case("sideways", SortDirection::Desc)]
    fn test_sort_direction_from_param(#[case] input: &str, #[case] expected: SortDirection) {
        assert_eq!(SortDirection::from_param(input), expected);
    }

    #[test]
    fn test_sort_default() {
        let sort = Sort::default();
        assert_eq!(sort.field, SortField::UpdatedAt);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_page_request_rejects_zero_size() {
        let result = PageRequest::new(0, 0, Sort::default());
        match result {
            Err(Error::Validation(errors)) => assert!(errors.contains_field("pageSize")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 25, Sort::default()).unwrap();
        assert_eq!(request.offset(), 75);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(25, 1, 25)]
    fn test_total_pages(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, size), expected);
    }

    #[test]
    fn test_page_first_of_three() {
        let request = PageRequest::new(0, 10, Sort::default()).unwrap();
        let page = Page::new((0..10).collect::<Vec<_>>(), &request, 25);

        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last_page);
    }

    #[test]
    fn test_page_last_of_three() {
        let request = PageRequest::new(2, 10, Sort::default()).unwrap();
        let page = Page::new((0..5).collect::<Vec<_>>(), &request, 25);

        assert_eq!(page.content.len(), 5);
        assert!(page.last_page);
    }

    #[test]
    fn test_empty_page_is_last() {
        let request = PageRequest::new(0, 10, Sort::default()).unwrap();
        let page: Page<u8> = Page::new(Vec::new(), &request, 0);

        assert_eq!(page.total_pages, 0);
        assert!(page.last_page);
    }

    #[test]
    fn test_page_past_the_end_is_last() {
        let request = PageRequest::new(7, 10, Sort::default()).unwrap();
        let page: Page<u8> = Page::new(Vec::new(), &request, 25);
        assert!(page.last_page);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let request = PageRequest::new(0, 10, Sort::default()).unwrap();
        let page = Page::new(vec!["a"], &request, 1);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["lastPage"], true);
        assert_eq!(json["content"][0], "a");
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let request = PageRequest::new(1, 2, Sort::default()).unwrap();
        let page = Page::new(vec![1, 2], &request, 5).map(|n| n * 10);

        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last_page);
    }
}
