#![allow(clippy::needless_for_each)]

use interview_core::{SortDirection, SortField, ValidationErrors, Violation};
use interview_storage::InterviewRecord;

use super::schemas::{DeleteResponse, ErrorResponse, HealthResponse, InterviewUpload};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Interview Experience API",
        description = "Share interview experiences with an optional screenshot. Records are paginated, searchable by owner email and company, and keep their image in an S3-compatible store.",
        license(name = "MIT")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Interviews", description = "Create, read, update and delete interview experiences"),
        (name = "Search", description = "Lookups by owner email and company tag")
    ),
    paths(
        super::health::health,
        super::interviews::create,
        super::interviews::get_by_id,
        super::interviews::list,
        super::interviews::update,
        super::interviews::delete,
        super::interviews::search,
        super::interviews::search_by_email,
        super::interviews::search_by_company,
    ),
    components(schemas(
        InterviewRecord, InterviewUpload,
        Violation, ValidationErrors,
        SortField, SortDirection,
        ErrorResponse, HealthResponse, DeleteResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/health",
            "/api/v1/interviews",
            "/api/v1/interviews/{id}",
            "/api/v1/search",
            "/api/v1/search/email",
            "/api/v1/search/company",
        ] {
            assert!(paths.contains(&path), "missing {path} in {paths:?}");
        }
    }

    #[test]
    fn test_record_schema_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("InterviewRecord"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
