//! Property-based tests for request validation and page arithmetic.
//!
//! These tests use proptest to generate random inputs and verify that the
//! validation rules and page envelope invariants hold for all of them.

use proptest::prelude::*;
use interview_core::{
    Attachment, InterviewRequest, Page, PageRequest, Sort, constants::*, validate_request,
};

/// Strategy for generating valid emails (`local@domain.tld`).
fn valid_email() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9._+-]{1,20}@[a-z0-9]{1,15}\\.[a-z]{2,6}")
        .expect("Failed to create email regex strategy")
}

/// Strategy for generating titles within the allowed length range.
fn valid_title() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 ]{3,100}").expect("Failed to create title strategy")
}

/// Strategy for generating content meeting the minimum length.
fn valid_content() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 .,]{10,300}")
        .expect("Failed to create content strategy")
}

/// Strategy for generating allowed content types in random letter case.
fn allowed_content_type() -> impl Strategy<Value = String> {
    (prop::sample::select(ALLOWED_IMAGE_TYPES.to_vec()), any::<bool>()).prop_map(
        |(content_type, upper)| {
            if upper {
                content_type.to_uppercase()
            } else {
                content_type.to_string()
            }
        },
    )
}

proptest! {
    /// Property: any request built from valid parts passes validation.
    #[test]
    fn prop_valid_request_passes(
        email in valid_email(),
        title in valid_title(),
        content in valid_content(),
        content_type in allowed_content_type(),
        size in 1usize..4096,
    ) {
        let request = InterviewRequest::new("Owner", email, title, content, "acme");
        let attachment = Attachment::new(vec![0u8; size], content_type);

        prop_assert!(validate_request(&request, Some(&attachment)).is_ok());
    }

    /// Property: a title shorter than the minimum is always reported, and only once.
    #[test]
    fn prop_short_title_reported(
        title in prop::string::string_regex("[a-z]{0,2}").unwrap(),
        email in valid_email(),
        content in valid_content(),
    ) {
        let request = InterviewRequest::new("Owner", email, title, content, "acme");
        let errors = validate_request(&request, None).unwrap_err();

        prop_assert_eq!(errors.fields().filter(|f| *f == "title").count(), 1);
        prop_assert_eq!(errors.len(), 1);
    }

    /// Property: content types outside the allow-list are always rejected.
    #[test]
    fn prop_non_image_type_rejected(
        subtype in "[a-z]{1,10}",
        email in valid_email(),
    ) {
        let content_type = format!("text/{subtype}");
        let request = InterviewRequest::new("Owner", email, "Title", "0123456789", "acme");
        let attachment = Attachment::new(vec![1u8], content_type);

        let errors = validate_request(&request, Some(&attachment)).unwrap_err();
        prop_assert!(errors.contains_field("image"));
    }

    /// Property: page metadata is consistent for every page of every listing.
    ///
    /// The sum of item counts over all pages equals the total, exactly one
    /// page is flagged last, and it is the final one.
    #[test]
    fn prop_page_envelope_consistent(total in 0u64..500, size in 1u32..50) {
        let pages = total.div_ceil(u64::from(size));
        let mut seen = 0u64;
        let mut last_flags = 0;

        for number in 0..pages.max(1) {
            let request = PageRequest::new(number as u32, size, Sort::default()).unwrap();
            let remaining = total.saturating_sub(request.offset());
            let items = remaining.min(u64::from(size));
            let page = Page::new(vec![(); items as usize], &request, total);

            prop_assert_eq!(u64::from(page.total_pages), pages);
            seen += page.content.len() as u64;
            if page.last_page {
                last_flags += 1;
                prop_assert_eq!(u64::from(number), pages.saturating_sub(1));
            }
        }

        prop_assert_eq!(seen, total);
        prop_assert_eq!(last_flags, 1);
    }
}
