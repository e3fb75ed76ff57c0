//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers validate every field before calling the service and report all
//! violations together, one message per violation.

use pagination::PageRequest;

use crate::domain::{
    ArchiveFilter, Error, ErrorCode, MAX_DETAIL_LENGTH, MAX_NAME_LENGTH, RecordId, Resource,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const IS_ARCHIVED: FieldName = FieldName::new("isArchived");

/// Name and detail fields shared by every create and update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub name: Option<String>,
    pub detail: Option<String>,
}

/// Input that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidInput {
    pub name: String,
    pub detail: Option<String>,
}

fn check_name(name: Option<&str>, violations: &mut Vec<String>) {
    let field = NAME.as_str();
    match name {
        None => violations.push(format!("{field} is required")),
        Some(value) if value.trim().is_empty() => {
            violations.push(format!("{field} must not be empty"));
        }
        Some(value) if value.chars().count() > MAX_NAME_LENGTH => {
            violations.push(format!(
                "{field} must be at most {MAX_NAME_LENGTH} characters"
            ));
        }
        Some(_) => {}
    }
}

fn check_detail<R: Resource>(detail: Option<&str>, violations: &mut Vec<String>) {
    if detail.is_some_and(|value| value.chars().count() > MAX_DETAIL_LENGTH) {
        violations.push(format!(
            "{} must be at most {MAX_DETAIL_LENGTH} characters",
            R::DETAIL_FIELD
        ));
    }
}

/// Validate a create or update payload, collecting every violation.
pub(crate) fn validate_input<R: Resource>(input: RecordInput) -> Result<ValidInput, Error> {
    let mut violations = Vec::new();
    check_name(input.name.as_deref(), &mut violations);
    check_detail::<R>(input.detail.as_deref(), &mut violations);

    match (violations.is_empty(), input.name) {
        (true, Some(name)) => Ok(ValidInput {
            name,
            detail: input.detail,
        }),
        _ => Err(Error::with_messages(ErrorCode::InvalidRequest, violations)),
    }
}

/// Parse the `{id}` path segment.
pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_request(format!("{} must be a valid UUID", ID.as_str())))
}

/// Parse the `isArchived` query parameter; absent lists active records only.
pub(crate) fn parse_archive_filter(raw: Option<&str>) -> Result<ArchiveFilter, Error> {
    match raw {
        None | Some("false") => Ok(ArchiveFilter::only(false)),
        Some("true") => Ok(ArchiveFilter::only(true)),
        Some(other) => Err(Error::invalid_request(format!(
            "invalid query parameter {}: {other}",
            IS_ARCHIVED.as_str()
        ))),
    }
}

/// Parse `limit` and `page`, clamping out-of-range integers.
pub(crate) fn parse_page_request(
    limit: Option<&str>,
    page: Option<&str>,
) -> Result<PageRequest, Error> {
    PageRequest::parse(limit, page).map_err(|err| Error::invalid_request(err.to_string()))
}
