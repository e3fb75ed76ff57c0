//! Stored record entity shared by every resource.
//!
//! A record is identified by a store-assigned UUID, carries a validated
//! `name`, an optional detail string, a soft-delete flag, and Unix-second
//! audit timestamps.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use uuid::Uuid;

use super::Resource;

/// Longest accepted `name`, counted in characters.
pub const MAX_NAME_LENGTH: usize = 255;
/// Longest accepted detail value, counted in characters.
pub const MAX_DETAIL_LENGTH: usize = 1000;

/// Validation failures raised while building records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("detail must be at most {max} characters")]
    DetailTooLong { max: usize },
    #[error("updated_at ({updated_at}) precedes created_at ({created_at})")]
    TimestampsOutOfOrder { created_at: i64, updated_at: i64 },
}

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier; used by stores without server-side ids.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A non-blank record name of at most [`MAX_NAME_LENGTH`] characters.
///
/// # Examples
/// ```
/// use storefront::domain::RecordName;
///
/// assert!(RecordName::new("Widget").is_ok());
/// assert!(RecordName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName(String);

impl RecordName {
    /// Validate and wrap a name.
    ///
    /// # Errors
    /// [`RecordValidationError::EmptyName`] for blank input and
    /// [`RecordValidationError::NameTooLong`] past the length limit.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(RecordValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalise an optional detail value.
///
/// Absent and empty values both become `None`, so the store never holds `""`.
///
/// # Errors
/// [`RecordValidationError::DetailTooLong`] past [`MAX_DETAIL_LENGTH`].
///
/// # Examples
/// ```
/// use storefront::domain::normalise_detail;
///
/// assert_eq!(normalise_detail(Some(String::new())), Ok(None));
/// assert_eq!(normalise_detail(Some("x".into())), Ok(Some("x".into())));
/// ```
pub fn normalise_detail(detail: Option<String>) -> Result<Option<String>, RecordValidationError> {
    match detail {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) if value.chars().count() > MAX_DETAIL_LENGTH => {
            Err(RecordValidationError::DetailTooLong {
                max: MAX_DETAIL_LENGTH,
            })
        }
        Some(value) => Ok(Some(value)),
    }
}

/// Raw parts used to assemble a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub id: RecordId,
    pub name: String,
    pub detail: Option<String>,
    pub is_archived: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A persisted product or user.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `created_at <= updated_at`.
/// - `detail` is never `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<R: Resource> {
    id: RecordId,
    name: RecordName,
    detail: Option<String>,
    is_archived: bool,
    created_at: i64,
    updated_at: i64,
    resource: PhantomData<R>,
}

impl<R: Resource> Record<R> {
    /// Validate a draft into a record.
    ///
    /// # Errors
    /// Returns [`RecordValidationError`] when any invariant fails.
    pub fn new(draft: RecordDraft) -> Result<Self, RecordValidationError> {
        let RecordDraft {
            id,
            name,
            detail,
            is_archived,
            created_at,
            updated_at,
        } = draft;
        if updated_at < created_at {
            return Err(RecordValidationError::TimestampsOutOfOrder {
                created_at,
                updated_at,
            });
        }
        Ok(Self {
            id,
            name: RecordName::new(name)?,
            detail: normalise_detail(detail)?,
            is_archived,
            created_at,
            updated_at,
            resource: PhantomData,
        })
    }

    /// Assemble the record a successful insert produced.
    pub fn inserted(id: RecordId, new_record: NewRecord) -> Self {
        let NewRecord {
            name,
            detail,
            created_at,
            updated_at,
        } = new_record;
        Self {
            id,
            name,
            detail,
            is_archived: false,
            created_at,
            updated_at,
            resource: PhantomData,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Apply a successful update. `updated_at` never moves backwards.
    #[must_use]
    pub fn with_changes(mut self, changes: RecordChanges) -> Self {
        self.name = changes.name;
        self.detail = changes.detail;
        self.updated_at = self.updated_at.max(changes.updated_at);
        self
    }

    /// Apply a successful soft delete. `updated_at` never moves backwards.
    #[must_use]
    pub fn archived(mut self, updated_at: i64) -> Self {
        self.is_archived = true;
        self.updated_at = self.updated_at.max(updated_at);
        self
    }
}

/// Values inserted for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: RecordName,
    pub detail: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewRecord {
    /// Stamp both timestamps with `now`.
    pub fn new(name: RecordName, detail: Option<String>, now: i64) -> Self {
        Self {
            name,
            detail,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mutable fields written by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChanges {
    pub name: RecordName,
    pub detail: Option<String>,
    pub updated_at: i64,
}

/// Optional filter on the soft-delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveFilter {
    pub is_archived: Option<bool>,
}

impl ArchiveFilter {
    /// Match every record.
    pub const fn any() -> Self {
        Self { is_archived: None }
    }

    /// Match only records whose flag equals `is_archived`.
    pub const fn only(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
        }
    }

    /// Whether a record with the given flag passes the filter.
    pub fn matches(self, is_archived: bool) -> bool {
        self.is_archived.is_none_or(|wanted| wanted == is_archived)
    }
}

#[cfg(test)]
mod tests {
    //! Invariant coverage for records and their parts.

    use super::*;
    use crate::domain::Products;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> RecordDraft {
        RecordDraft {
            id: RecordId::random(),
            name: "Widget".to_owned(),
            detail: Some("blue".to_owned()),
            is_archived: false,
            created_at: 100,
            updated_at: 100,
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(RecordName::new(raw), Err(RecordValidationError::EmptyName));
    }

    #[rstest]
    fn name_length_is_counted_in_characters() {
        let at_limit = "é".repeat(MAX_NAME_LENGTH);
        assert!(RecordName::new(at_limit).is_ok());

        let over = "é".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            RecordName::new(over),
            Err(RecordValidationError::NameTooLong {
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" "), Some(" "))]
    #[case(Some("blue"), Some("blue"))]
    fn detail_normalisation(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let normalised = normalise_detail(raw.map(str::to_owned)).expect("within limit");
        assert_eq!(normalised.as_deref(), expected);
    }

    #[rstest]
    fn overlong_detail_is_rejected() {
        let detail = "x".repeat(MAX_DETAIL_LENGTH + 1);
        assert_eq!(
            normalise_detail(Some(detail)),
            Err(RecordValidationError::DetailTooLong {
                max: MAX_DETAIL_LENGTH
            })
        );
    }

    #[rstest]
    fn record_rejects_timestamps_out_of_order(mut draft: RecordDraft) {
        draft.updated_at = draft.created_at - 1;
        let result = Record::<Products>::new(draft);
        assert!(matches!(
            result,
            Err(RecordValidationError::TimestampsOutOfOrder { .. })
        ));
    }

    #[rstest]
    fn record_normalises_empty_detail(mut draft: RecordDraft) {
        draft.detail = Some(String::new());
        let record = Record::<Products>::new(draft).expect("valid draft");
        assert!(record.detail().is_none());
    }

    #[rstest]
    fn with_changes_keeps_created_at(draft: RecordDraft) {
        let record = Record::<Products>::new(draft).expect("valid draft");
        let changes = RecordChanges {
            name: RecordName::new("Gadget").expect("valid name"),
            detail: None,
            updated_at: 250,
        };
        let updated = record.with_changes(changes);
        assert_eq!(updated.name(), "Gadget");
        assert_eq!(updated.created_at(), 100);
        assert_eq!(updated.updated_at(), 250);
        assert!(updated.detail().is_none());
    }

    #[rstest]
    fn archived_never_rewinds_updated_at(draft: RecordDraft) {
        let record = Record::<Products>::new(draft).expect("valid draft");
        let archived = record.archived(50);
        assert!(archived.is_archived());
        assert_eq!(archived.updated_at(), 100);
    }

    #[rstest]
    fn inserted_record_is_active() {
        let name = RecordName::new("Widget").expect("valid name");
        let record = Record::<Products>::inserted(RecordId::random(), NewRecord::new(name, None, 7));
        assert!(!record.is_archived());
        assert_eq!(record.created_at(), record.updated_at());
    }

    #[rstest]
    #[case(ArchiveFilter::any(), true, true)]
    #[case(ArchiveFilter::any(), false, true)]
    #[case(ArchiveFilter::only(true), true, true)]
    #[case(ArchiveFilter::only(true), false, false)]
    #[case(ArchiveFilter::only(false), true, false)]
    fn archive_filter_matching(
        #[case] filter: ArchiveFilter,
        #[case] is_archived: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(is_archived), expected);
    }
}
