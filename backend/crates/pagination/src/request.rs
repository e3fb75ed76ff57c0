//! Normalised pagination requests.

/// Page size applied when the client omits `limit` or sends a value below 1.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;
/// Pages are numbered from one.
pub const FIRST_PAGE: u32 = 1;

/// Errors raised while parsing raw pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// A parameter was present but not an integer.
    #[error("invalid query parameter {name}: {value}")]
    InvalidParameter {
        /// Query parameter name as sent by the client.
        name: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

impl PaginationError {
    /// Name of the offending query parameter.
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

/// A normalised `limit`/`page` pair.
///
/// ## Invariants
/// - `1 <= limit <= MAX_LIMIT`
/// - `page >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: FIRST_PAGE,
        }
    }
}

impl PageRequest {
    /// Normalise client supplied values.
    ///
    /// A `limit` below 1 becomes [`DEFAULT_LIMIT`], a `limit` above
    /// [`MAX_LIMIT`] becomes [`MAX_LIMIT`], and a `page` below 1 becomes
    /// [`FIRST_PAGE`].
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::new(0, 1).limit(), 10);
    /// assert_eq!(PageRequest::new(1_000, 1).limit(), 100);
    /// assert_eq!(PageRequest::new(20, 0).page(), 1);
    /// ```
    #[must_use]
    pub fn new(limit: i64, page: i64) -> Self {
        Self {
            limit: clamp_limit(limit),
            page: clamp_page(page),
        }
    }

    /// Parse optional raw query values, then normalise them.
    ///
    /// Absent values fall back to the defaults; present values must be
    /// integers.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidParameter`] naming the first
    /// parameter that is not an integer.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::parse(Some("20"), None).expect("valid");
    /// assert_eq!((request.limit(), request.page()), (20, 1));
    ///
    /// let error = PageRequest::parse(Some("abc"), None).expect_err("invalid");
    /// assert_eq!(error.parameter(), "limit");
    /// ```
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, PaginationError> {
        let raw_limit = parse_param("limit", limit, i64::from(DEFAULT_LIMIT))?;
        let raw_page = parse_param("page", page, i64::from(FIRST_PAGE))?;
        Ok(Self::new(raw_limit, raw_page))
    }

    /// Effective page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Effective 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Zero-based row offset: `limit * (page - 1)`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page.saturating_sub(1))
    }
}

fn parse_param(name: &'static str, raw: Option<&str>, fallback: i64) -> Result<i64, PaginationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(fallback),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| PaginationError::InvalidParameter {
                name,
                value: value.to_owned(),
            }),
    }
}

fn clamp_limit(limit: i64) -> u32 {
    if limit < 1 {
        return DEFAULT_LIMIT;
    }
    u32::try_from(limit).map_or(MAX_LIMIT, |value| value.min(MAX_LIMIT))
}

fn clamp_page(page: i64) -> u32 {
    if page < 1 {
        return FIRST_PAGE;
    }
    u32::try_from(page).unwrap_or(u32::MAX)
}
