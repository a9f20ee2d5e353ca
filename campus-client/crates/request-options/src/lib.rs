//! Listing request option primitives shared by campus API clients.
//!
//! The administration API recognises three listing parameters: a zero-based
//! page index, a page size, and repeatable `sort=field,direction` keys.
//! [`RequestOptions`] carries only those recognised keys; anything else a
//! caller holds alongside a request is simply never serialised.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction token of a [`SortSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending server-side ordering (`asc`).
    #[default]
    Ascending,
    /// Descending server-side ordering (`desc`).
    Descending,
}

impl SortDirection {
    /// Wire token used inside the `sort` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Errors raised when building or parsing a sort specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortSpecParseError {
    /// The field part of the specification was empty.
    #[error("sort specification must name a field")]
    EmptyField,
    /// The direction token was neither `asc` nor `desc`.
    #[error("unknown sort direction: {token}")]
    UnknownDirection {
        /// Token supplied in place of a direction.
        token: String,
    },
}

/// One `sort` key as serialised onto a listing request: `field,direction`.
///
/// The wire form mirrors what the administration server expects, so the
/// specification round-trips through its string representation for both
/// display and serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    /// Build a specification for `field`, rejecting blank field names.
    ///
    /// # Errors
    ///
    /// Returns [`SortSpecParseError::EmptyField`] when `field` is blank once
    /// trimmed.
    pub fn new(
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<Self, SortSpecParseError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(SortSpecParseError::EmptyField);
        }
        Ok(Self { field, direction })
    }

    /// Ascending specification for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`SortSpecParseError::EmptyField`] when `field` is blank.
    pub fn ascending(field: impl Into<String>) -> Result<Self, SortSpecParseError> {
        Self::new(field, SortDirection::Ascending)
    }

    /// Descending specification for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`SortSpecParseError::EmptyField`] when `field` is blank.
    pub fn descending(field: impl Into<String>) -> Result<Self, SortSpecParseError> {
        Self::new(field, SortDirection::Descending)
    }

    /// Field this specification sorts by.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Direction this specification sorts in.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction.as_param())
    }
}

impl FromStr for SortSpec {
    type Err = SortSpecParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once(',') {
            // A bare field name sorts ascending, matching the server default.
            None => Self::new(raw.trim(), SortDirection::Ascending),
            Some((field, token)) => {
                let direction = match token.trim() {
                    "asc" => SortDirection::Ascending,
                    "desc" => SortDirection::Descending,
                    other => {
                        return Err(SortSpecParseError::UnknownDirection {
                            token: other.to_owned(),
                        });
                    }
                };
                Self::new(field.trim(), direction)
            }
        }
    }
}

impl From<SortSpec> for String {
    fn from(spec: SortSpec) -> Self {
        spec.to_string()
    }
}

impl TryFrom<String> for SortSpec {
    type Error = SortSpecParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Recognised listing options for a collection request.
///
/// Absent options yield an unfiltered listing; the server decides ordering
/// and page shape when a key is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sort: Vec<SortSpec>,
}

impl RequestOptions {
    /// Options that serialise to no query parameters at all.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: None,
            size: None,
            sort: Vec::new(),
        }
    }

    /// Request the given zero-based page index.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Request the given page size.
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Append one sort key; earlier keys take precedence server-side.
    #[must_use]
    pub fn sorted_by(mut self, spec: SortSpec) -> Self {
        self.sort.push(spec);
        self
    }

    /// Requested page index, if any.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    /// Requested page size, if any.
    #[must_use]
    pub const fn size(&self) -> Option<u32> {
        self.size
    }

    /// Sort keys in precedence order.
    #[must_use]
    pub fn sort(&self) -> &[SortSpec] {
        self.sort.as_slice()
    }

    /// Serialise the recognised keys into query pairs.
    ///
    /// `page` and `size` appear at most once; `sort` repeats in precedence
    /// order. The result is empty for default options.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_owned(), size.to_string()));
        }
        for spec in &self.sort {
            pairs.push(("sort".to_owned(), spec.to_string()));
        }
        pairs
    }
}
