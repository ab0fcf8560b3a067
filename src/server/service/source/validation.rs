//! Two-phase source validation.
//!
//! [`SourceInput::normalize`] cleans caller input into a new [`SourceDraft`] without touching
//! the original, then [`SourceDraft::validate`] applies the field rules in a fixed order and
//! returns the first failure. Only a draft that passes every rule becomes a [`ValidSource`].

use chrono::NaiveDate;

use crate::server::{
    error::validation::ValidationError,
    model::source::{SourceDraft, SourceInput, ValidSource},
    util::url::{matches_host_pattern, with_default_scheme, URL_MAX_LEN},
};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 200;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const SOURCE_TYPE_MAX_LEN: usize = 50;

/// Trims a value, mapping blank strings to `None`.
fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn check_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        let actual = value.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong { field, max, actual });
        }
    }

    Ok(())
}

impl SourceInput {
    /// Returns the trimmed input with blank optional fields dropped and a default URL scheme.
    ///
    /// A blank name is kept as an empty string so the length rule reports it.
    pub fn normalize(&self) -> SourceDraft {
        SourceDraft {
            name: self.name.as_deref().map(|name| name.trim().to_string()),
            author: trimmed(&self.author),
            source_type: trimmed(&self.source_type),
            publication_date: self.publication_date,
            url: trimmed(&self.url).map(|url| with_default_scheme(&url)),
        }
    }
}

impl SourceDraft {
    /// Applies the field rules in order, failing on the first violation.
    ///
    /// The URL length limit applies to the normalized URL, after `http://` has been prepended.
    ///
    /// # Arguments
    /// - `today` - Latest acceptable publication date
    ///
    /// # Returns
    /// - `Ok(ValidSource)` - Every rule passed
    /// - `Err(ValidationError)` - First rule that failed
    pub fn validate(self, today: NaiveDate) -> Result<ValidSource, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingField("name"))?;

        let name_len = name.chars().count();
        if name_len < NAME_MIN_LEN {
            return Err(ValidationError::TooShort {
                field: "name",
                min: NAME_MIN_LEN,
                actual: name_len,
            });
        }
        check_max_len("name", Some(name.as_str()), NAME_MAX_LEN)?;
        check_max_len("author", self.author.as_deref(), AUTHOR_MAX_LEN)?;
        check_max_len("source_type", self.source_type.as_deref(), SOURCE_TYPE_MAX_LEN)?;

        if let Some(url) = &self.url {
            check_max_len("url", Some(url.as_str()), URL_MAX_LEN)?;
            if !matches_host_pattern(url) {
                return Err(ValidationError::InvalidUrl(url.clone()));
            }
        }

        if let Some(date) = self.publication_date {
            if date > today {
                return Err(ValidationError::FutureDate(date));
            }
        }

        Ok(ValidSource::new(
            name,
            self.author,
            self.source_type,
            self.publication_date,
            self.url,
        ))
    }
}
