//! Per-resource whitelist of what query parameters may touch.
//!
//! A contract is built once at startup and shared read-only by every
//! request for that resource.
//!
//! ```rust,ignore
//! let authors = PresenterContract::builder("authors")
//!     .fields(["id", "given_name", "family_name"])
//!     .sort_by(["id", "given_name"])
//!     .filter_by(["given_name", "family_name"])
//!     .related_to(["books"])
//!     .build()?;
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

/// Case rule for the pattern operators (`cont`, `start`, `end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchCase {
    #[default]
    Insensitive,
    Sensitive,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("{resource}: default field `{field}` is not an allowed field")]
    DefaultFieldNotAllowed { resource: String, field: String },

    #[error("{resource}: duplicate field `{field}`")]
    DuplicateField { resource: String, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterContract {
    resource: String,
    allowed_fields: Vec<String>,
    allowed_sort_fields: BTreeSet<String>,
    allowed_filter_fields: BTreeSet<String>,
    allowed_relations: BTreeSet<String>,
    default_fields: Vec<String>,
    match_case: MatchCase,
}

impl PresenterContract {
    pub fn builder(resource: impl Into<String>) -> ContractBuilder {
        ContractBuilder {
            resource: resource.into(),
            fields: Vec::new(),
            sort_fields: BTreeSet::new(),
            filter_fields: BTreeSet::new(),
            relations: BTreeSet::new(),
            default_fields: None,
            match_case: MatchCase::default(),
        }
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[must_use]
    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    #[must_use]
    pub fn match_case(&self) -> MatchCase {
        self.match_case
    }

    #[must_use]
    pub fn allows_field(&self, name: &str) -> bool {
        self.allowed_fields.iter().any(|f| f == name)
    }

    #[must_use]
    pub fn allows_sort(&self, name: &str) -> bool {
        self.allowed_sort_fields.contains(name)
    }

    #[must_use]
    pub fn allows_filter(&self, name: &str) -> bool {
        self.allowed_filter_fields.contains(name)
    }

    #[must_use]
    pub fn allows_relation(&self, name: &str) -> bool {
        self.allowed_relations.contains(name)
    }

    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.allowed_relations.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct ContractBuilder {
    resource: String,
    fields: Vec<String>,
    sort_fields: BTreeSet<String>,
    filter_fields: BTreeSet<String>,
    relations: BTreeSet<String>,
    default_fields: Option<Vec<String>>,
    match_case: MatchCase,
}

fn owned<I, S>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into)
}

impl ContractBuilder {
    /// Fields that may be returned. Also the default output unless
    /// [`Self::default_fields`] narrows it.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(owned(fields));
        self
    }

    pub fn sort_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort_fields.extend(owned(fields));
        self
    }

    pub fn filter_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_fields.extend(owned(fields));
        self
    }

    pub fn related_to<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations.extend(owned(relations));
        self
    }

    pub fn default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = Some(owned(fields).collect());
        self
    }

    pub fn match_case(mut self, match_case: MatchCase) -> Self {
        self.match_case = match_case;
        self
    }

    /// # Errors
    ///
    /// Returns `ContractError` if a field is declared twice or a default
    /// field is not among the allowed fields.
    pub fn build(self) -> Result<PresenterContract, ContractError> {
        let mut seen = BTreeSet::new();
        for f in &self.fields {
            if !seen.insert(f.as_str()) {
                return Err(ContractError::DuplicateField {
                    resource: self.resource,
                    field: f.clone(),
                });
            }
        }

        let default_fields = match self.default_fields {
            Some(defaults) => {
                if let Some(bad) = defaults.iter().find(|d| !seen.contains(d.as_str())) {
                    return Err(ContractError::DefaultFieldNotAllowed {
                        resource: self.resource,
                        field: bad.clone(),
                    });
                }
                defaults
            }
            None => self.fields.clone(),
        };

        Ok(PresenterContract {
            resource: self.resource,
            allowed_fields: self.fields,
            allowed_sort_fields: self.sort_fields,
            allowed_filter_fields: self.filter_fields,
            allowed_relations: self.relations,
            default_fields,
            match_case: self.match_case,
        })
    }
}
