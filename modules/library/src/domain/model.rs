//! Write inputs and loaded records.
//!
//! Inputs carry every attribute as optional: on create a missing value is
//! validated as blank, on update it keeps the stored one. Nullable columns
//! use `Option<Option<_>>` so that an explicit `null` clears them.

use serde::{Deserialize, Deserializer};

use crate::infra::storage::entity::{author, book, publisher, user};

fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorInput {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublisherInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub given_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub family_name: Option<Option<String>>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInput {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub isbn_10: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub isbn_13: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// `YYYY-MM-DD`
    pub released_on: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub publisher_id: Option<Option<i64>>,
    pub author_id: Option<i64>,
}

/// An author with its books when they were asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub author: author::Model,
    pub books: Option<Vec<book::Model>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherRecord {
    pub publisher: publisher::Model,
    pub books: Option<Vec<book::Model>>,
}

/// A book with its `belongs_to` relations. The outer `Option` tells whether
/// the relation was loaded, the inner one whether a row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub book: book::Model,
    pub author: Option<Option<author::Model>>,
    pub publisher: Option<Option<publisher::Model>>,
}

pub type UserRecord = user::Model;

impl From<author::Model> for AuthorRecord {
    fn from(author: author::Model) -> Self {
        Self {
            author,
            books: None,
        }
    }
}

impl From<publisher::Model> for PublisherRecord {
    fn from(publisher: publisher::Model) -> Self {
        Self {
            publisher,
            books: None,
        }
    }
}

impl From<book::Model> for BookRecord {
    fn from(book: book::Model) -> Self {
        Self {
            book,
            author: None,
            publisher: None,
        }
    }
}
