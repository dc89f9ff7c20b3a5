use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::storage::entity::{author, book, publisher, user};

/// Write requests wrap their attributes in `{"data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorDto {
    pub id: i64,
    pub given_name: String,
    pub family_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublisherDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub role: String,
    pub last_logged_in_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub isbn_10: Option<String>,
    pub isbn_13: Option<String>,
    pub description: Option<String>,
    pub released_on: NaiveDate,
    pub publisher_id: Option<i64>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&author::Model> for AuthorDto {
    fn from(m: &author::Model) -> Self {
        Self {
            id: m.id,
            given_name: m.given_name.clone(),
            family_name: m.family_name.clone(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&publisher::Model> for PublisherDto {
    fn from(m: &publisher::Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&user::Model> for UserDto {
    fn from(m: &user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email.clone(),
            given_name: m.given_name.clone(),
            family_name: m.family_name.clone(),
            role: m.role.clone(),
            last_logged_in_at: m.last_logged_in_at,
            confirmed_at: m.confirmed_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&book::Model> for BookDto {
    fn from(m: &book::Model) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            subtitle: m.subtitle.clone(),
            isbn_10: m.isbn_10.clone(),
            isbn_13: m.isbn_13.clone(),
            description: m.description.clone(),
            released_on: m.released_on,
            publisher_id: m.publisher_id,
            author_id: m.author_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
