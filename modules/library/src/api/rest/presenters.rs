//! Query contracts for the four resources.

use shelf_query::{ContractError, PresenterContract};

use crate::domain::service::{AUTHOR, BOOKS, PUBLISHER};

pub const AUTHOR_FIELDS: &[&str] = &["id", "given_name", "family_name", "created_at", "updated_at"];

pub const PUBLISHER_FIELDS: &[&str] = &["id", "name", "created_at", "updated_at"];

pub const USER_FIELDS: &[&str] = &[
    "id",
    "email",
    "given_name",
    "family_name",
    "role",
    "last_logged_in_at",
    "confirmed_at",
    "created_at",
    "updated_at",
];

pub const BOOK_FIELDS: &[&str] = &[
    "id",
    "title",
    "subtitle",
    "isbn_10",
    "isbn_13",
    "description",
    "released_on",
    "publisher_id",
    "author_id",
    "created_at",
    "updated_at",
];

#[derive(Debug, Clone)]
pub struct Presenters {
    pub authors: PresenterContract,
    pub publishers: PresenterContract,
    pub users: PresenterContract,
    pub books: PresenterContract,
}

fn contract(
    resource: &str,
    fields: &[&str],
    relations: &[&str],
) -> Result<PresenterContract, ContractError> {
    PresenterContract::builder(resource)
        .fields(fields.iter().copied())
        .sort_by(fields.iter().copied())
        .filter_by(fields.iter().copied())
        .related_to(relations.iter().copied())
        .build()
}

impl Presenters {
    /// # Errors
    ///
    /// `ContractError` if a contract is inconsistent.
    pub fn new() -> Result<Self, ContractError> {
        Ok(Self {
            authors: contract("authors", AUTHOR_FIELDS, &[BOOKS])?,
            publishers: contract("publishers", PUBLISHER_FIELDS, &[BOOKS])?,
            users: contract("users", USER_FIELDS, &[])?,
            books: contract("books", BOOK_FIELDS, &[AUTHOR, PUBLISHER])?,
        })
    }
}
