//! Domain service layer - business logic and rules.
//!
//! One submodule per resource, each adding its operations to [`Service`]:
//! - `authors` / `publishers` - CRUD, deletion refused while books reference them
//! - `users` - CRUD with email format/uniqueness and role checks
//! - `books` - CRUD with ISBN lengths and author/publisher reference checks
//!
//! List operations take an already validated [`shelf_query::QueryPlan`];
//! relations named by the plan are batch-loaded after the page is fetched.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait, QueryOrder, Related};

use crate::domain::error::DomainError;
use crate::infra::storage::ColumnMaps;
use crate::infra::storage::entity::book;

mod authors;
mod books;
mod publishers;
mod users;

pub const BOOKS: &str = "books";
pub const AUTHOR: &str = "author";
pub const PUBLISHER: &str = "publisher";

pub struct Service {
    conn: DatabaseConnection,
    columns: ColumnMaps,
}

impl Service {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            columns: ColumnMaps::new(),
        }
    }
}

impl Service {
    /// Books of every owner, in owner order, or `None` per owner when not
    /// requested.
    #[allow(clippy::ptr_arg)]
    async fn books_of<M>(
        &self,
        owners: &Vec<M>,
        requested: bool,
    ) -> Result<Vec<Option<Vec<book::Model>>>, DomainError>
    where
        M: ModelTrait + Sync,
        M::Entity: Related<book::Entity>,
    {
        if !requested {
            return Ok(vec![None; owners.len()]);
        }
        let books = owners
            .load_many(book::Entity::find().order_by_asc(book::Column::Id), &self.conn)
            .await?;
        Ok(books.into_iter().map(Some).collect())
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}
