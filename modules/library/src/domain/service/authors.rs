use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set};
use shelf_db::paginate_plan;
use shelf_query::{EagerLoad, Page, QueryPlan};

use super::{BOOKS, Service, now};
use crate::domain::error::DomainError;
use crate::domain::model::{AuthorInput, AuthorRecord};
use crate::domain::validation::{BASE, DEPENDENT_BOOKS, RecordErrors};
use crate::infra::storage::entity::{author, book};

const RESOURCE: &str = "authors";

fn validate(given_name: Option<&str>, family_name: Option<&str>) -> Result<(), DomainError> {
    let mut errors = RecordErrors::new();
    errors.require("given_name", given_name);
    errors.require("family_name", family_name);
    errors.finish()
}

impl Service {
    /// # Errors
    ///
    /// `DomainError::Query` when a filter value does not fit its column,
    /// `DomainError::Database` on storage failure.
    pub async fn list_authors(&self, plan: &QueryPlan) -> Result<Page<AuthorRecord>, DomainError> {
        let Page { items, window } =
            paginate_plan(author::Entity::find(), &self.conn, plan, &self.columns.authors).await?;
        let books = self.books_of(&items, plan.relations().loads(BOOKS)).await?;

        tracing::debug!(count = items.len(), total = window.total, "listed authors");
        let records = items
            .into_iter()
            .zip(books)
            .map(|(author, books)| AuthorRecord { author, books })
            .collect();
        Ok(Page::new(records, window))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such author.
    pub async fn find_author(&self, id: i64) -> Result<author::Model, DomainError> {
        author::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE, id))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such author.
    pub async fn get_author(
        &self,
        id: i64,
        relations: &EagerLoad,
    ) -> Result<AuthorRecord, DomainError> {
        let author = self.find_author(id).await?;
        let books = if relations.loads(BOOKS) {
            Some(
                author
                    .find_related(book::Entity)
                    .order_by_asc(book::Column::Id)
                    .all(&self.conn)
                    .await?,
            )
        } else {
            None
        };
        Ok(AuthorRecord { author, books })
    }

    /// # Errors
    ///
    /// `DomainError::RecordInvalid` when a name is blank.
    pub async fn create_author(&self, input: AuthorInput) -> Result<AuthorRecord, DomainError> {
        validate(input.given_name.as_deref(), input.family_name.as_deref())?;

        let ts = now();
        let created = author::ActiveModel {
            given_name: Set(input.given_name.unwrap_or_default()),
            family_name: Set(input.family_name.unwrap_or_default()),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..<author::ActiveModel as Default>::default()
        }
        .insert(&self.conn)
        .await?;

        tracing::info!(author_id = created.id, "author created");
        Ok(created.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` or `DomainError::RecordInvalid`.
    pub async fn update_author(
        &self,
        id: i64,
        input: AuthorInput,
    ) -> Result<AuthorRecord, DomainError> {
        let existing = self.find_author(id).await?;
        let given_name = input
            .given_name
            .unwrap_or_else(|| existing.given_name.clone());
        let family_name = input
            .family_name
            .unwrap_or_else(|| existing.family_name.clone());
        validate(Some(&given_name), Some(&family_name))?;

        let mut am: author::ActiveModel = existing.into();
        am.given_name = Set(given_name);
        am.family_name = Set(family_name);
        am.updated_at = Set(now());
        let updated = am.update(&self.conn).await?;

        tracing::info!(author_id = id, "author updated");
        Ok(updated.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound`, or `DomainError::RecordInvalid` on `base`
    /// while books still reference the author.
    pub async fn delete_author(&self, id: i64) -> Result<(), DomainError> {
        let existing = self.find_author(id).await?;
        let dependents = existing
            .find_related(book::Entity)
            .count(&self.conn)
            .await?;
        if dependents > 0 {
            let mut errors = RecordErrors::new();
            errors.add(BASE, DEPENDENT_BOOKS);
            return errors.finish();
        }

        existing.delete(&self.conn).await?;
        tracing::info!(author_id = id, "author deleted");
        Ok(())
    }
}
