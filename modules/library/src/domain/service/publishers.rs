use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set};
use shelf_db::paginate_plan;
use shelf_query::{EagerLoad, Page, QueryPlan};

use super::{BOOKS, Service, now};
use crate::domain::error::DomainError;
use crate::domain::model::{PublisherInput, PublisherRecord};
use crate::domain::validation::{BASE, DEPENDENT_BOOKS, RecordErrors};
use crate::infra::storage::entity::{book, publisher};

const RESOURCE: &str = "publishers";

fn validate(name: Option<&str>) -> Result<(), DomainError> {
    let mut errors = RecordErrors::new();
    errors.require("name", name);
    errors.finish()
}

impl Service {
    /// # Errors
    ///
    /// `DomainError::Query` or `DomainError::Database`.
    pub async fn list_publishers(
        &self,
        plan: &QueryPlan,
    ) -> Result<Page<PublisherRecord>, DomainError> {
        let Page { items, window } = paginate_plan(
            publisher::Entity::find(),
            &self.conn,
            plan,
            &self.columns.publishers,
        )
        .await?;
        let books = self.books_of(&items, plan.relations().loads(BOOKS)).await?;

        let records = items
            .into_iter()
            .zip(books)
            .map(|(publisher, books)| PublisherRecord { publisher, books })
            .collect();
        Ok(Page::new(records, window))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such publisher.
    pub async fn find_publisher(&self, id: i64) -> Result<publisher::Model, DomainError> {
        publisher::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE, id))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such publisher.
    pub async fn get_publisher(
        &self,
        id: i64,
        relations: &EagerLoad,
    ) -> Result<PublisherRecord, DomainError> {
        let publisher = self.find_publisher(id).await?;
        let books = if relations.loads(BOOKS) {
            Some(
                publisher
                    .find_related(book::Entity)
                    .order_by_asc(book::Column::Id)
                    .all(&self.conn)
                    .await?,
            )
        } else {
            None
        };
        Ok(PublisherRecord { publisher, books })
    }

    /// # Errors
    ///
    /// `DomainError::RecordInvalid` when the name is blank.
    pub async fn create_publisher(
        &self,
        input: PublisherInput,
    ) -> Result<PublisherRecord, DomainError> {
        validate(input.name.as_deref())?;

        let ts = now();
        let created = publisher::ActiveModel {
            name: Set(input.name.unwrap_or_default()),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..<publisher::ActiveModel as Default>::default()
        }
        .insert(&self.conn)
        .await?;

        tracing::info!(publisher_id = created.id, "publisher created");
        Ok(created.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` or `DomainError::RecordInvalid`.
    pub async fn update_publisher(
        &self,
        id: i64,
        input: PublisherInput,
    ) -> Result<PublisherRecord, DomainError> {
        let existing = self.find_publisher(id).await?;
        let name = input.name.unwrap_or_else(|| existing.name.clone());
        validate(Some(&name))?;

        let mut am: publisher::ActiveModel = existing.into();
        am.name = Set(name);
        am.updated_at = Set(now());
        let updated = am.update(&self.conn).await?;

        tracing::info!(publisher_id = id, "publisher updated");
        Ok(updated.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound`, or `DomainError::RecordInvalid` on `base`
    /// while books still reference the publisher.
    pub async fn delete_publisher(&self, id: i64) -> Result<(), DomainError> {
        let existing = self.find_publisher(id).await?;
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
        tracing::info!(publisher_id = id, "publisher deleted");
        Ok(())
    }
}
