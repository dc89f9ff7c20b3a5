use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait, Set};
use shelf_db::paginate_plan;
use shelf_errors::FieldErrors;
use shelf_query::{EagerLoad, Page, QueryPlan};

use super::{AUTHOR, PUBLISHER, Service, now};
use crate::domain::error::DomainError;
use crate::domain::model::{BookInput, BookRecord};
use crate::domain::validation::{BLANK, INVALID, MUST_EXIST, RecordErrors, is_blank};
use crate::infra::storage::entity::{author, book, publisher};

const RESOURCE: &str = "books";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Attribute values a book would have after the write.
#[derive(Debug)]
struct BookDraft {
    title: Option<String>,
    subtitle: Option<String>,
    isbn_10: Option<String>,
    isbn_13: Option<String>,
    description: Option<String>,
    released_on: Option<String>,
    publisher_id: Option<i64>,
    author_id: Option<i64>,
}

impl BookDraft {
    fn new(input: BookInput) -> Self {
        Self {
            title: input.title,
            subtitle: input.subtitle.flatten(),
            isbn_10: input.isbn_10.flatten(),
            isbn_13: input.isbn_13.flatten(),
            description: input.description.flatten(),
            released_on: input.released_on,
            publisher_id: input.publisher_id.flatten(),
            author_id: input.author_id,
        }
    }

    fn merged(existing: &book::Model, input: BookInput) -> Self {
        Self {
            title: Some(input.title.unwrap_or_else(|| existing.title.clone())),
            subtitle: input.subtitle.unwrap_or_else(|| existing.subtitle.clone()),
            isbn_10: input.isbn_10.unwrap_or_else(|| existing.isbn_10.clone()),
            isbn_13: input.isbn_13.unwrap_or_else(|| existing.isbn_13.clone()),
            description: input
                .description
                .unwrap_or_else(|| existing.description.clone()),
            released_on: Some(
                input
                    .released_on
                    .unwrap_or_else(|| existing.released_on.format(DATE_FORMAT).to_string()),
            ),
            publisher_id: input.publisher_id.unwrap_or(existing.publisher_id),
            author_id: Some(input.author_id.unwrap_or(existing.author_id)),
        }
    }
}

impl Service {
    async fn author_exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(author::Entity::find_by_id(id).count(&self.conn).await? > 0)
    }

    async fn publisher_exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(publisher::Entity::find_by_id(id).count(&self.conn).await? > 0)
    }

    /// Validate a draft and return its release date.
    async fn check_book(&self, draft: &BookDraft) -> Result<NaiveDate, DomainError> {
        let mut errors = RecordErrors::new();
        errors.require("title", draft.title.as_deref());
        errors.length("isbn_10", draft.isbn_10.as_deref(), 10);
        errors.length("isbn_13", draft.isbn_13.as_deref(), 13);

        let mut released_on = None;
        match draft.released_on.as_deref() {
            Some(raw) if !is_blank(Some(raw)) => {
                match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                    Ok(date) => released_on = Some(date),
                    Err(_) => errors.add("released_on", INVALID),
                }
            }
            _ => errors.add("released_on", BLANK),
        }

        match draft.author_id {
            None => errors.add("author_id", BLANK),
            Some(id) => {
                if !self.author_exists(id).await? {
                    errors.add(AUTHOR, MUST_EXIST);
                }
            }
        }
        if let Some(id) = draft.publisher_id
            && !self.publisher_exists(id).await?
        {
            errors.add(PUBLISHER, MUST_EXIST);
        }

        errors.finish()?;
        released_on.ok_or_else(|| {
            DomainError::RecordInvalid(FieldErrors::from([(
                "released_on".to_owned(),
                vec![BLANK.to_owned()],
            )]))
        })
    }

    /// # Errors
    ///
    /// `DomainError::Query` or `DomainError::Database`.
    pub async fn list_books(&self, plan: &QueryPlan) -> Result<Page<BookRecord>, DomainError> {
        let Page { items, window } =
            paginate_plan(book::Entity::find(), &self.conn, plan, &self.columns.books).await?;

        let authors: Vec<Option<Option<author::Model>>> = if plan.relations().loads(AUTHOR) {
            let loaded = items.load_one(author::Entity, &self.conn).await?;
            loaded.into_iter().map(Some).collect()
        } else {
            vec![None; items.len()]
        };
        let publishers: Vec<Option<Option<publisher::Model>>> =
            if plan.relations().loads(PUBLISHER) {
                let loaded = items.load_one(publisher::Entity, &self.conn).await?;
                loaded.into_iter().map(Some).collect()
            } else {
                vec![None; items.len()]
            };

        tracing::debug!(count = items.len(), total = window.total, "listed books");
        let records = items
            .into_iter()
            .zip(authors)
            .zip(publishers)
            .map(|((book, author), publisher)| BookRecord {
                book,
                author,
                publisher,
            })
            .collect();
        Ok(Page::new(records, window))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such book.
    pub async fn find_book(&self, id: i64) -> Result<book::Model, DomainError> {
        book::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE, id))
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such book.
    pub async fn get_book(&self, id: i64, relations: &EagerLoad) -> Result<BookRecord, DomainError> {
        let book = self.find_book(id).await?;
        let author = if relations.loads(AUTHOR) {
            Some(book.find_related(author::Entity).one(&self.conn).await?)
        } else {
            None
        };
        let publisher = if relations.loads(PUBLISHER) {
            match book.publisher_id {
                Some(_) => Some(book.find_related(publisher::Entity).one(&self.conn).await?),
                None => Some(None),
            }
        } else {
            None
        };
        Ok(BookRecord {
            book,
            author,
            publisher,
        })
    }

    /// # Errors
    ///
    /// `DomainError::RecordInvalid` when a required attribute is blank, an
    /// ISBN has the wrong length, the date does not parse or a referenced
    /// author/publisher does not exist.
    pub async fn create_book(&self, input: BookInput) -> Result<BookRecord, DomainError> {
        let draft = BookDraft::new(input);
        let released_on = self.check_book(&draft).await?;

        let ts = now();
        let created = book::ActiveModel {
            title: Set(draft.title.unwrap_or_default()),
            subtitle: Set(draft.subtitle),
            isbn_10: Set(draft.isbn_10),
            isbn_13: Set(draft.isbn_13),
            description: Set(draft.description),
            released_on: Set(released_on),
            publisher_id: Set(draft.publisher_id),
            author_id: Set(draft.author_id.unwrap_or_default()),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..<book::ActiveModel as Default>::default()
        }
        .insert(&self.conn)
        .await?;

        tracing::info!(book_id = created.id, author_id = created.author_id, "book created");
        Ok(created.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` or `DomainError::RecordInvalid`.
    pub async fn update_book(&self, id: i64, input: BookInput) -> Result<BookRecord, DomainError> {
        let existing = self.find_book(id).await?;
        let draft = BookDraft::merged(&existing, input);
        let released_on = self.check_book(&draft).await?;

        let mut am: book::ActiveModel = existing.into();
        am.title = Set(draft.title.unwrap_or_default());
        am.subtitle = Set(draft.subtitle);
        am.isbn_10 = Set(draft.isbn_10);
        am.isbn_13 = Set(draft.isbn_13);
        am.description = Set(draft.description);
        am.released_on = Set(released_on);
        am.publisher_id = Set(draft.publisher_id);
        am.author_id = Set(draft.author_id.unwrap_or_default());
        am.updated_at = Set(now());
        let updated = am.update(&self.conn).await?;

        tracing::info!(book_id = id, "book updated");
        Ok(updated.into())
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such book.
    pub async fn delete_book(&self, id: i64) -> Result<(), DomainError> {
        let existing = self.find_book(id).await?;
        existing.delete(&self.conn).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
