use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use shelf_db::paginate_plan;
use shelf_errors::FieldErrors;
use shelf_query::{Page, QueryPlan};

use super::{Service, now};
use crate::domain::error::DomainError;
use crate::domain::model::{UserInput, UserRecord};
use crate::domain::validation::{INVALID, RecordErrors, TAKEN, is_blank, is_valid_email};
use crate::infra::storage::entity::user;

const RESOURCE: &str = "users";

pub const DEFAULT_ROLE: &str = "user";
pub const ROLES: &[&str] = &["user", "admin"];

/// A concurrent insert can still hit the unique index after the count check.
fn taken_on_conflict(err: DbErr) -> DomainError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return DomainError::RecordInvalid(FieldErrors::from([(
            "email".to_owned(),
            vec![TAKEN.to_owned()],
        )]));
    }
    err.into()
}

impl Service {
    async fn email_taken(&self, email: &str, except: Option<i64>) -> Result<bool, DomainError> {
        let mut query = user::Entity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = except {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.conn).await? > 0)
    }

    async fn validate_user(
        &self,
        email: Option<&str>,
        role: &str,
        except: Option<i64>,
    ) -> Result<(), DomainError> {
        let mut errors = RecordErrors::new();
        errors.require("email", email);
        if let Some(email) = email.filter(|e| !is_blank(Some(e))) {
            if !is_valid_email(email) {
                errors.add("email", INVALID);
            } else if self.email_taken(email, except).await? {
                errors.add("email", TAKEN);
            }
        }
        errors.inclusion("role", role, ROLES);
        errors.finish()
    }

    /// # Errors
    ///
    /// `DomainError::Query` or `DomainError::Database`.
    pub async fn list_users(&self, plan: &QueryPlan) -> Result<Page<UserRecord>, DomainError> {
        let page =
            paginate_plan(user::Entity::find(), &self.conn, plan, &self.columns.users).await?;
        tracing::debug!(count = page.items.len(), total = page.window.total, "listed users");
        Ok(page)
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such user.
    pub async fn get_user(&self, id: i64) -> Result<UserRecord, DomainError> {
        user::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE, id))
    }

    /// Roles default to `user`.
    ///
    /// # Errors
    ///
    /// `DomainError::RecordInvalid` for a blank, malformed or taken email or
    /// an unknown role.
    pub async fn create_user(&self, input: UserInput) -> Result<UserRecord, DomainError> {
        let role = input.role.unwrap_or_else(|| DEFAULT_ROLE.to_owned());
        self.validate_user(input.email.as_deref(), &role, None).await?;

        let ts = now();
        let created = user::ActiveModel {
            email: Set(input.email.unwrap_or_default()),
            given_name: Set(input.given_name.flatten()),
            family_name: Set(input.family_name.flatten()),
            role: Set(role),
            last_logged_in_at: Set(None),
            confirmed_at: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..<user::ActiveModel as Default>::default()
        }
        .insert(&self.conn)
        .await
        .map_err(taken_on_conflict)?;

        tracing::info!(user_id = created.id, "user created");
        Ok(created)
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` or `DomainError::RecordInvalid`.
    pub async fn update_user(&self, id: i64, input: UserInput) -> Result<UserRecord, DomainError> {
        let existing = self.get_user(id).await?;
        let email = input.email.unwrap_or_else(|| existing.email.clone());
        let role = input.role.unwrap_or_else(|| existing.role.clone());
        self.validate_user(Some(&email), &role, Some(id)).await?;

        let mut am: user::ActiveModel = existing.into();
        am.email = Set(email);
        am.role = Set(role);
        if let Some(given_name) = input.given_name {
            am.given_name = Set(given_name);
        }
        if let Some(family_name) = input.family_name {
            am.family_name = Set(family_name);
        }
        am.updated_at = Set(now());
        let updated = am.update(&self.conn).await.map_err(taken_on_conflict)?;

        tracing::info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if there is no such user.
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        let existing = self.get_user(id).await?;
        existing.delete(&self.conn).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
