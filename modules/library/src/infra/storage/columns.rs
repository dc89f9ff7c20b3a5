use shelf_db::{ColumnMap, FieldKind};

use super::entity::{author, book, publisher, user};

/// One column map per table, built once and shared by the services.
#[derive(Clone)]
pub struct ColumnMaps {
    pub authors: ColumnMap<author::Entity>,
    pub publishers: ColumnMap<publisher::Entity>,
    pub users: ColumnMap<user::Entity>,
    pub books: ColumnMap<book::Entity>,
}

impl Default for ColumnMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnMaps {
    #[must_use]
    pub fn new() -> Self {
        Self {
            authors: authors(),
            publishers: publishers(),
            users: users(),
            books: books(),
        }
    }
}

fn authors() -> ColumnMap<author::Entity> {
    use author::Column;
    ColumnMap::new("id", Column::Id, FieldKind::I64)
        .insert("given_name", Column::GivenName, FieldKind::String)
        .insert("family_name", Column::FamilyName, FieldKind::String)
        .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
        .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc)
}

fn publishers() -> ColumnMap<publisher::Entity> {
    use publisher::Column;
    ColumnMap::new("id", Column::Id, FieldKind::I64)
        .insert("name", Column::Name, FieldKind::String)
        .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
        .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc)
}

fn users() -> ColumnMap<user::Entity> {
    use user::Column;
    ColumnMap::new("id", Column::Id, FieldKind::I64)
        .insert("email", Column::Email, FieldKind::String)
        .insert("given_name", Column::GivenName, FieldKind::String)
        .insert("family_name", Column::FamilyName, FieldKind::String)
        .insert("role", Column::Role, FieldKind::String)
        .insert("last_logged_in_at", Column::LastLoggedInAt, FieldKind::DateTimeUtc)
        .insert("confirmed_at", Column::ConfirmedAt, FieldKind::DateTimeUtc)
        .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
        .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc)
}

fn books() -> ColumnMap<book::Entity> {
    use book::Column;
    ColumnMap::new("id", Column::Id, FieldKind::I64)
        .insert("title", Column::Title, FieldKind::String)
        .insert("subtitle", Column::Subtitle, FieldKind::String)
        .insert("isbn_10", Column::Isbn10, FieldKind::String)
        .insert("isbn_13", Column::Isbn13, FieldKind::String)
        .insert("description", Column::Description, FieldKind::String)
        .insert("released_on", Column::ReleasedOn, FieldKind::Date)
        .insert("publisher_id", Column::PublisherId, FieldKind::I64)
        .insert("author_id", Column::AuthorId, FieldKind::I64)
        .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
        .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc)
}
