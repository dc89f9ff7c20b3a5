//! Persistence: SeaORM entities, the migrator and the API-field → column maps.

pub mod columns;
pub mod entity;
pub mod migrations;

pub use columns::ColumnMaps;
pub use migrations::Migrator;
