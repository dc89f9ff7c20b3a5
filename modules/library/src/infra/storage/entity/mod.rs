pub mod author;
pub mod book;
pub mod publisher;
pub mod user;
