pub mod account;
pub mod bookmark;
pub mod category;
pub mod like;
pub mod profile;
pub mod recipe;
pub mod summary;
