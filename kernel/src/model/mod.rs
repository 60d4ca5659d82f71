pub mod auth;
pub mod event;
pub mod expense;
pub mod id;
pub mod registration;
pub mod report;
pub mod role;
pub mod user;
