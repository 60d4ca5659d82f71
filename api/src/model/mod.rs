pub mod auth;
pub mod event;
pub mod expense;
pub mod registration;
pub mod report;
pub mod user;
