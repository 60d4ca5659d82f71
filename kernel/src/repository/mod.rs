pub mod auth;
pub mod event;
pub mod expense;
pub mod health;
pub mod registration;
pub mod report;
pub mod user;
