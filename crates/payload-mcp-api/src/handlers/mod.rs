//! API route handlers

pub mod generate;
pub mod health;
pub mod query;
pub mod scaffold;
pub mod validate;
