//! Business rules for classrooms, script projects and evaluations.
//!
//! Every service is a plain struct around a [`sea_orm::DatabaseConnection`] and takes the
//! acting user's id explicitly, so there is no ambient state to set up in tests.

pub mod access;
pub mod assignment_service;
pub mod chat_service;
pub mod class_service;
pub mod error;
pub mod evaluation_service;
pub mod evaluator;
pub mod project_service;
pub mod score;
pub mod script_service;
pub mod stage;

#[cfg(test)]
mod test_support;

pub use error::{ServiceError, ServiceResult};
