//! # Yatube Core
//!
//! The domain layer of the Yatube blog.
//! This crate contains users, groups and posts, the repository ports they are
//! stored behind, pagination, post form validation and the post service.
//! It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use pagination::{Page, Paginator};
pub use services::PostService;
