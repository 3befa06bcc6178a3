//! # Yatube Shared
//!
//! Request payloads shared between the server and anything that drives it
//! (browser forms, tests).

pub mod dto;

pub use dto::{LoginFormData, PageQuery, PostFormData, SignupFormData};
