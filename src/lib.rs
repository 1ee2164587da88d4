//! Granted - Grant Application Assistant
//!
//! A terminal assistant that walks a business through a five-step grant
//! application: business details, grant discovery, document uploads,
//! review and submission, with a canned chat helper alongside.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
