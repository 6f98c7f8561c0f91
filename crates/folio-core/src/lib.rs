//! # Folio Core
//!
//! The domain layer of the Folio blog backend.
//! Blog posts, comments, their validation rules and the ports that
//! infrastructure implements. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
