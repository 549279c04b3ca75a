//! HTTP entry point for the EdTech platform API.
//!
//! A single router dispatches CRUD requests for the platform's collections to
//! the document store, enforcing required fields and referential integrity at
//! the application level, and emitting operational notifications on the side.

pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
