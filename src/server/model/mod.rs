//! Server application models and type definitions.
//!
//! This module contains application state, database model type aliases, session data
//! structures and the filter/sort/page inputs accepted by repositories.

pub mod app;
pub mod db;
pub mod query;
pub mod session;
