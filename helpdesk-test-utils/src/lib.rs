//! Test utilities for the helpdesk crate.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares the tables and fixtures a test
//! needs, and `build()` returns a [`TestContext`] backed by an in-memory SQLite database with
//! those fixtures inserted. Further fixtures can be inserted from the context during the test.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod jwt;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::user::factory,
        jwt::{create_test_token, test_email},
        TestBuilder, TestContext, TestError,
    };
}
