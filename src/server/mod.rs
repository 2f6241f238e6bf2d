//! Server application core modules.
//!
//! This module contains all server-side functionality of the helpdesk: HTTP routing,
//! Clerk session sign-in, database repositories, the ticket workflow services and the
//! scheduled maintenance jobs that close stale resolved tickets and purge read notifications.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
