//! Helpdesk & ticketing backend.
//!
//! `model` holds the DTOs exchanged over the HTTP API, `server` holds everything that runs
//! behind it: repositories, services, controllers, scheduler and startup.

pub mod model;
pub mod server;
