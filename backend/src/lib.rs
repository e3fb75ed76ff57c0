//! Storefront backend library.
//!
//! Layered CRUD API for products and users: [`domain`] holds the record
//! model, ports, and service; [`inbound`] exposes it over HTTP; [`outbound`]
//! stores it in PostgreSQL or memory.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::{Timeout, Trace};
