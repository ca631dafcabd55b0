//! Core types and trait definitions for the Roster person service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Payload validation lives here so every caller rejects bad input the same
//! way before anything reaches a store.

pub mod error;
pub mod person;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use validate::{ValidationError, validate};
