//! # Domains
//!
//! Pure core of the chirp interaction layer: the wire models the backend
//! returns, the in-memory document tree the handlers patch, the error
//! taxonomy, and the port traits every adapter plugs into.
//!
//! Nothing in this crate performs I/O.

pub mod document;
pub mod error;
pub mod models;
pub mod ports;
