//! # API Adapters
//!
//! The HTTP side of the [`domains::ports::TimelineApi`] port: a thin
//! `reqwest` client speaking the backend's JSON envelope.

mod http;

pub use http::HttpTimelineApi;
