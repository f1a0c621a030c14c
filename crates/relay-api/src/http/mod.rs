//! HTTP interface module.
//!
//! - relay endpoints (`/solve-pdf`, `/screenshot`, `/generate-image`, `/voiceover`)
//! - service info, health and memory report

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
