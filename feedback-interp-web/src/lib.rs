//! HTTP surface for feedback interpretation.
//!
//! # Endpoints
//! - `GET /` serves the single-page demo
//! - `GET /api/health` liveness probe
//! - `POST /api/interpret` takes `{ text, options }` and answers `{ output }` or `{ detail }`
//! - `GET /api/feedback-records` lists recent interpretations, newest first
//!
//! Interpretations run through the local rules unless `FEEDBACK_UPSTREAM_URL`
//! points at another interpretation service, in which case requests are forwarded
//! there. Records live in memory only and are lost on restart.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
