//! Rubric evaluation for transcribed customer-service calls.
//!
//! The [`evaluation`] module holds the scoring engine. [`calls`] wraps it with
//! artifact persistence and the transcription/speech collaborators, and exposes
//! an HTTP router for the API service.

pub mod calls;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod sentiment;
pub mod telemetry;
