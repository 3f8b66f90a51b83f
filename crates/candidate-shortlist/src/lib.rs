//! Candidate ranking and diversity-aware shortlisting.
//!
//! The ranking core lives in [`workflows::shortlist`]; [`workflows::intake`] and
//! [`workflows::export`] decode the incoming batch and encode finalists for hosts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
