//! Core library for the Homestead marketplace service.
//!
//! The crate is organized around moderation workflows: listing intake and
//! review, KYC identity verification, and the derived trust score. HTTP
//! routers are provided per workflow so the API service can compose them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
