//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Map storage outcomes to the caller-facing error taxonomy.

pub mod location_service;
