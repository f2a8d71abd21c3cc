//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep embedding callers decoupled from storage details.

pub mod gradebook_service;
