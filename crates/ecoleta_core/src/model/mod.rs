//! Domain model for the collection point directory.
//!
//! # Responsibility
//! - Define the records exchanged between repositories, services and callers.
//! - Validate registration input before it reaches storage.
//!
//! # Invariants
//! - Location and item ids are store-assigned integers, never minted here.
//! - A location search is either explicitly filtered or explicitly unfiltered.

pub mod filter;
pub mod item;
pub mod location;
