//! Core business logic layer
//!
//! This module contains the fundamental data structures, traits, and operations
//! that form the heart of the contact manager.

pub mod data;
pub mod operations;
pub mod traits;
