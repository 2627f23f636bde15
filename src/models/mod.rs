// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod comment;
pub mod photo;

pub use comment::*;
pub use photo::*;
