// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod blob_store;
pub mod photo_store;

pub use blob_store::*;
pub use photo_store::*;
