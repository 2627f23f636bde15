// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod comment_repository;
pub mod photo_repository;

pub use comment_repository::*;
pub use photo_repository::*;
