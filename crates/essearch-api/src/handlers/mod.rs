//! API route handlers

pub mod health;
pub mod index;
pub mod search;
