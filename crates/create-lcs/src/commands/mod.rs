//! Command handlers

pub mod new;
pub mod schema;
