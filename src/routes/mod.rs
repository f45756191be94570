//! API route handlers

pub mod forms;
pub mod health;
pub mod public;
