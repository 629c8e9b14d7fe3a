//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the user and product API
//! domains, excluding core authentication routes which are handled separately.

pub mod common;
pub mod health;
pub mod product;
pub mod user;
