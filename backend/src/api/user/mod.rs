//! Module for user management API endpoints.
//!
//! This module handles full-profile registration and the authenticated
//! user directory.

pub mod handlers;
pub mod routes;
