//! Module for product catalog API endpoints.
//!
//! This module handles product creation, retrieval, updates, deletion, and
//! the paginated listing with keyword search.

pub mod handlers;
pub mod routes;
