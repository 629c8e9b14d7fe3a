//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations on top of the store contracts, keeping validation, password
//! handling, and token issuance out of the HTTP handlers.

pub mod product_service;
pub mod user_service;
