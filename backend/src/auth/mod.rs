//! Authentication module for managing user accounts and access control.
//!
//! This module provides registration, login, token verification, and the
//! authorization middleware layered on protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
