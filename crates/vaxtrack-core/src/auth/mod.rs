//! Session management for the vaxtrack console.
//!
//! This module provides `SessionStore`, the single source of truth for
//! "is there a currently authenticated user". It holds the bearer token and
//! the profile returned at login, and persists the token to a fixed slot on
//! disk so a session survives a restart.

pub mod session;

pub use session::SessionStore;
