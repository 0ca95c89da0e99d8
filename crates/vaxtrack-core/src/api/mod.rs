//! REST gateway for the vaccination tracking backend.
//!
//! This module provides the `Gateway`, the single chokepoint through which
//! every backend call is issued. It attaches the stored bearer token to
//! outgoing requests, interprets authorization failures (clearing the session
//! and emitting a navigation intent toward the login screen), and exposes the
//! typed endpoint methods the screens consume.

pub mod client;
pub mod error;

pub use client::{Gateway, NavIntent};
pub use error::{ApiError, LoginError};
