//! Core library for vaxtrack, the administrative console for a school
//! vaccination tracking program.
//!
//! Everything that is not rendering lives here: the [`auth::SessionStore`]
//! holding the single bearer credential, the [`api::Gateway`] through which
//! every backend call passes, the typed models for students, drives and
//! vaccination records, and the application [`config::Config`].
//!
//! Front-ends construct one `SessionStore` and one `Gateway` at startup, call
//! [`auth::SessionStore::restore`] to pick up a previously stored credential,
//! and subscribe to the navigation-intent receiver returned by
//! [`api::Gateway::new`] to learn when a rejected credential forces a return
//! to the login screen.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
