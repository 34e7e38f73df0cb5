//! # agri-shell
//!
//! Session core of the AgriAI monitoring dashboard shell.
//!
//! `state::auth::SessionStore` owns who is signed in and runs the sign-in,
//! sign-up, sign-in-link and sign-out flows against an `AuthBackend`.
//! `routes` decides which view a path resolves to for the current session,
//! and `pages` holds the form-level rules the sign-in screens enforce before
//! calling the store.

pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;
