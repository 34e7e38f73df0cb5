//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Only the session lives here. Dashboard and field views keep their own
//! component-local state and read the session through `SessionStore`.

pub mod auth;

// =============================================================================
// TEST HELPERS
// =============================================================================
