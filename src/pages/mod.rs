//! Headless page controllers for the sign-in flows.
//!
//! These hold the caller-side rules the session store relies on: disable
//! submission while busy, refuse empty inputs before calling the store, and
//! map each outcome to a toast and a navigation target.

pub mod login;
pub mod register;
pub mod verify;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// Transient notification shown after a flow completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: ToastVariant,
}

impl Toast {
    #[must_use]
    pub const fn info(title: &'static str, description: &'static str) -> Self {
        Self { title, description, variant: ToastVariant::Default }
    }

    #[must_use]
    pub const fn error(title: &'static str, description: &'static str) -> Self {
        Self { title, description, variant: ToastVariant::Destructive }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}
