//! Authorization channel collaborator
//!
//! The channel owns the popup: it opens a window of the requested size on
//! the authorization URL and, once the window lands on the redirect
//! endpoint, hands the fragment and query string back to `Auth::finish`.
//! This crate never touches windows itself.

/// What the channel should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRequest {
    /// Full authorization URL, including `redirect_uri`
    pub url: String,
    pub width: u32,
    pub height: u32,
}

pub trait AuthorizationChannel {
    /// Open the popup. An `Err` (e.g. blocked popup) fails the pending attempt.
    fn open(&self, popup: &PopupRequest) -> Result<(), String>;
}
