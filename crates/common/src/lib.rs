//! Shared types for the implicit-grant login workspace

mod error;
mod secret;
pub mod settings;

pub use error::{Error, Result};
pub use secret::Secret;
pub use settings::Settings;
