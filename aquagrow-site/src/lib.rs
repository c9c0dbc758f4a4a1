//! AquaGrow Site
//!
//! The application shell around the record store and content gateway:
//! - TOML configuration with per-field defaults
//! - Admin sign-in gating the record console
//! - HTTP functions serving generated content and inquiry triage

pub mod app;
pub mod config;
pub mod error;
pub mod functions;
pub mod session;

pub use app::Site;
pub use config::{AdminConfig, LlmConfig, LlmProvider, SiteConfig};
pub use error::SiteError;
pub use functions::FunctionsServer;
pub use session::{AdminConsole, AdminGate, AdminSession, AuthError};
