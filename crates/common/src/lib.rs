//! Common utilities and shared types for portal.
//!
//! - **Settings**: profile selection and process-wide settings via [`Settings`]
//! - **Error handling**: unified error types via [`AppError`] and [`AppResult`]
//! - **Telemetry**: tracing subscriber setup via [`init_tracing`]
//!
//! # Example
//!
//! ```no_run
//! use portal_common::{AppResult, Settings, init_tracing, settings};
//!
//! fn boot() -> AppResult<()> {
//!     let loaded = Settings::load()?;
//!     init_tracing(&loaded);
//!     let installed = settings::init(loaded)?;
//!     println!("Running with profile {}", installed.profile.name());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod settings;
pub mod telemetry;

pub use error::{AppError, AppResult};
pub use settings::{Profile, Settings};
pub use telemetry::init_tracing;
