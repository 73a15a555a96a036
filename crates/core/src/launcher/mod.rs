//! Item launching.
//!
//! [`LaunchPrimitive`] is the seam to the operating system. [`SystemLauncher`]
//! implements it with the platform opener and detached process spawning;
//! [`ItemDispatcher`] maps each item kind onto primitive calls and normalizes
//! the result into a [`LaunchOutcome`].

mod config;
mod dispatcher;
mod error;
mod system;
mod traits;
mod types;

pub use config::LauncherConfig;
pub use dispatcher::ItemDispatcher;
pub use error::{FailureKind, LaunchError, PrimitiveError};
pub use system::SystemLauncher;
pub use traits::LaunchPrimitive;
pub use types::{LaunchOutcome, LaunchReport};
