//! Path resolution and path safety checks.
//!
//! - [`PathResolver`] expands `~/` in user-entered paths.
//! - [`PathGuard`] rejects shell metacharacters and paths outside the
//!   allowed roots before anything is handed to the OS.

mod guard;
mod tilde;

pub use guard::{normalize_lexically, PathGuard, PathSecurityError, SHELL_METACHARACTERS};
pub use tilde::{HomePathResolver, PathResolver};
