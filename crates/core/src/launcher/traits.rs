//! Trait definitions for the launcher module.

use async_trait::async_trait;

use super::error::PrimitiveError;

/// OS-level actions used to start workspace items.
#[async_trait]
pub trait LaunchPrimitive: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Opens a URL with the default handler for its scheme.
    ///
    /// Only allow-listed schemes are accepted.
    async fn open_external(&self, url: &str) -> Result<(), PrimitiveError>;

    /// Opens a file, folder or application bundle with its default handler.
    async fn open_path(&self, path: &str) -> Result<(), PrimitiveError>;

    /// Starts an executable with arguments as a detached process.
    ///
    /// Arguments are treated as paths and validated independently.
    async fn launch_app(&self, executable: &str, args: &[String]) -> Result<(), PrimitiveError>;
}
