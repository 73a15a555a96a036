//! OS launch primitive backed by the platform opener and process spawning.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;
use url::Url;

use super::config::LauncherConfig;
use super::error::PrimitiveError;
use super::traits::LaunchPrimitive;
use crate::resolver::{HomePathResolver, PathGuard, PathResolver};

/// Launch primitive that talks to the real operating system.
///
/// URLs and paths are handed to the platform opener (`xdg-open`, `open`,
/// `rundll32 url.dll,FileProtocolHandler`); applications are spawned as
/// detached processes.
pub struct SystemLauncher {
    config: LauncherConfig,
    guard: PathGuard,
}

impl SystemLauncher {
    /// Creates a launcher. The home directory is always an allowed root.
    pub fn new(config: LauncherConfig) -> Self {
        let resolver = HomePathResolver::new();
        let mut roots: Vec<PathBuf> = resolver.home().cloned().into_iter().collect();
        roots.extend(
            config
                .allowed_roots
                .iter()
                .map(|root| PathBuf::from(resolver.expand_tilde(&root.to_string_lossy()))),
        );
        let guard = PathGuard::new(roots, config.restrict_to_allowed_roots);
        Self { config, guard }
    }

    /// Creates a launcher with an explicit path guard.
    pub fn with_guard(config: LauncherConfig, guard: PathGuard) -> Self {
        Self { config, guard }
    }

    /// Creates a launcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LauncherConfig::default())
    }

    /// Parses a URL and checks its scheme against the allow-list.
    pub fn validate_url(&self, url: &str) -> Result<Url, PrimitiveError> {
        let parsed = Url::parse(url).map_err(|_| PrimitiveError::InvalidUrl {
            url: url.to_string(),
        })?;

        if !self.config.allows_scheme(parsed.scheme()) {
            return Err(PrimitiveError::DisallowedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }

        Ok(parsed)
    }

    /// Builds the opener invocation for a URL or path.
    fn opener_command(&self, target: &str) -> (String, Vec<String>) {
        if let Some(custom) = self.config.opener.as_deref() {
            let mut parts = custom.split_whitespace().map(str::to_string);
            if let Some(program) = parts.next() {
                let mut args: Vec<String> = parts.collect();
                args.push(target.to_string());
                return (program, args);
            }
        }
        platform_opener(target)
    }

    /// Builds the process invocation for an application.
    fn app_command(&self, executable: &Path, args: &[PathBuf]) -> (PathBuf, Vec<String>) {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        if cfg!(target_os = "macos") && executable.extension().is_some_and(|ext| ext == "app") {
            let mut open_args = vec!["-a".to_string(), executable.to_string_lossy().to_string()];
            open_args.extend(args);
            return (PathBuf::from("open"), open_args);
        }

        (executable.to_path_buf(), args)
    }

    async fn run_opener(&self, target: &str) -> Result<(), PrimitiveError> {
        let (program, args) = self.opener_command(target);
        debug!("Running opener: {} {:?}", program, args);

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PrimitiveError::OpenerNotFound {
                        program: program.clone(),
                    }
                } else {
                    PrimitiveError::Spawn {
                        program: PathBuf::from(&program),
                        source: e,
                    }
                }
            })?;

        let timeout_secs = self.config.opener_timeout_secs;
        let output = match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await
        {
            Ok(result) => result.map_err(|e| PrimitiveError::Spawn {
                program: PathBuf::from(&program),
                source: e,
            })?,
            Err(_) => {
                return Err(PrimitiveError::OpenerTimeout {
                    program,
                    timeout_secs,
                })
            }
        };

        if !output.status.success() {
            return Err(PrimitiveError::OpenerFailed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(target: &str) -> (String, Vec<String>) {
    ("open".to_string(), vec![target.to_string()])
}

// Not `cmd /C start`: cmd re-parses its command line and runs anything after `&` or `|`.
#[cfg(target_os = "windows")]
fn platform_opener(target: &str) -> (String, Vec<String>) {
    (
        "rundll32".to_string(),
        vec![
            "url.dll,FileProtocolHandler".to_string(),
            target.to_string(),
        ],
    )
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(target: &str) -> (String, Vec<String>) {
    ("xdg-open".to_string(), vec![target.to_string()])
}

#[async_trait]
impl LaunchPrimitive for SystemLauncher {
    fn name(&self) -> &str {
        "system"
    }

    async fn open_external(&self, url: &str) -> Result<(), PrimitiveError> {
        self.validate_url(url)?;
        self.run_opener(url).await
    }

    async fn open_path(&self, path: &str) -> Result<(), PrimitiveError> {
        let resolved = self.guard.check_path(path)?;

        if tokio::fs::metadata(&resolved).await.is_err() {
            return Err(PrimitiveError::NotFound { path: resolved });
        }

        self.run_opener(&resolved.to_string_lossy()).await
    }

    async fn launch_app(&self, executable: &str, args: &[String]) -> Result<(), PrimitiveError> {
        let executable = self.guard.check_executable(executable)?;
        let args = args
            .iter()
            .map(|arg| self.guard.check_path(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let (program, argv) = self.app_command(&executable, &args);
        debug!("Spawning {:?} {:?}", program, argv);

        let mut command = Command::new(&program);
        command
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        command.process_group(0);

        // The child is not awaited; it keeps running after the handle drops.
        command.spawn().map_err(|e| PrimitiveError::Spawn {
            program: program.clone(),
            source: e,
        })?;

        Ok(())
    }
}
