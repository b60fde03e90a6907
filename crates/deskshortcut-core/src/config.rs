//! Configuration for shortcut operations.
//!
//! Process-wide facts (the invoking user, the desktop directory) are resolved once
//! into a [`ShortcutConfig`] and handed to each operation, so the pipeline itself
//! never reads ambient state.

use crate::error::{Result, ShortcutError};
use crate::platform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default values for shortcut creation.
pub struct ShortcutDefaults;

impl ShortcutDefaults {
    /// Mode given to copied launchers: owner rwx, group rw, others r.
    pub const COPY_MODE_BITS: u32 = 0o764;
    pub const CHMOD_PROGRAM: &'static str = "chmod";
    pub const ESCALATION_PROGRAM: &'static str = "pkexec";
    pub const MENU_ITEM_LABEL: &'static str = "Add to Desktop";
    pub const MENU_ANCHOR_LABELS: [&'static str; 2] = ["Add to Favorites", "Remove from Favorites"];
}

/// How the shortcut artifact is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutMode {
    /// Copy the launcher and give the copy its own mode bits.
    #[default]
    Copy,
    /// Link to the launcher; the original must be runnable.
    Symlink,
}

impl ShortcutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutMode::Copy => "copy",
            ShortcutMode::Symlink => "symlink",
        }
    }
}

impl fmt::Display for ShortcutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutMode {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "copy" => Ok(ShortcutMode::Copy),
            "symlink" | "link" => Ok(ShortcutMode::Symlink),
            other => Err(ShortcutError::InvalidShortcutMode(other.to_string())),
        }
    }
}

/// Name of the user invoking the operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Resolve the identity of the current process.
    pub fn current() -> Result<Self> {
        platform::current_user_name().map(Self)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a shortcut operation needs to know about its environment.
#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    /// The invoking user.
    pub identity: Identity,
    /// Directory the shortcut is placed in.
    pub desktop_dir: PathBuf,
    /// Copy or symlink.
    pub mode: ShortcutMode,
    /// Program used to change mode bits.
    pub chmod_program: String,
    /// Argv prefix that runs a command with elevated authority.
    pub escalation_prefix: Vec<String>,
    /// Mode bits applied to a copied launcher.
    pub copy_mode_bits: u32,
}

impl ShortcutConfig {
    /// Build a configuration from explicit values, with default programs.
    pub fn new(identity: Identity, desktop_dir: impl Into<PathBuf>, mode: ShortcutMode) -> Self {
        Self {
            identity,
            desktop_dir: desktop_dir.into(),
            mode,
            chmod_program: ShortcutDefaults::CHMOD_PROGRAM.to_string(),
            escalation_prefix: vec![ShortcutDefaults::ESCALATION_PROGRAM.to_string()],
            copy_mode_bits: ShortcutDefaults::COPY_MODE_BITS,
        }
    }

    /// Resolve the current user and desktop directory from the environment.
    pub fn from_environment(mode: ShortcutMode) -> Result<Self> {
        let identity = Identity::current()?;
        let desktop_dir = platform::desktop_dir()?;
        Ok(Self::new(identity, desktop_dir, mode))
    }

    pub fn with_escalation_prefix<I, S>(mut self, prefix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.escalation_prefix = prefix.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_chmod_program(mut self, program: impl Into<String>) -> Self {
        self.chmod_program = program.into();
        self
    }

    /// Check the configuration can drive an operation at all.
    pub fn validate(&self) -> Result<()> {
        if self.identity.name().is_empty() {
            return Err(ShortcutError::Config {
                message: "identity must not be empty".to_string(),
            });
        }
        if self.chmod_program.is_empty() {
            return Err(ShortcutError::Config {
                message: "chmod program must not be empty".to_string(),
            });
        }
        if self.escalation_prefix.is_empty() {
            return Err(ShortcutError::Config {
                message: "escalation prefix must name a program".to_string(),
            });
        }
        if self.copy_mode_bits & 0o700 != 0o700 {
            return Err(ShortcutError::Config {
                message: format!(
                    "copy mode {:o} must grant the owner read, write and execute",
                    self.copy_mode_bits
                ),
            });
        }
        Ok(())
    }
}
