// src/host/registry.rs

//! Debugger registry backed by the VS Code extensions directory.
//!
//! Installed extensions live in per-version directories named
//! `<publisher>.<name>-<version>` (e.g.
//! `vadimcn.vscode-lldb-1.10.0`), so an id is installed when a directory
//! with that prefix exists.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::DebugSection;
use crate::host::DebuggerRegistry;

#[derive(Debug, Clone)]
pub struct VsCodeExtensionRegistry {
    extensions_dir: PathBuf,
}

impl VsCodeExtensionRegistry {
    pub fn new(extensions_dir: PathBuf) -> Self {
        Self { extensions_dir }
    }

    /// Build a registry from the `[debug]` section, falling back to the
    /// user's default extensions directory.
    pub fn from_config(section: &DebugSection) -> Self {
        let dir = section
            .extensions_dir
            .clone()
            .unwrap_or_else(Self::default_extensions_dir);
        Self::new(dir)
    }

    /// `~/.vscode/extensions`, or the `%USERPROFILE%` equivalent.
    pub fn default_extensions_dir() -> PathBuf {
        let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
        let home = std::env::var_os(home_var)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".vscode").join("extensions")
    }
}

impl DebuggerRegistry for VsCodeExtensionRegistry {
    fn is_installed(&self, extension_id: &str) -> bool {
        let prefix = format!("{}-", extension_id.to_lowercase());

        let entries = match fs::read_dir(&self.extensions_dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(
                    dir = %self.extensions_dir.display(),
                    error = %err,
                    "extensions directory not readable; treating as empty"
                );
                return false;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.starts_with(&prefix) && entry.path().is_dir() {
                debug!(extension = extension_id, dir = %name, "found installed extension");
                return true;
            }
        }

        false
    }
}
