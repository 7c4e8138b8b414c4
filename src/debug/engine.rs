// src/debug/engine.rs

//! Debugger engine identities and the pure selection function.

use tracing::debug;

use crate::host::DebuggerRegistry;
use crate::types::EnginePreference;

/// Extension id of CodeLLDB, the source-level debugger with native
/// build-tool support.
pub const CODELLDB_ID: &str = "vadimcn.vscode-lldb";

/// Extension id of the Microsoft C++ tools, the native debugger that needs
/// a concrete binary path.
pub const CPPTOOLS_ID: &str = "ms-vscode.cpptools";

/// The two debugger integrations this crate can build configurations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugEngineKind {
    CodeLldb,
    Cpptools,
}

impl DebugEngineKind {
    pub fn extension_id(self) -> &'static str {
        match self {
            DebugEngineKind::CodeLldb => CODELLDB_ID,
            DebugEngineKind::Cpptools => CPPTOOLS_ID,
        }
    }
}

/// Installed-engine facts, probed once per debug attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstalledEngines {
    pub code_lldb: bool,
    pub cpptools: bool,
}

impl InstalledEngines {
    pub fn probe(registry: &dyn DebuggerRegistry) -> Self {
        let facts = Self {
            code_lldb: registry.is_installed(CODELLDB_ID),
            cpptools: registry.is_installed(CPPTOOLS_ID),
        };
        debug!(?facts, "probed installed debugger engines");
        facts
    }
}

/// Select a debugger engine from the configured preference and the
/// installed-engine facts.
///
/// - `Auto` prefers CodeLLDB and falls back to the C++ tools.
/// - `Explicit` resolves only to exactly that engine.
///
/// `None` means no usable engine is installed; the caller surfaces an
/// actionable message for that case.
pub fn select_engine(
    preference: &EnginePreference,
    installed: InstalledEngines,
) -> Option<DebugEngineKind> {
    match preference {
        EnginePreference::Auto => {
            if installed.code_lldb {
                Some(DebugEngineKind::CodeLldb)
            } else if installed.cpptools {
                Some(DebugEngineKind::Cpptools)
            } else {
                None
            }
        }
        EnginePreference::Explicit(id) if id == CODELLDB_ID && installed.code_lldb => {
            Some(DebugEngineKind::CodeLldb)
        }
        EnginePreference::Explicit(id) if id == CPPTOOLS_ID && installed.cpptools => {
            Some(DebugEngineKind::Cpptools)
        }
        EnginePreference::Explicit(_) => None,
    }
}

/// Host platform identity, used only to pick the native engine's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Type tag of the native debugger configuration on this platform.
    pub fn native_engine_type(self) -> &'static str {
        match self {
            Platform::Windows => "cppvsdbg",
            Platform::Other => "cppdbg",
        }
    }
}
