//! Platform and installation-type detection.
//!
//! Decides whether the running binary is a candidate for auto-update at all.
//! Development builds and package-manager installs are not: the former is a
//! generic binary with no release feed behind it, the latter are updated by
//! their package manager.

use std::path::Path;

/// Host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Whether the update engine supports this platform. Linux is excluded.
    pub fn supports_auto_update(self) -> bool {
        matches!(self, Platform::MacOS | Platform::Windows)
    }

    /// Whether the platform has a dock/taskbar attention bounce
    pub fn supports_dock_bounce(self) -> bool {
        matches!(self, Platform::MacOS)
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Other => "unknown",
        }
    }
}

/// How the application binary was installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationType {
    /// Running out of a cargo `target/` directory (path contains "/target/debug/" or "/target/release/")
    DevelopmentBuild,
    /// Installed via Homebrew (path contains "homebrew" or "Cellar")
    Homebrew,
    /// Installed via `cargo install` (path contains ".cargo/bin")
    CargoInstall,
    /// Running from a macOS .app bundle (path contains ".app/Contents/MacOS")
    MacOSBundle,
    /// Standalone binary (Windows installer or custom location)
    StandaloneBinary,
}

impl InstallationType {
    /// Human-readable description of the installation type.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DevelopmentBuild => "development build",
            Self::Homebrew => "Homebrew",
            Self::CargoInstall => "cargo install",
            Self::MacOSBundle => "macOS app bundle",
            Self::StandaloneBinary => "standalone binary",
        }
    }

    /// `true` when this is a generic binary that must not auto-update
    pub fn is_default_binary(&self) -> bool {
        matches!(
            self,
            Self::DevelopmentBuild | Self::Homebrew | Self::CargoInstall
        )
    }

    /// Detect the installation type from an executable path.
    pub fn from_path(path: &Path) -> Self {
        // Normalize Windows separators so one set of patterns covers both.
        let path_lower = path.to_string_lossy().to_lowercase().replace('\\', "/");

        if path_lower.contains("/target/debug/") || path_lower.contains("/target/release/") {
            InstallationType::DevelopmentBuild
        } else if path_lower.contains("/homebrew/") || path_lower.contains("/cellar/") {
            InstallationType::Homebrew
        } else if path_lower.contains("/.cargo/bin/") {
            InstallationType::CargoInstall
        } else if path_lower.contains(".app/contents/macos/") {
            InstallationType::MacOSBundle
        } else {
            InstallationType::StandaloneBinary
        }
    }
}

/// Everything `UpdateService::start` needs to know about where it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub platform: Platform,
    pub installation: InstallationType,
}

impl Environment {
    pub fn new(platform: Platform, installation: InstallationType) -> Self {
        Self {
            platform,
            installation,
        }
    }

    /// Detect the environment of the running process.
    pub fn detect() -> Self {
        let exe = std::env::current_exe().unwrap_or_default();
        Self::new(Platform::current(), InstallationType::from_path(&exe))
    }

    /// Warnings that keep the update subsystem inert; empty when updates may run.
    pub fn unsuitability_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.installation.is_default_binary() {
            warnings.push(format!(
                "running as a {}; auto-update is only available for packaged releases",
                self.installation.description()
            ));
        }
        if !self.platform.supports_auto_update() {
            warnings.push(format!(
                "auto-update is not supported on {}",
                self.platform.name()
            ));
        }
        warnings
    }
}
