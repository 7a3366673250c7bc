//! Platform-specific OS identity and display resolution queries
//!
//! Exactly one variant is compiled in for the build target. Each variant
//! only implements the fallible native queries; the fallback to
//! [`UNKNOWN`] and the diagnostic logging live in the provided methods of
//! [`PlatformProbe`] so every platform behaves the same way on failure.

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(all(unix, not(target_os = "macos")))]
pub mod linux;

use anyhow::Result;
use std::fmt;

/// Value written in place of anything that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// Pixel dimensions of the primary display
///
/// Both dimensions are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenResolution {
    width: u32,
    height: u32,
}

impl ScreenResolution {
    /// Build a resolution from raw dimensions reported by a native API
    ///
    /// Zero or negative dimensions are rejected instead of producing a
    /// degenerate `0x0` string.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            anyhow::bail!("Display reported an invalid size: {}x{}", width, height);
        }

        Ok(Self {
            width: u32::try_from(width)?,
            height: u32::try_from(height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for ScreenResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// Native OS and display queries for one target platform
pub trait PlatformProbe {
    /// Query the human-readable OS identity (platform label and release)
    fn query_os_identity(&self) -> Result<String>;

    /// Query the pixel size of the primary display
    fn query_screen_resolution(&self) -> Result<ScreenResolution>;

    /// Resolve the OS identity, falling back to [`UNKNOWN`]
    ///
    /// Never fails. Query errors are reported on the diagnostic stream.
    fn resolve_os_identity(&self) -> String {
        match self.query_os_identity() {
            Ok(identity) if !identity.trim().is_empty() => {
                tracing::debug!("Resolved OS identity: {}", identity);
                identity
            }
            Ok(_) => {
                tracing::error!("OS identity query returned an empty string");
                UNKNOWN.to_string()
            }
            Err(e) => {
                tracing::error!("Failed to query OS identity: {:#}", e);
                UNKNOWN.to_string()
            }
        }
    }

    /// Resolve the screen resolution as `<width>x<height>`, falling back to [`UNKNOWN`]
    fn resolve_screen_resolution(&self) -> String {
        match self.query_screen_resolution() {
            Ok(resolution) => {
                tracing::debug!("Resolved screen resolution: {}", resolution);
                resolution.to_string()
            }
            Err(e) => {
                tracing::error!("Failed to query screen resolution: {:#}", e);
                UNKNOWN.to_string()
            }
        }
    }
}

#[cfg(target_os = "windows")]
pub type NativeProbe = windows::WindowsProbe;

#[cfg(target_os = "macos")]
pub type NativeProbe = macos::MacosProbe;

#[cfg(all(unix, not(target_os = "macos")))]
pub type NativeProbe = linux::LinuxProbe;

#[cfg(not(any(unix, target_os = "windows")))]
pub type NativeProbe = UnsupportedProbe;

/// Construct the probe for the platform this binary was built for
pub fn native() -> NativeProbe {
    NativeProbe::default()
}

/// Probe for targets without a native implementation
///
/// Every query fails, so both values resolve to [`UNKNOWN`].
#[cfg(not(any(unix, target_os = "windows")))]
#[derive(Debug, Default)]
pub struct UnsupportedProbe;

#[cfg(not(any(unix, target_os = "windows")))]
impl PlatformProbe for UnsupportedProbe {
    fn query_os_identity(&self) -> Result<String> {
        anyhow::bail!("Unsupported operating system for OS identity queries")
    }

    fn query_screen_resolution(&self) -> Result<ScreenResolution> {
        anyhow::bail!("Unsupported operating system for display queries")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProbe {
        identity: Option<&'static str>,
        size: Option<(i64, i64)>,
    }

    impl PlatformProbe for FakeProbe {
        fn query_os_identity(&self) -> Result<String> {
            match self.identity {
                Some(identity) => Ok(identity.to_string()),
                None => anyhow::bail!("identity query failed"),
            }
        }

        fn query_screen_resolution(&self) -> Result<ScreenResolution> {
            match self.size {
                Some((width, height)) => ScreenResolution::new(width, height),
                None => anyhow::bail!("display query failed"),
            }
        }
    }

    fn is_resolution(value: &str) -> bool {
        let Some((width, height)) = value.split_once('x') else {
            return false;
        };
        [width, height].iter().all(|part| {
            !part.is_empty()
                && !part.starts_with('0')
                && part.chars().all(|c| c.is_ascii_digit())
        })
    }

    #[test]
    fn test_resolution_formats_width_by_height() {
        let resolution = ScreenResolution::new(1920, 1080).unwrap();
        assert_eq!(resolution.to_string(), "1920x1080");
        assert_eq!(resolution.width(), 1920);
        assert_eq!(resolution.height(), 1080);
    }

    #[test]
    fn test_resolution_rejects_degenerate_sizes() {
        assert!(ScreenResolution::new(0, 1080).is_err());
        assert!(ScreenResolution::new(1920, 0).is_err());
        assert!(ScreenResolution::new(-1, 768).is_err());
        assert!(ScreenResolution::new(i64::MAX, 768).is_err());
    }

    #[test]
    fn test_resolve_returns_values_on_success() {
        let probe = FakeProbe {
            identity: Some("Linux 6.1.0"),
            size: Some((2560, 1440)),
        };

        assert_eq!(probe.resolve_os_identity(), "Linux 6.1.0");
        assert_eq!(probe.resolve_screen_resolution(), "2560x1440");
        assert!(is_resolution(&probe.resolve_screen_resolution()));
    }

    #[test]
    fn test_resolve_falls_back_to_unknown_on_failure() {
        let probe = FakeProbe {
            identity: None,
            size: None,
        };

        assert_eq!(probe.resolve_os_identity(), UNKNOWN);
        assert_eq!(probe.resolve_screen_resolution(), UNKNOWN);
    }

    #[test]
    fn test_zero_dimension_resolves_to_unknown() {
        let probe = FakeProbe {
            identity: Some("Linux 6.1.0"),
            size: Some((1920, 0)),
        };

        assert_eq!(probe.resolve_screen_resolution(), UNKNOWN);
    }

    #[test]
    fn test_empty_identity_resolves_to_unknown() {
        let probe = FakeProbe {
            identity: Some("  "),
            size: None,
        };

        assert_eq!(probe.resolve_os_identity(), UNKNOWN);
    }

    #[test]
    fn test_native_identity_is_deterministic() {
        let probe = native();
        assert_eq!(probe.resolve_os_identity(), probe.resolve_os_identity());
        assert!(!probe.resolve_os_identity().is_empty());
    }

    #[test]
    fn test_native_resolution_is_valid_or_unknown() {
        let resolution = native().resolve_screen_resolution();
        assert!(resolution == UNKNOWN || is_resolution(&resolution), "got {}", resolution);
    }
}
