use anyhow::Result;
use windows_sys::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use super::{PlatformProbe, ScreenResolution};

/// Fixed OS label reported on Windows
///
/// This is a stub: no live version query is made.
// TODO: Replace with a live RtlGetVersion query (GetVersionExW lies on manifest-less binaries)
pub const WINDOWS_OS_LABEL: &str = "Windows 10 Enterprise";

/// Windows probe: fixed OS label, primary display from `GetSystemMetrics`
#[derive(Debug, Default)]
pub struct WindowsProbe;

impl PlatformProbe for WindowsProbe {
    fn query_os_identity(&self) -> Result<String> {
        Ok(WINDOWS_OS_LABEL.to_string())
    }

    fn query_screen_resolution(&self) -> Result<ScreenResolution> {
        let (width, height) = unsafe {
            (
                GetSystemMetrics(SM_CXSCREEN),
                GetSystemMetrics(SM_CYSCREEN),
            )
        };

        // GetSystemMetrics reports failure as 0 and sets no last-error code
        if width == 0 || height == 0 {
            anyhow::bail!("GetSystemMetrics failed: {}x{}", width, height);
        }

        ScreenResolution::new(width.into(), height.into())
    }
}
