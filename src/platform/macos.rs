use anyhow::{Context, Result};
use core_graphics::display::CGDisplay;
use std::ffi::CStr;

use super::{PlatformProbe, ScreenResolution};

/// Size of the buffer handed to sysctl for `kern.osversion`
const OS_VERSION_BUFFER_LEN: usize = 256;

/// macOS probe: `kern.osversion` via sysctl, the main display via CoreGraphics
#[derive(Debug, Default)]
pub struct MacosProbe;

impl PlatformProbe for MacosProbe {
    fn query_os_identity(&self) -> Result<String> {
        let build = os_build_version()?;
        Ok(format!("macOS {}", build))
    }

    /// CoreGraphics has no error channel here; an invalid display comes back
    /// as an empty rectangle, which `ScreenResolution::new` rejects.
    fn query_screen_resolution(&self) -> Result<ScreenResolution> {
        let bounds = CGDisplay::main().bounds();
        ScreenResolution::new(bounds.size.width as i64, bounds.size.height as i64)
            .context("CoreGraphics returned empty bounds for the main display")
    }
}

/// OS build string, e.g. `23F79`
fn os_build_version() -> Result<String> {
    let mut mib = [libc::CTL_KERN, libc::KERN_OSVERSION];
    let mut buffer = [0u8; OS_VERSION_BUFFER_LEN];
    let mut len: libc::size_t = buffer.len();

    let rc = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            mib.len() as libc::c_uint,
            buffer.as_mut_ptr().cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error()).context("sysctl kern.osversion failed");
    }

    let version = CStr::from_bytes_until_nul(&buffer[..len.min(buffer.len())])
        .context("sysctl kern.osversion returned an unterminated string")?;

    Ok(version.to_string_lossy().into_owned())
}
