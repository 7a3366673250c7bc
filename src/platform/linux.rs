use anyhow::{Context, Result};
use std::ffi::CStr;
use std::mem::MaybeUninit;
use x11rb::connection::Connection;
use x11rb::rust_connection::RustConnection;

use super::{PlatformProbe, ScreenResolution};

/// An open connection to a display server
///
/// Implementors release the server-side connection when dropped, so a
/// connection is closed exactly once on every exit path of the caller.
pub trait DisplayConnection {
    /// Width and height in pixels of the connection's default screen
    fn default_screen_size(&self) -> Result<(i64, i64)>;
}

/// A display server that connections can be opened against
pub trait DisplayServer {
    type Connection: DisplayConnection;

    fn open(&self) -> Result<Self::Connection>;
}

/// The X server named by `$DISPLAY` (or an explicit display name)
#[derive(Debug, Default)]
pub struct X11Server {
    display_name: Option<String>,
}

#[cfg(test)]
impl X11Server {
    pub fn with_display(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
        }
    }
}

impl DisplayServer for X11Server {
    type Connection = X11Connection;

    fn open(&self) -> Result<X11Connection> {
        let name = self.display_name.as_deref();
        let (conn, screen_num) = x11rb::connect(name).with_context(|| {
            format!(
                "Failed to open X display {}",
                name.unwrap_or("from $DISPLAY")
            )
        })?;

        tracing::debug!("Opened X display connection, default screen {}", screen_num);

        Ok(X11Connection { conn, screen_num })
    }
}

/// Live X11 connection, closed when dropped
pub struct X11Connection {
    conn: RustConnection,
    screen_num: usize,
}

impl DisplayConnection for X11Connection {
    fn default_screen_size(&self) -> Result<(i64, i64)> {
        let screen = self
            .conn
            .setup()
            .roots
            .get(self.screen_num)
            .with_context(|| format!("X server has no screen {}", self.screen_num))?;

        Ok((
            screen.width_in_pixels.into(),
            screen.height_in_pixels.into(),
        ))
    }
}

impl Drop for X11Connection {
    fn drop(&mut self) {
        // The socket itself is shut down when `conn` is dropped right after this
        tracing::debug!("Closing X display connection");
    }
}

/// POSIX probe: `uname(2)` for the OS identity, the X server for the display
#[derive(Debug)]
pub struct LinuxProbe<D: DisplayServer = X11Server> {
    display: D,
}

impl Default for LinuxProbe {
    fn default() -> Self {
        Self::with_display_server(X11Server::default())
    }
}

impl<D: DisplayServer> LinuxProbe<D> {
    pub fn with_display_server(display: D) -> Self {
        Self { display }
    }
}

impl<D: DisplayServer> PlatformProbe for LinuxProbe<D> {
    fn query_os_identity(&self) -> Result<String> {
        let (sysname, release) = uname()?;
        Ok(format!("{} {}", sysname, release))
    }

    fn query_screen_resolution(&self) -> Result<ScreenResolution> {
        let connection = self.display.open()?;
        let (width, height) = connection.default_screen_size()?;
        ScreenResolution::new(width, height)
    }
}

/// Kernel name and release, e.g. `("Linux", "6.1.0-13-amd64")`
fn uname() -> Result<(String, String)> {
    let mut uts = MaybeUninit::<libc::utsname>::uninit();

    let rc = unsafe { libc::uname(uts.as_mut_ptr()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error()).context("uname failed");
    }

    // SAFETY: uname returned 0, so every field holds a NUL-terminated string
    let uts = unsafe { uts.assume_init() };
    let sysname = unsafe { CStr::from_ptr(uts.sysname.as_ptr()) };
    let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };

    Ok((
        sysname.to_string_lossy().into_owned(),
        release.to_string_lossy().into_owned(),
    ))
}
