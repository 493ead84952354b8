//! Capability-probed fullscreen shim.
//!
//! Terminals expose no common fullscreen API, so the shim holds an ordered
//! list of [`FullscreenDriver`] candidates and invokes the first one whose
//! `detect()` passes, probed separately for the enter and exit paths. With no
//! detected driver the toggle is a silent no-op. Driver failures are logged
//! and swallowed: there is nowhere better to surface them.

use std::io::Write;
use std::process::Command;

/// One host mechanism for switching the surface in and out of fullscreen.
pub trait FullscreenDriver: Send {
    /// Short identifier, for logs.
    fn name(&self) -> &'static str;

    /// Whether this mechanism is present in the current environment.
    fn detect(&self) -> bool;

    fn enter(&mut self) -> std::io::Result<()>;

    fn exit(&mut self) -> std::io::Result<()>;
}

/// Ordered capability probe over fullscreen drivers.
///
/// Tracks last-commanded state for the toggle decision; terminals have no
/// portable way to query it back.
pub struct FullscreenShim {
    drivers: Vec<Box<dyn FullscreenDriver>>,
    active: bool,
}

impl FullscreenShim {
    #[must_use]
    pub fn new(drivers: Vec<Box<dyn FullscreenDriver>>) -> Self {
        Self {
            drivers,
            active: false,
        }
    }

    /// Shim with the built-in driver list (see [`default_drivers`]).
    #[must_use]
    pub fn with_default_drivers() -> Self {
        Self::new(default_drivers())
    }

    /// Whether the surface is (as last commanded) fullscreen.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle fullscreen through the first detected driver.
    ///
    /// No detected driver: nothing happens, no error, state unchanged.
    pub fn toggle(&mut self) {
        let leaving = self.active;
        let Some(driver) = self.drivers.iter_mut().find(|d| d.detect()) else {
            tracing::debug!("no fullscreen driver detected; toggle ignored");
            return;
        };

        let result = if leaving {
            driver.exit()
        } else {
            driver.enter()
        };

        match result {
            Ok(()) => {
                self.active = !leaving;
                tracing::debug!(
                    "fullscreen {} via {}",
                    if leaving { "exited" } else { "entered" },
                    driver.name()
                );
            }
            Err(e) => {
                tracing::warn!("fullscreen driver {} failed: {e}", driver.name());
            }
        }
    }
}

/// Built-in driver list, probed in order: the de-facto-standard xterm
/// window-ops escape, then tmux, kitty, and wezterm specifics.
#[must_use]
pub fn default_drivers() -> Vec<Box<dyn FullscreenDriver>> {
    vec![
        Box::new(XtermWindowOps),
        Box::new(TmuxZoom),
        Box::new(KittyOsWindow),
        Box::new(WeztermWindowOps),
    ]
}

/// xterm window operations: CSI 10;1t enters fullscreen, CSI 10;0t leaves.
struct XtermWindowOps;

impl XtermWindowOps {
    fn emit(sequence: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(sequence.as_bytes())?;
        stdout.flush()
    }
}

impl FullscreenDriver for XtermWindowOps {
    fn name(&self) -> &'static str {
        "xterm"
    }

    fn detect(&self) -> bool {
        // Inside tmux the escape would hit the multiplexer, not the terminal.
        std::env::var_os("TMUX").is_none()
            && std::env::var("TERM").is_ok_and(|term| term.starts_with("xterm"))
            && std::env::var_os("KITTY_WINDOW_ID").is_none()
    }

    fn enter(&mut self) -> std::io::Result<()> {
        Self::emit("\x1b[10;1t")
    }

    fn exit(&mut self) -> std::io::Result<()> {
        Self::emit("\x1b[10;0t")
    }
}

/// tmux pane zoom. tmux only exposes a zoom *toggle*, so both paths issue
/// it; the shim's state tracking keeps the two in step.
struct TmuxZoom;

impl TmuxZoom {
    fn zoom() -> std::io::Result<()> {
        let status = Command::new("tmux").args(["resize-pane", "-Z"]).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "tmux resize-pane exited with {status}"
            )))
        }
    }
}

impl FullscreenDriver for TmuxZoom {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn detect(&self) -> bool {
        std::env::var_os("TMUX").is_some()
    }

    fn enter(&mut self) -> std::io::Result<()> {
        Self::zoom()
    }

    fn exit(&mut self) -> std::io::Result<()> {
        Self::zoom()
    }
}

/// kitty remote control for the OS window.
struct KittyOsWindow;

impl KittyOsWindow {
    fn resize(action: &str) -> std::io::Result<()> {
        let status = Command::new("kitten")
            .args(["@", "resize-os-window", "--action", action])
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "kitten resize-os-window exited with {status}"
            )))
        }
    }
}

impl FullscreenDriver for KittyOsWindow {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn detect(&self) -> bool {
        std::env::var_os("KITTY_WINDOW_ID").is_some()
    }

    fn enter(&mut self) -> std::io::Result<()> {
        Self::resize("fullscreen")
    }

    fn exit(&mut self) -> std::io::Result<()> {
        Self::resize("fullscreen")
    }
}

/// wezterm honors the xterm window-ops escapes.
struct WeztermWindowOps;

impl FullscreenDriver for WeztermWindowOps {
    fn name(&self) -> &'static str {
        "wezterm"
    }

    fn detect(&self) -> bool {
        std::env::var_os("WEZTERM_PANE").is_some() && std::env::var_os("TMUX").is_none()
    }

    fn enter(&mut self) -> std::io::Result<()> {
        XtermWindowOps::emit("\x1b[10;1t")
    }

    fn exit(&mut self) -> std::io::Result<()> {
        XtermWindowOps::emit("\x1b[10;0t")
    }
}
