//! Hand-off of encoded bytes to something that shows them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;

use crate::foundation::error::{SketchError, SketchResult};

/// How a presented image is shown by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Full screen.
    #[default]
    Fullscreen,
    /// Modal sheet.
    Sheet,
    /// Popover anchored to the caller.
    Popover,
    /// Side panel.
    Panel,
    /// Sidebar.
    Sidebar,
}

impl DisplayMode {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fullscreen => "fullscreen",
            Self::Sheet => "sheet",
            Self::Popover => "popover",
            Self::Panel => "panel",
            Self::Sidebar => "sidebar",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullscreen" => Ok(Self::Fullscreen),
            "sheet" => Ok(Self::Sheet),
            "popover" => Ok(Self::Popover),
            "panel" => Ok(Self::Panel),
            "sidebar" => Ok(Self::Sidebar),
            other => Err(SketchError::usage(format!("unknown display mode '{other}'"))),
        }
    }
}

/// Something that can show encoded image bytes.
pub trait Presenter {
    /// Show `bytes` (PNG or GIF) in the given mode.
    fn present(&mut self, bytes: &[u8], mode: DisplayMode) -> SketchResult<()>;
}

/// Writes each presented image to a fresh file in a directory.
#[derive(Clone, Debug)]
pub struct TempFilePresenter {
    dir: PathBuf,
    last: Option<PathBuf>,
}

impl Default for TempFilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TempFilePresenter {
    /// Presenter writing into the system temp directory.
    pub fn new() -> Self {
        Self::in_dir(std::env::temp_dir())
    }

    /// Presenter writing into `dir`, created on first use.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last: None,
        }
    }

    /// Path of the most recently written file.
    pub fn last_path(&self) -> Option<&Path> {
        self.last.as_deref()
    }
}

impl Presenter for TempFilePresenter {
    fn present(&mut self, bytes: &[u8], mode: DisplayMode) -> SketchResult<()> {
        static SEQ: AtomicU64 = AtomicU64::new(0);

        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create preview directory '{}'", self.dir.display())
        })?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let name = format!(
            "sketchlog-{}-{stamp}-{}.{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed),
            extension_for(bytes)
        );
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write preview '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), %mode, "preview written");
        self.last = Some(path);
        Ok(())
    }
}

fn extension_for(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"GIF8") {
        "gif"
    } else if bytes.starts_with(b"\x89PNG") {
        "png"
    } else {
        "bin"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/preview.rs"]
mod tests;
