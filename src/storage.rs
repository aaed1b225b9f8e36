//! Host-side persistence and clock.
//!
//! [`DirStore`] keeps one file per key under a data directory. Writes go to a
//! temporary file first and are renamed into place, so a crash mid-save never
//! leaves a truncated record behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::core::{Clock, ScoreStore};

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Use `root` as the data directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(path = %root.display(), "opened score store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding `key`. Anything but ASCII alphanumerics, `-`, `_` and `.`
    /// is replaced so a key can never escape the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = match name.trim_start_matches('.') {
            "" => "_",
            trimmed => trimmed,
        };
        self.root.join(format!("{name}.bin"))
    }
}

impl ScoreStore for DirStore {
    fn save(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("bin.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&mut self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Wall-clock anchored, monotonic millisecond clock.
///
/// Starts at the Unix time of creation and advances with [`Instant`], so
/// readings differ between runs but never go backwards within one.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
    origin_ms: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        let origin_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            origin: Instant::now(),
            origin_ms,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn millis(&self) -> u64 {
        self.origin_ms
            .wrapping_add(self.origin.elapsed().as_millis() as u64)
    }
}
