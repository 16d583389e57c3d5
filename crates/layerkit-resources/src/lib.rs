//! # layerkit-resources
//!
//! Discovery of `.cube` LUTs and font files.
//!
//! An install directory may hold a `resource_dir.ini` that points at custom
//! locations:
//!
//! ```text
//! LUT_dir=/path/to/luts
//! FONT_dir=/path/to/fonts
//! ```
//!
//! Missing or invalid entries fall back to `<install>/lut` and
//! `<install>/font`. The resulting [`ResourceConfig`] is an immutable value
//! handed to whoever needs a LUT or font by name.
//!
//! # Usage
//!
//! ```rust,no_run
//! use layerkit_resources::ResourceConfig;
//!
//! let resources = ResourceConfig::load("/opt/layerkit");
//! for name in resources.lut_names() {
//!     println!("{name}");
//! }
//! let lut = resources.load_lut("film.cube")?;
//! # Ok::<(), layerkit_resources::ResourceError>(())
//! ```
//!
//! # Dependencies
//!
//! - `layerkit-lut` - `.cube` parsing
//! - `glob` - File enumeration
//! - `tracing` - Fallback warnings and discovery summaries
//!
//! # Used By
//!
//! - `layerkit-cli` - `resources` and `lut` commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub use error::{ResourceError, ResourceResult};

use layerkit_lut::{read_cube, CubeLut};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Name of the optional directory override file.
pub const INI_NAME: &str = "resource_dir.ini";

const LUT_KEY: &str = "LUT_dir=";
const FONT_KEY: &str = "FONT_dir=";

/// LUT and font files available by file name.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    lut_dir: PathBuf,
    font_dir: PathBuf,
    luts: BTreeMap<String, PathBuf>,
    fonts: BTreeMap<String, PathBuf>,
}

impl ResourceConfig {
    /// Resolves directories from `install_dir` and enumerates them.
    ///
    /// Never fails: unreadable settings and missing directories are logged
    /// and replaced by the defaults.
    pub fn load(install_dir: impl AsRef<Path>) -> Self {
        let install_dir = install_dir.as_ref();
        let mut lut_dir = install_dir.join("lut");
        let mut font_dir = install_dir.join("font");

        let ini = install_dir.join(INI_NAME);
        match fs::read_to_string(&ini) {
            Ok(text) => {
                for line in text.lines() {
                    if let Some(value) = line.strip_prefix(LUT_KEY) {
                        lut_dir = configured_dir(value, lut_dir, "LUT");
                    } else if let Some(value) = line.strip_prefix(FONT_KEY) {
                        font_dir = configured_dir(value, font_dir, "FONT");
                    }
                }
            }
            Err(e) => {
                error!(path = %ini.display(), "Cannot read {}: {}; using default directories", INI_NAME, e);
            }
        }

        Self::from_dirs(lut_dir, font_dir)
    }

    /// Enumerates the given directories directly, without an ini file.
    pub fn from_dirs(lut_dir: impl Into<PathBuf>, font_dir: impl Into<PathBuf>) -> Self {
        let lut_dir = lut_dir.into();
        let font_dir = font_dir.into();

        let luts = scan_or_empty(&lut_dir, &["cube"]);
        let fonts = scan_or_empty(&font_dir, &["ttf", "otf"]);
        info!(count = luts.len(), dir = %lut_dir.display(), "Found LUT files");
        info!(count = fonts.len(), dir = %font_dir.display(), "Found font files");

        Self {
            lut_dir,
            font_dir,
            luts,
            fonts,
        }
    }

    /// Directory searched for `.cube` files.
    pub fn lut_dir(&self) -> &Path {
        &self.lut_dir
    }

    /// Directory searched for fonts.
    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }

    /// LUT file names, sorted.
    pub fn lut_names(&self) -> impl Iterator<Item = &str> {
        self.luts.keys().map(String::as_str)
    }

    /// Full path of a LUT by file name.
    pub fn lut_path(&self, name: &str) -> Option<&Path> {
        self.luts.get(name).map(PathBuf::as_path)
    }

    /// Font file names, sorted.
    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Full path of a font by file name.
    pub fn font_path(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    /// Reads and parses a LUT by file name.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown name and
    /// [`ResourceError::Lut`] when the file does not parse.
    pub fn load_lut(&self, name: &str) -> ResourceResult<CubeLut> {
        let path = self
            .lut_path(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))?;
        Ok(read_cube(path)?)
    }
}

/// Uses `value` as a directory if it exists, otherwise keeps `default`.
fn configured_dir(value: &str, default: PathBuf, kind: &str) -> PathBuf {
    let dir = PathBuf::from(value.trim());
    if dir.is_dir() {
        debug!(kind, dir = %dir.display(), "Using configured directory");
        dir
    } else {
        warn!(
            kind,
            configured = %dir.display(),
            fallback = %default.display(),
            "Configured directory does not exist, using default"
        );
        default
    }
}

fn scan_or_empty(dir: &Path, extensions: &[&str]) -> BTreeMap<String, PathBuf> {
    scan_dir(dir, extensions).unwrap_or_else(|e| {
        error!(dir = %dir.display(), "Cannot list resources: {}", e);
        BTreeMap::new()
    })
}

/// Lists files in `dir` with any of `extensions`, keyed by file name.
///
/// A directory that doesn't exist yields an empty map.
pub fn scan_dir(dir: &Path, extensions: &[&str]) -> ResourceResult<BTreeMap<String, PathBuf>> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut found = BTreeMap::new();

    for ext in extensions {
        let pattern = format!("{}/*.{}", base, ext);
        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                found.insert(name.to_string(), path.clone());
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_defaults_without_ini() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("lut")).unwrap();
        fs::create_dir(root.path().join("font")).unwrap();
        touch(&root.path().join("lut"), "b.cube", "0 0 0\n");
        touch(&root.path().join("lut"), "a.cube", "0 0 0\n");
        touch(&root.path().join("lut"), "notes.txt", "");
        touch(&root.path().join("font"), "Sans.ttf", "");
        touch(&root.path().join("font"), "Serif.otf", "");

        let cfg = ResourceConfig::load(root.path());
        assert_eq!(cfg.lut_dir(), root.path().join("lut"));
        assert_eq!(cfg.lut_names().collect::<Vec<_>>(), vec!["a.cube", "b.cube"]);
        assert_eq!(cfg.font_names().collect::<Vec<_>>(), vec!["Sans.ttf", "Serif.otf"]);
        assert!(cfg.lut_path("notes.txt").is_none());
        assert_eq!(
            cfg.font_path("Serif.otf"),
            Some(root.path().join("font").join("Serif.otf").as_path())
        );
    }

    #[test]
    fn test_ini_overrides_and_fallback() {
        let root = TempDir::new().unwrap();
        let custom = TempDir::new().unwrap();
        touch(custom.path(), "grade.cube", "TITLE \"x\"\n0.5 0.5 0.5\n");
        touch(
            root.path(),
            INI_NAME,
            &format!(
                "LUT_dir={}  \nFONT_dir=/definitely/not/here\n",
                custom.path().display()
            ),
        );

        let cfg = ResourceConfig::load(root.path());
        assert_eq!(cfg.lut_dir(), custom.path());
        assert_eq!(cfg.font_dir(), root.path().join("font"));
        assert_eq!(cfg.font_names().count(), 0);

        let lut = cfg.load_lut("grade.cube").unwrap();
        assert_eq!(lut.len(), 1);
        assert!(matches!(cfg.load_lut("missing.cube"), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_broken_lut_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "bad.cube", "0 0 0\n0 x0 0\n1 1\n");
        let cfg = ResourceConfig::from_dirs(dir.path(), dir.path());
        assert!(matches!(cfg.load_lut("bad.cube"), Err(ResourceError::Lut(_))));
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let found = scan_dir(Path::new("/definitely/not/here"), &["cube"]).unwrap();
        assert!(found.is_empty());
    }
}
