//! Input/output naming rules
//!
//! - `.xyz` input is lon-first, `.yxz` input is lat-first
//! - output always ends in `.llz` (appended, never substituted)
//! - header comment names the input file and the tool version

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use llz::LLZ_EXT;

use crate::decode::CoordOrder;

/// Tool name and version recorded in every header
pub const TOOL_VERSION: &str = concat!("xyz2llz V", env!("CARGO_PKG_VERSION"));

/// Input file extension for lon/lat/z files
pub const XYZ_EXT: &str = "xyz";

/// Input file extension for lat/lon/z files
pub const YXZ_EXT: &str = "yxz";

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("input file {0:?} must end in .xyz or .yxz")]
    UnsupportedInput(PathBuf),
}

impl CoordOrder {
    /// Pick the field order from the input file extension.
    pub fn from_input_path(path: &Path) -> Result<Self, PathError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            XYZ_EXT => Ok(Self::LonLat),
            YXZ_EXT => Ok(Self::LatLon),
            _ => Err(PathError::UnsupportedInput(path.to_path_buf())),
        }
    }
}

/// Append `.llz` unless the path already ends with it.
pub fn normalize_output_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|e| e == LLZ_EXT) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(LLZ_EXT);
    PathBuf::from(name)
}

/// Provenance text stored in the LLZ header.
pub fn header_comment(input: &Path) -> String {
    let base = input
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| input.to_string_lossy());
    format!("Created from {} using {}", base, TOOL_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_extension() {
        assert_eq!(
            CoordOrder::from_input_path(Path::new("data/test.xyz")).unwrap(),
            CoordOrder::LonLat
        );
        assert_eq!(
            CoordOrder::from_input_path(Path::new("test.yxz")).unwrap(),
            CoordOrder::LatLon
        );
        assert_eq!(
            CoordOrder::from_input_path(Path::new("TEST.YXZ")).unwrap(),
            CoordOrder::LatLon
        );
    }

    #[test]
    fn test_unsupported_input() {
        for name in ["points.txt", "points", "xyz", "points.xyz.bak"] {
            assert!(
                CoordOrder::from_input_path(Path::new(name)).is_err(),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_output_keeps_llz_suffix() {
        assert_eq!(
            normalize_output_path(Path::new("out/grid.llz")),
            PathBuf::from("out/grid.llz")
        );
    }

    #[test]
    fn test_output_suffix_appended() {
        assert_eq!(
            normalize_output_path(Path::new("grid")),
            PathBuf::from("grid.llz")
        );
        assert_eq!(
            normalize_output_path(Path::new("grid.dat")),
            PathBuf::from("grid.dat.llz")
        );
    }

    #[test]
    fn test_header_comment_uses_basename() {
        let comment = header_comment(Path::new("/data/surveys/line1.xyz"));
        assert_eq!(comment, format!("Created from line1.xyz using {TOOL_VERSION}"));
        assert!(TOOL_VERSION.starts_with("xyz2llz V"));
    }
}
