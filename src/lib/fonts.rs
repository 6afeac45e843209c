//! Discovery of TrueType font resources on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const FONT_EXTENSION: &str = "ttf";

pub const BFONT_EXTENSION: &str = "bfont";

/// File names in `folder` with a `.ttf` extension, sorted.
pub fn list_font_resources<P: AsRef<Path>>(folder: P) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let is_font = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case(FONT_EXTENSION));
        if let (true, Some(name)) = (is_font, path.file_name().and_then(|n| n.to_str())) {
            names.push(name.to_owned());
        }
    }

    names.sort();
    Ok(names)
}

pub fn system_font_folder() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        Some(PathBuf::from(r"C:\Windows\Fonts"))
    } else if cfg!(target_os = "macos") {
        Some(PathBuf::from("/System/Library/Fonts"))
    } else if cfg!(target_os = "linux") {
        Some(PathBuf::from("/usr/share/fonts"))
    } else {
        None
    }
}

/// `DejaVuSans.ttf` at size 15 becomes `DejaVuSans15.bfont`.
pub fn default_output_name(font_name: &str, font_size: u8) -> PathBuf {
    let stem = Path::new(font_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(font_name);

    PathBuf::from(format!("{stem}{font_size}.{BFONT_EXTENSION}"))
}
