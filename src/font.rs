//! Locating and loading the TrueType font used for on-screen text.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::StartupError;

use log::{info, warn};

pub const FONT_NAME: &str = "arial.ttf";

/// Tried when the font is not in the working directory
pub const FALLBACK_FONT_PATH: &str = "/usr/share/fonts/truetype/msttcorefonts/arial.ttf";

// sfnt version tags: TrueType 1.0, Apple 'true', OpenType with CFF outlines
const SFNT_SIGNATURES: [[u8; 4]; 3] = [[0x00, 0x01, 0x00, 0x00], *b"true", *b"OTTO"];

#[derive(Debug)]
pub struct Font {
    path: PathBuf,
}

impl Font {
    /// Loads the font from the working directory, then from the fallback path.
    pub fn load_default() -> Result<Self, StartupError> {
        match std::env::current_dir() {
            Ok(cwd) => info!("current working directory: {}", cwd.display()),
            Err(e) => warn!("error getting current directory: {}", e),
        }

        let candidates = [PathBuf::from(FONT_NAME), PathBuf::from(FALLBACK_FONT_PATH)];
        let path = locate(&candidates).ok_or_else(|| StartupError::FontNotFound {
            name: FONT_NAME.to_string(),
            searched: candidates.to_vec(),
        })?;

        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let read_err = |source| StartupError::FontRead { path: path.to_path_buf(), source };

        // Only the sfnt header is needed to tell a font apart from anything else
        let mut header = Vec::with_capacity(4);
        File::open(path)
            .and_then(|f| f.take(4).read_to_end(&mut header))
            .map_err(read_err)?;

        if !is_sfnt(&header) {
            return Err(StartupError::NotTrueType(path.to_path_buf()));
        }

        info!("loaded font {}", path.display());
        Ok(Font { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Font { path: PathBuf::from("test.ttf") }
    }
}

/// First candidate that exists as a file.
pub fn locate(candidates: &[PathBuf]) -> Option<&Path> {
    candidates.iter().map(PathBuf::as_path).find(|p| {
        let found = p.is_file();
        if !found {
            warn!("font not found at {}", p.display());
        }
        found
    })
}

fn is_sfnt(data: &[u8]) -> bool {
    data.len() >= 4 && SFNT_SIGNATURES.iter().any(|sig| data[..4] == sig[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("grid-snake-font-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_locate_prefers_first_existing() {
        let second = scratch_file("second.ttf", &[0, 1, 0, 0]);
        let third = scratch_file("third.ttf", &[0, 1, 0, 0]);
        let candidates = vec![PathBuf::from("/definitely/not/here.ttf"), second.clone(), third];
        assert_eq!(locate(&candidates), Some(second.as_path()));
    }

    #[test]
    fn test_locate_nothing() {
        let candidates = vec![PathBuf::from("/definitely/not/here.ttf")];
        assert_eq!(locate(&candidates), None);
    }

    #[test]
    fn test_load_truetype() {
        let mut contents = vec![0x00, 0x01, 0x00, 0x00];
        contents.extend_from_slice(&[0u8; 60]);
        let path = scratch_file("good.ttf", &contents);

        let font = Font::load(&path).unwrap();
        assert_eq!(font.path(), path.as_path());
    }

    #[test]
    fn test_header_alone_is_enough() {
        let path = scratch_file("header-only.ttf", b"OTTO");
        assert_eq!(Font::load(&path).unwrap().path(), path.as_path());
    }

    #[test]
    fn test_load_rejects_non_font() {
        let path = scratch_file("bogus.ttf", b"<html>not a font</html>");
        assert!(matches!(Font::load(&path), Err(StartupError::NotTrueType(_))));

        let short = scratch_file("short.ttf", b"OT");
        assert!(matches!(Font::load(&short), Err(StartupError::NotTrueType(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Font::load(Path::new("/definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, StartupError::FontRead { .. }));
    }
}
