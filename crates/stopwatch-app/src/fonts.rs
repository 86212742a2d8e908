use std::path::Path;

/// Common locations of a sans-serif font on Linux, macOS and Windows.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bytes of the first readable, non-empty file in `paths`.
pub fn load_first<P: AsRef<Path>>(paths: &[P]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| {
        let p = p.as_ref();
        match std::fs::read(p) {
            Ok(bytes) if !bytes.is_empty() => {
                log::debug!("using font {}", p.display());
                Some(bytes)
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stopwatch-fonts-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn skips_missing_and_empty_files() {
        let empty = scratch("empty", b"");
        let font = scratch("font", b"not really a font");
        let missing = std::env::temp_dir().join("stopwatch-fonts-definitely-missing.ttf");

        let found = load_first(&[missing, empty.clone(), font.clone()]);
        assert_eq!(found.as_deref(), Some(&b"not really a font"[..]));

        std::fs::remove_file(empty).unwrap();
        std::fs::remove_file(font).unwrap();
    }

    #[test]
    fn nothing_found_is_none() {
        let missing = std::env::temp_dir().join("stopwatch-fonts-also-missing.ttf");
        assert_eq!(load_first(&[missing]), None);
    }
}
