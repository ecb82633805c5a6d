//! Static assets for the guide site.
//!
//! Provides a single API for the stylesheet and scripts in both embedded and
//! filesystem modes:
//!
//! - **`embed` feature on**: assets are compiled into the binary via `rust-embed`
//! - **`embed` feature off**: assets are read from this crate's `assets/`
//!   directory at runtime, so edits show up without a rebuild

use std::borrow::Cow;
#[cfg(not(feature = "embed"))]
use std::path::Path;

/// Embedded assets (only available with `embed` feature).
#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "assets"]
struct Assets;

#[cfg(not(feature = "embed"))]
const ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

const OCTET_STREAM: &str = "application/octet-stream";

/// Get an asset by path (relative to `assets/`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[cfg(feature = "embed")]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Get an asset by path (relative to `assets/`).
///
/// Returns the file contents if the asset exists, `None` otherwise. Paths
/// that try to leave the asset directory are rejected.
#[cfg(not(feature = "embed"))]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.split(['/', '\\']).any(|part| part == "..") {
        return None;
    }
    std::fs::read(Path::new(ASSET_DIR).join(path))
        .ok()
        .map(Cow::Owned)
}

/// Iterate all available asset paths.
#[cfg(feature = "embed")]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Iterate all available asset paths.
#[cfg(not(feature = "embed"))]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    let entries = std::fs::read_dir(ASSET_DIR)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned());
    entries.map(Cow::Owned)
}

/// Return the MIME type string for the given file path.
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_types() {
        assert_eq!(mime_for("style.css"), "text/css");
        assert_eq!(mime_for("copy.js"), "text/javascript");
        assert_eq!(mime_for("image.png"), "image/png");
    }

    #[test]
    fn test_mime_for_unknown_type() {
        assert_eq!(mime_for("file.unknown_ext_xyz"), OCTET_STREAM);
    }

    #[test]
    fn test_site_assets_present() {
        let css = get("style.css").unwrap();
        assert!(std::str::from_utf8(&css).unwrap().contains(".mermaid-chart-wrapper"));
        let js = get("copy.js").unwrap();
        assert!(std::str::from_utf8(&js).unwrap().contains("copy-button"));
    }

    #[test]
    fn test_iter_lists_assets() {
        let mut names: Vec<String> = iter().map(Cow::into_owned).collect();
        names.sort();
        assert_eq!(names, vec!["copy.js", "style.css"]);
    }

    #[test]
    fn test_get_nonexistent_asset() {
        assert!(get("nonexistent_file_that_does_not_exist.txt").is_none());
    }

    #[cfg(not(feature = "embed"))]
    #[test]
    fn test_get_rejects_parent_components() {
        assert!(get("../Cargo.toml").is_none());
    }
}
