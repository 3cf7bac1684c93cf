//! Domain types for hbd.
//!
//! Everything the pages, the router and the engines pass between each
//! other lives here. No behavior beyond constructors and formatting.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

// ============================================================================
// PAGES
// ============================================================================

/// Identifier of a page. The set is closed: there is no invalid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    /// Landing page: hero, countdown, photo vault, open letter.
    #[default]
    Home,
    /// Profile of the birthday person ("THE SUSPECT").
    Subject,
    /// Profile of the author ("GIGU").
    Author,
}

impl PageId {
    /// All pages, in navigation-bar order.
    pub const ALL: [PageId; 3] = [PageId::Home, PageId::Subject, PageId::Author];

    /// Label shown in the navigation bar and menu.
    pub fn label(self) -> &'static str {
        match self {
            PageId::Home => "HOME",
            PageId::Subject => "THE SUS",
            PageId::Author => "GIGU",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageId::Home => "home",
            PageId::Subject => "subject",
            PageId::Author => "author",
        };
        f.write_str(name)
    }
}

// ============================================================================
// IMAGES
// ============================================================================

/// Opaque handle to a displayable image.
///
/// `locator` is a filesystem path or a URL. `title` is derived from the
/// file stem for display under the photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub locator: String,
    pub title: String,
}

impl ImageRef {
    /// Build a reference from a path, deriving the title from its stem.
    ///
    /// `my_photo.jpg` gets the title `my photo`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().replace('_', " "))
            .unwrap_or_default();
        ImageRef {
            locator: path.display().to_string(),
            title,
        }
    }

    /// Build a reference from a URL. The title is the last path segment's stem.
    pub fn from_url(url: &str) -> Self {
        let last = url.rsplit('/').next().unwrap_or(url);
        let stem = last.split('.').next().unwrap_or(last);
        ImageRef {
            locator: url.to_string(),
            title: stem.replace('_', " "),
        }
    }

    /// Whether the file name part of the locator contains `needle`.
    ///
    /// Directory components are ignored so a parent like `/home/dev/`
    /// does not match every photo.
    pub fn matches(&self, needle: &str) -> bool {
        self.locator
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.locator)
            .contains(needle)
    }
}

// ============================================================================
// COUNTDOWN
// ============================================================================

/// Elapsed wall-clock time, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Elapsed {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

// ============================================================================
// MEMORY
// ============================================================================

/// Current pick in the photo vault.
///
/// Holds indices rather than values so it can only point at members of
/// the asset list and the caption set. `caption == None` is the heading
/// shown before the first shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySelection {
    pub image: usize,
    pub caption: Option<usize>,
}

// ============================================================================
// CLOCK
// ============================================================================

/// A single reading of both clocks.
///
/// `instant` drives scheduling (monotonic), `wall` drives the countdown
/// (calendar time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    pub instant: Instant,
    pub wall: DateTime<Utc>,
}

impl Now {
    /// Read the system clocks.
    pub fn capture() -> Self {
        Now {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Startup configuration, built from CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory enumerated for photos.
    pub assets_dir: PathBuf,
    /// Maximum directory depth for asset discovery (1 = only the directory itself).
    pub max_depth: usize,
    /// Instant the countdown measures from.
    pub reference: DateTime<Utc>,
    /// Start in dark mode.
    pub dark_mode: bool,
}

/// 2023-08-01T00:00:00Z.
pub fn default_reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            assets_dir: PathBuf::from("assets/images"),
            max_depth: 1,
            reference: default_reference(),
            dark_mode: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_replaces_underscores_and_drops_extension() {
        let img = ImageRef::from_path("assets/images/my_photo_2.jpg");
        assert_eq!(img.title, "my photo 2");
        assert_eq!(img.locator, "assets/images/my_photo_2.jpg");
    }

    #[test]
    fn url_title_uses_last_segment() {
        let img = ImageRef::from_url("https://media.giphy.com/media/xT9IgG50Fb7Mi0prBC/giphy.gif");
        assert_eq!(img.title, "giphy");
    }

    #[test]
    fn matches_is_substring_on_locator() {
        let img = ImageRef::from_path("assets/images/avatar.png");
        assert!(img.matches("avatar"));
        assert!(!img.matches("dev"));
    }

    #[test]
    fn matches_ignores_directory_components() {
        let img = ImageRef::from_path("/home/dev/photos/beach.jpg");
        assert!(!img.matches("dev"));
        assert!(img.matches("beach"));
    }

    #[test]
    fn page_default_is_home() {
        assert_eq!(PageId::default(), PageId::Home);
    }

    #[test]
    fn page_serializes_lowercase() {
        let json = serde_json::to_string(&PageId::Subject).unwrap();
        assert_eq!(json, "\"subject\"");
    }

    #[test]
    fn default_reference_is_first_of_august_2023() {
        assert_eq!(default_reference().to_rfc3339(), "2023-08-01T00:00:00+00:00");
    }
}
