//! Photo discovery and lookup.
//!
//! The core never touches the filesystem itself: it asks an
//! [`AssetProvider`] for an ordered list once at startup and wraps the
//! result in an [`AssetList`], which is guaranteed non-empty.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::ImageRef;

/// Shown wherever a photo is needed but none were found.
pub const PLACEHOLDER_URL: &str = "https://media.giphy.com/media/xT9IgG50Fb7Mi0prBC/giphy.gif";

/// Extensions picked up by [`DirAssetProvider`] (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "svg"];

/// Substring identifying the birthday person's portrait.
pub const SUBJECT_HINT: &str = "avatar";

/// Substring identifying the author's portrait.
pub const AUTHOR_HINT: &str = "dev";

// ============================================================================
// PROVIDERS
// ============================================================================

/// Source of image references, injected at startup.
pub trait AssetProvider {
    /// Ordered list of available images. May be empty.
    fn list_assets(&self) -> Vec<ImageRef>;
}

/// Enumerates image files under a directory.
#[derive(Debug, Clone)]
pub struct DirAssetProvider {
    root: PathBuf,
    max_depth: usize,
}

impl DirAssetProvider {
    /// Provider for the files directly inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirAssetProvider {
            root: root.into(),
            max_depth: 1,
        }
    }

    /// Descend up to `max_depth` levels (1 = only `root` itself).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}

impl AssetProvider for DirAssetProvider {
    fn list_assets(&self) -> Vec<ImageRef> {
        if !self.root.is_dir() {
            tracing::warn!(root = %self.root.display(), "asset directory not found");
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable asset entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_image(path))
            .collect();

        // Directory iteration order is platform-dependent
        paths.sort();

        tracing::info!(root = %self.root.display(), count = paths.len(), "assets discovered");
        paths.into_iter().map(ImageRef::from_path).collect()
    }
}

/// Fixed, in-memory list of images.
#[derive(Debug, Clone, Default)]
pub struct StaticAssetProvider {
    images: Vec<ImageRef>,
}

impl StaticAssetProvider {
    pub fn new(images: Vec<ImageRef>) -> Self {
        StaticAssetProvider { images }
    }
}

impl AssetProvider for StaticAssetProvider {
    fn list_assets(&self) -> Vec<ImageRef> {
        self.images.clone()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

// ============================================================================
// ASSET LIST
// ============================================================================

/// Ordered, never-empty list of photos.
///
/// Built once from a provider; immutable afterwards. `discovered` keeps
/// the raw enumeration so symbolic lookups can distinguish "found" from
/// "fell back to the placeholder".
#[derive(Debug, Clone)]
pub struct AssetList {
    photos: Vec<ImageRef>,
    discovered: usize,
}

impl AssetList {
    /// Load from a provider, substituting the placeholder if it yields nothing.
    pub fn load(provider: &dyn AssetProvider) -> Self {
        Self::from_images(provider.list_assets())
    }

    pub fn from_images(images: Vec<ImageRef>) -> Self {
        if images.is_empty() {
            tracing::info!("no photos found, using placeholder");
            return AssetList {
                photos: vec![placeholder()],
                discovered: 0,
            };
        }
        let discovered = images.len();
        AssetList {
            photos: images,
            discovered,
        }
    }

    /// Number of usable photos (at least 1).
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of photos the provider actually returned (may be 0).
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    pub fn photos(&self) -> &[ImageRef] {
        &self.photos
    }

    pub fn first(&self) -> &ImageRef {
        &self.photos[0]
    }

    /// Photo at `index`, wrapping around so any index is valid.
    pub fn get(&self, index: usize) -> &ImageRef {
        &self.photos[index % self.photos.len()]
    }

    /// First discovered photo whose identifier contains `needle`.
    pub fn find(&self, needle: &str) -> Option<&ImageRef> {
        self.photos[..self.discovered]
            .iter()
            .find(|img| img.matches(needle))
    }

    /// Portrait for the subject page: an `avatar` match, else the first photo.
    pub fn subject_portrait(&self) -> ImageRef {
        self.find(SUBJECT_HINT)
            .unwrap_or_else(|| self.first())
            .clone()
    }

    /// Portrait for the author page: a `dev` match, else the placeholder.
    pub fn author_portrait(&self) -> ImageRef {
        self.find(AUTHOR_HINT).cloned().unwrap_or_else(placeholder)
    }
}

/// The fallback image reference.
pub fn placeholder() -> ImageRef {
    ImageRef::from_url(PLACEHOLDER_URL)
}

// ============================================================================
// TESTS
// ============================================================================
