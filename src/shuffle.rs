//! Photo vault shuffler: random photo + random roast caption.

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};

use crate::assets::AssetList;
use crate::types::{ImageRef, MemorySelection};

/// Heading shown in the vault before the first shuffle.
pub const INITIAL_CAPTION: &str = "THE ARCHIVES";

/// Captions drawn on every shuffle.
pub const CAPTIONS: [&str; 10] = [
    "Bro thinks he is the main character 💀",
    "Rare footage of you actually working",
    "This is why we are single",
    "Looking like a failed test case ❌",
    "Moments before disaster",
    "Sleep deprivation: 100%",
    "POV: You just saw the question paper",
    "Who allowed this??",
    "Engineering was a mistake",
    "Deleting this in 24 hours ⏳",
];

// ============================================================================
// RANDOMNESS
// ============================================================================

/// Source of uniformly distributed indices.
pub trait IndexSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl IndexSource for ThreadRng {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

impl IndexSource for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of raw values, reduced modulo `len`.
///
/// Deterministic stand-in for tests and demos.
#[derive(Debug, Clone)]
pub struct Scripted {
    values: Vec<usize>,
    pos: usize,
}

impl Scripted {
    pub fn new(values: Vec<usize>) -> Self {
        Scripted { values, pos: 0 }
    }
}

impl IndexSource for Scripted {
    fn pick(&mut self, len: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let raw = self.values[self.pos % self.values.len()];
        self.pos += 1;
        raw % len
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Draw an independent photo index and caption index.
pub fn reroll(assets: &AssetList, source: &mut dyn IndexSource) -> MemorySelection {
    let image = source.pick(assets.len());
    let caption = source.pick(CAPTIONS.len());
    MemorySelection {
        image,
        caption: Some(caption),
    }
}

impl MemorySelection {
    /// The selected photo.
    pub fn photo<'a>(&self, assets: &'a AssetList) -> &'a ImageRef {
        assets.get(self.image)
    }

    /// The caption text, or the initial heading before any shuffle.
    pub fn caption_text(&self) -> &'static str {
        self.caption
            .and_then(|i| CAPTIONS.get(i).copied())
            .unwrap_or(INITIAL_CAPTION)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn assets(n: usize) -> AssetList {
        AssetList::from_images(
            (0..n)
                .map(|i| ImageRef::from_path(format!("img_{}.jpg", i)))
                .collect(),
        )
    }

    #[test]
    fn initial_selection_is_first_photo_and_heading() {
        let list = assets(3);
        let sel = MemorySelection::default();
        assert_eq!(sel.photo(&list).title, "img 0");
        assert_eq!(sel.caption_text(), INITIAL_CAPTION);
    }

    #[test]
    fn rerolls_stay_in_range_and_reach_everything() {
        let list = assets(7);
        let mut rng = StdRng::seed_from_u64(21);
        let mut images = BTreeSet::new();
        let mut captions = BTreeSet::new();

        for _ in 0..10_000 {
            let sel = reroll(&list, &mut rng);
            assert!(sel.image < list.len());
            let caption = sel.caption.expect("reroll always picks a caption");
            assert!(caption < CAPTIONS.len());
            assert!(CAPTIONS.contains(&sel.caption_text()));
            images.insert(sel.image);
            captions.insert(caption);
        }

        assert_eq!(images.len(), 7);
        assert_eq!(captions.len(), CAPTIONS.len());
    }

    #[test]
    fn single_placeholder_always_selected() {
        let list = AssetList::from_images(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let sel = reroll(&list, &mut rng);
            assert_eq!(sel.image, 0);
            assert_eq!(sel.photo(&list).locator, crate::assets::PLACEHOLDER_URL);
        }
    }

    #[test]
    fn scripted_source_is_deterministic() {
        let list = assets(4);
        let mut source = Scripted::new(vec![2, 9, 5, 3]);
        let first = reroll(&list, &mut source);
        assert_eq!(first, MemorySelection { image: 2, caption: Some(9) });
        let second = reroll(&list, &mut source);
        assert_eq!(second, MemorySelection { image: 1, caption: Some(3) });
        assert_eq!(second.caption_text(), "Looking like a failed test case ❌");
    }

    #[test]
    fn thread_rng_picks_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            assert!(rng.pick(3) < 3);
        }
    }
}
