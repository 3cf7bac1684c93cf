//! Page content as declarative, serializable structures.
//!
//! Each page function is pure: data in, [`PageView`] out. Nothing here
//! knows about terminals. `tui::view` paints these structures and
//! `hbd dump` prints them as JSON.

use serde::Serialize;

use crate::assets::AssetList;
use crate::tui::theme::Theme;
use crate::types::{Elapsed, ImageRef, MemorySelection, PageId};

// ============================================================================
// STRUCTURE
// ============================================================================

/// Everything an external renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub theme: Theme,
    pub nav: NavBar,
    pub menu_open: bool,
    pub page: PageView,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    pub theme_glyph: &'static str,
    pub menu_glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub page: PageId,
    pub label: &'static str,
    pub key: char,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub hint: &'static str,
    pub credit: &'static str,
}

/// One page: a vertical stack of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: PageId,
    pub sections: Vec<Section>,
}

/// Which theme token colors a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Page,
    Hero,
    Vault,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub surface: Surface,
    pub blocks: Vec<Block>,
}

/// Countdown digit cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBox {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Tilted callout above a title.
    Badge { text: &'static str },
    /// Large page title.
    Title { text: &'static str },
    /// Section heading.
    Heading { text: &'static str },
    Paragraph { text: &'static str, strong: bool },
    Quote { text: &'static str },
    Countdown { label: &'static str, boxes: Vec<TimeBox> },
    Photo { image: ImageRef, caption: Option<String> },
    /// Label/value row, optionally with the value emphasized.
    Field { label: String, value: String, emphasis: bool },
    List { title: &'static str, items: Vec<&'static str>, numbered: bool },
    /// Actionable control and the key that triggers it.
    Button { label: &'static str, key: char },
    Signature { text: &'static str },
    /// Small de-emphasized print.
    Fine { text: &'static str },
}

// ============================================================================
// SHARED CHROME
// ============================================================================

pub const BRAND: &str = "HBD.v2";

/// Key bound to each page link.
pub fn page_key(page: PageId) -> char {
    match page {
        PageId::Home => '1',
        PageId::Subject => '2',
        PageId::Author => '3',
    }
}

pub fn nav(current: PageId, theme: &Theme, menu_open: bool) -> NavBar {
    NavBar {
        brand: BRAND,
        links: PageId::ALL
            .iter()
            .map(|&page| NavLink {
                page,
                label: page.label(),
                key: page_key(page),
                active: page == current,
            })
            .collect(),
        theme_glyph: theme.mode_glyph(),
        menu_glyph: if menu_open { "✕" } else { "☰" },
    }
}

pub fn footer() -> Footer {
    Footer {
        hint: "NAVIGATE USING THE MENU TOP RIGHT",
        credit: "CODED WITH 💀 BY GEETESH",
    }
}

/// Zero-pad to at least two digits.
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

pub fn time_boxes(elapsed: Elapsed) -> Vec<TimeBox> {
    vec![
        TimeBox { value: pad2(elapsed.days), label: "DAYS" },
        TimeBox { value: pad2(elapsed.hours), label: "HRS" },
        TimeBox { value: pad2(elapsed.minutes), label: "MIN" },
        TimeBox { value: pad2(elapsed.seconds), label: "SEC" },
    ]
}

// ============================================================================
// PAGE: HOME
// ============================================================================

pub const SHUFFLE_KEY: char = 's';
pub const CELEBRATE_KEY: char = 'p';

const LETTER: [&str; 6] = [
    "Happy Birthday, Homie!",
    "Honestly, ye photos dekh ke aur ye code likhte time realize hua ki 1st year se ab tak kitni crazy memories stack ho gayi hain.",
    "Pata h aajkal vibe thodi off h. Me bahut overthink kr rha hu aur vo purane din miss krta hu jab kuch bhi bol deta tha bina soche.",
    "Ab realize hota h me kitna stupid tha 1st year me... yaad h vo movie wala scene jab tera syllabus bacha tha? My bad yrr. I genuinely regret those moments jaha mene mess up kiya.",
    "I don't want ki hum door ho jaye. Ye website bas ye batane ka tareeka h ki tu important h mere liye.",
    "Let's reset the vibe this year. No more drama, only good times and placements.",
];

/// Landing page: hero with countdown, photo vault, open letter.
pub fn home(assets: &AssetList, selection: &MemorySelection, countdown: Elapsed) -> PageView {
    let hero = Section {
        surface: Surface::Hero,
        blocks: vec![
            Block::Badge { text: "⚠️ LEVEL 21 UNLOCKED" },
            Block::Title { text: "HBD ABHINAV" },
            Block::Countdown {
                label: "TIME TOLERATED:",
                boxes: time_boxes(countdown),
            },
            Block::Button { label: "🚀 LAUNCH PARTY", key: CELEBRATE_KEY },
        ],
    };

    let vault = Section {
        surface: Surface::Vault,
        blocks: vec![
            Block::Photo {
                image: selection.photo(assets).clone(),
                caption: Some(selection.caption_text().to_string()),
            },
            Block::Field {
                label: "> TARGET:".to_string(),
                value: "ABHINAV".to_string(),
                emphasis: false,
            },
            Block::Field {
                label: "> PHOTOS:".to_string(),
                value: format!("{} FOUND", assets.len()),
                emphasis: false,
            },
            Block::Button { label: "🔄 SHUFFLE", key: SHUFFLE_KEY },
        ],
    };

    let mut letter = vec![
        Block::Heading { text: "OPEN LETTER" },
        Block::Field {
            label: "TO:".to_string(),
            value: "ABHINAV".to_string(),
            emphasis: true,
        },
    ];
    letter.extend(LETTER[..5].iter().map(|&text| Block::Paragraph { text, strong: false }));
    letter.push(Block::Paragraph {
        text: "Puri Sem break baith ke Web Dev seekhi h bas ye banane ke liye. (Haan, utni mehnat ki h tere liye, so appreciate it).",
        strong: true,
    });
    letter.push(Block::Paragraph { text: LETTER[5], strong: false });
    letter.push(Block::Signature { text: "SIGNED, GEETESH" });

    PageView {
        page: PageId::Home,
        sections: vec![
            hero,
            vault,
            Section {
                surface: Surface::Note,
                blocks: letter,
            },
        ],
    }
}

// ============================================================================
// PAGE: SUBJECT
// ============================================================================

/// Mock dossier of the birthday person.
pub fn subject(portrait: &ImageRef) -> PageView {
    PageView {
        page: PageId::Subject,
        sections: vec![Section {
            surface: Surface::Page,
            blocks: vec![
                Block::Heading { text: "THE SUSPECT" },
                Block::Photo {
                    image: portrait.clone(),
                    caption: None,
                },
                Block::Fine { text: "ID: #001-LENDI" },
                Block::Field {
                    label: "NAME:".to_string(),
                    value: "Abhinav".to_string(),
                    emphasis: true,
                },
                Block::Field {
                    label: "ALIAS:".to_string(),
                    value: "Cutie, Hawasi".to_string(),
                    emphasis: true,
                },
                Block::List {
                    title: "SPECIAL SKILLS:",
                    items: vec![
                        "Rage Baiting (Expert Level)",
                        "Blocking the Developer 🚫",
                        "Being a Morning Person (Psychopath behavior)",
                        "Tennis Player Baddiee 🎾",
                    ],
                    numbered: false,
                },
                Block::List {
                    title: "KNOWN EXPERIENCES:",
                    items: vec![
                        "Blackmailing (Professional)",
                        "Ghosting (Seen but no reply)",
                        "Sometimes Helping (Rare event)",
                        "Disciplined (Surprisingly)",
                    ],
                    numbered: true,
                },
            ],
        }],
    }
}

// ============================================================================
// PAGE: AUTHOR
// ============================================================================

/// The developer's self-introduction.
pub fn author(portrait: &ImageRef) -> PageView {
    let facts = [
        ("📉 ROI:", "Tera Reaction ❤️"),
        ("⏳ Time Spent:", "Puri Chuttiyan (Literally)"),
        ("🍔 Treat:", "DB Mall chalna padega ab."),
    ];

    let mut blocks = vec![
        Block::Title { text: "GIGU" },
        Block::Quote {
            text: "\"Padhai-likhai toh hoti rahegi, Bakchodi rukni nahi chahiye.\"",
        },
        Block::Photo {
            image: portrait.clone(),
            caption: None,
        },
        Block::Field {
            label: "Hey, I'm".to_string(),
            value: "Geetesh".to_string(),
            emphasis: true,
        },
        Block::Quote {
            text: "\"Full Stack Developer (Sirf Bio me likhne ke liye).\"",
        },
        Block::Paragraph {
            text: "Bhai sach batau puri Sem Break barbaad kr di mene webd seekhne me. Log skills pr dhyaan de rahe the, aur me yaha baith ke tere liye ye website bana rha tha.",
            strong: false,
        },
        Block::Paragraph {
            text: "Bas ye maan le, jitni mehnat isme lagi h na, utni agar codeforces pr ki hoti toh 1300+ rating hoti 🤧. Ab chup chaap achi si party de dena.",
            strong: false,
        },
    ];
    blocks.extend(facts.iter().map(|(label, value)| Block::Field {
        label: label.to_string(),
        value: value.to_string(),
        emphasis: true,
    }));
    blocks.push(Block::Fine { text: "© 2026 GEETESH PRODUCTIONS." });

    PageView {
        page: PageId::Author,
        sections: vec![Section {
            surface: Surface::Page,
            blocks,
        }],
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::CAPTIONS;
    use crate::tui::theme::resolve;

    fn photos(n: usize) -> AssetList {
        AssetList::from_images(
            (0..n)
                .map(|i| ImageRef::from_path(format!("pic_{}.png", i)))
                .collect(),
        )
    }

    fn blocks(view: &PageView) -> impl Iterator<Item = &Block> {
        view.sections.iter().flat_map(|s| s.blocks.iter())
    }

    #[test]
    fn pad2_pads_single_digits_only() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(7), "07");
        assert_eq!(pad2(42), "42");
        assert_eq!(pad2(1170), "1170");
    }

    #[test]
    fn home_shows_padded_countdown() {
        let elapsed = Elapsed { days: 1, hours: 1, minutes: 2, seconds: 5 };
        let view = home(&photos(2), &MemorySelection::default(), elapsed);
        let boxes = blocks(&view)
            .find_map(|b| match b {
                Block::Countdown { boxes, .. } => Some(boxes.clone()),
                _ => None,
            })
            .expect("home has a countdown");
        let values: Vec<&str> = boxes.iter().map(|b| b.value.as_str()).collect();
        assert_eq!(values, vec!["01", "01", "02", "05"]);
    }

    #[test]
    fn home_reports_photo_count_and_selection() {
        let list = photos(3);
        let sel = MemorySelection { image: 2, caption: Some(0) };
        let view = home(&list, &sel, Elapsed::default());

        assert!(blocks(&view).any(|b| matches!(
            b,
            Block::Field { value, .. } if value == "3 FOUND"
        )));
        assert!(blocks(&view).any(|b| matches!(
            b,
            Block::Photo { image, caption: Some(c) }
                if image.title == "pic 2" && c == CAPTIONS[0]
        )));
    }

    #[test]
    fn subject_and_author_use_given_portrait() {
        let img = ImageRef::from_path("avatar.png");
        for view in [subject(&img), author(&img)] {
            assert!(blocks(&view).any(|b| matches!(b, Block::Photo { image, .. } if *image == img)));
        }
    }

    #[test]
    fn nav_marks_only_current_page() {
        let bar = nav(PageId::Subject, &resolve(false), false);
        let active: Vec<PageId> = bar.links.iter().filter(|l| l.active).map(|l| l.page).collect();
        assert_eq!(active, vec![PageId::Subject]);
        assert_eq!(bar.menu_glyph, "☰");
        assert_eq!(nav(PageId::Home, &resolve(true), true).menu_glyph, "✕");
    }

    #[test]
    fn blocks_serialize_with_kind_tag() {
        let json = serde_json::to_value(Block::Button { label: "🔄 SHUFFLE", key: 's' }).unwrap();
        assert_eq!(json["kind"], "button");
        assert_eq!(json["key"], "s");
    }
}
