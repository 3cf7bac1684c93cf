//! State transitions: (App, Action) → Transition, and timer ticks.
//!
//! No terminal access here; every function is testable with a
//! synthetic clock. Actions that don't apply to the current page are
//! no-ops that return [`Transition::Ignored`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::shuffle::reroll;
use crate::types::{Now, PageId};

use super::confetti::Celebration;
use super::state::{Action, App, Transition};

/// Lines moved by one PageUp/PageDown.
pub const PAGE_STEP: u16 = 10;

/// Apply a user action.
pub fn update(app: &mut App, action: &Action, now: Now) -> Transition {
    match *action {
        Action::Navigate(target) => {
            navigate(app, target, now);
            Transition::Redraw
        }
        Action::ToggleTheme => {
            app.dark_mode = !app.dark_mode;
            tracing::debug!(dark = app.dark_mode, "theme toggled");
            Transition::Redraw
        }
        Action::ToggleMenu => {
            app.menu_open = !app.menu_open;
            Transition::Redraw
        }
        Action::CloseMenu => {
            if app.menu_open {
                app.menu_open = false;
                Transition::Redraw
            } else {
                Transition::Ignored
            }
        }
        Action::Shuffle => shuffle(app),
        Action::Celebrate => celebrate(app, now),
        Action::ScrollUp => scroll_by(app, -1),
        Action::ScrollDown => scroll_by(app, 1),
        Action::PageUp => scroll_by(app, -i32::from(PAGE_STEP)),
        Action::PageDown => scroll_by(app, i32::from(PAGE_STEP)),
        Action::ScrollTop => {
            app.router.scroll = 0;
            Transition::Redraw
        }
        Action::Quit => Transition::Quit,
    }
}

/// Fire due timers. Returns true if anything visible changed.
pub fn handle_tick(app: &mut App, now: Now) -> bool {
    let mut changed = false;

    if let Some(home) = app.router.home_mut() {
        changed |= home.countdown.poll(now);
    }

    if let Some(celebration) = app.celebration.as_mut() {
        changed |= celebration.poll(now.instant);
        if celebration.is_finished(now.instant) {
            tracing::debug!("celebration finished");
            app.celebration = None;
            changed = true;
        }
    }

    changed
}

/// Largest scroll offset for content of `content_height` lines in a
/// viewport of `viewport_height` lines.
pub fn max_scroll(content_height: usize, viewport_height: u16) -> u16 {
    let overflow = content_height.saturating_sub(usize::from(viewport_height));
    u16::try_from(overflow).unwrap_or(u16::MAX)
}

// ============================================================================
// HANDLERS
// ============================================================================

fn navigate(app: &mut App, target: PageId, now: Now) {
    let from = app.current();
    app.router.navigate(target, now);
    app.menu_open = false;
    if from != target {
        tracing::info!(%from, to = %target, "navigated");
    }
}

/// Shuffle is only offered on Home.
fn shuffle(app: &mut App) -> Transition {
    let App {
        router,
        assets,
        source,
        ..
    } = app;
    match router.home_mut() {
        Some(home) => {
            home.memory = reroll(assets, source.as_mut());
            tracing::debug!(image = home.memory.image, caption = ?home.memory.caption, "memory rerolled");
            Transition::Redraw
        }
        None => Transition::Ignored,
    }
}

/// The party button lives on Home; a running celebration restarts.
fn celebrate(app: &mut App, now: Now) -> Transition {
    if app.current() != PageId::Home {
        return Transition::Ignored;
    }
    app.celebration = Some(Celebration::start(now.instant, StdRng::from_entropy()));
    tracing::info!("celebration started");
    Transition::Redraw
}

/// Move the scroll offset; clamping to content height happens at render
/// time, where the height is known.
fn scroll_by(app: &mut App, delta: i32) -> Transition {
    let current = i32::from(app.router.scroll);
    let next = (current + delta).clamp(0, i32::from(u16::MAX));
    let next = u16::try_from(next).unwrap_or(0);
    if next == app.router.scroll {
        return Transition::Ignored;
    }
    app.router.scroll = next;
    Transition::Redraw
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetList;
    use crate::countdown::TICK;
    use crate::shuffle::{CAPTIONS, Scripted};
    use crate::tui::confetti::{DURATION, FRAME};
    use crate::types::{ImageRef, MemorySelection, default_reference};
    use std::time::{Duration, Instant};

    fn at(t0: Instant, offset: Duration) -> Now {
        Now {
            instant: t0 + offset,
            wall: default_reference() + chrono::Duration::from_std(offset).unwrap(),
        }
    }

    fn app_with(photos: usize, script: Vec<usize>, t0: Instant) -> App {
        let images = (0..photos)
            .map(|i| ImageRef::from_path(format!("pic_{}.jpg", i)))
            .collect();
        App::new(
            AssetList::from_images(images),
            default_reference(),
            false,
            Box::new(Scripted::new(script)),
            at(t0, Duration::ZERO),
        )
    }

    #[test]
    fn toggle_theme_flips_mode() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        assert_eq!(update(&mut app, &Action::ToggleTheme, at(t0, Duration::ZERO)), Transition::Redraw);
        assert!(app.dark_mode);
        assert!(app.theme().dark);
        update(&mut app, &Action::ToggleTheme, at(t0, Duration::ZERO));
        assert!(!app.dark_mode);
    }

    #[test]
    fn navigation_closes_menu_and_resets_scroll() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        app.menu_open = true;
        app.router.scroll = 8;
        update(&mut app, &Action::Navigate(PageId::Author), at(t0, Duration::ZERO));
        assert_eq!(app.current(), PageId::Author);
        assert!(!app.menu_open);
        assert_eq!(app.router.scroll, 0);
    }

    #[test]
    fn navigate_home_twice_renders_same_structure() {
        let t0 = Instant::now();
        let mut app = app_with(3, vec![0], t0);
        let now = at(t0, Duration::ZERO);
        update(&mut app, &Action::Navigate(PageId::Home), now);
        let first = app.document();
        update(&mut app, &Action::Navigate(PageId::Home), now);
        assert_eq!(app.current(), PageId::Home);
        assert_eq!(app.document(), first);
    }

    #[test]
    fn shuffle_uses_injected_source() {
        let t0 = Instant::now();
        let mut app = app_with(4, vec![3, 7], t0);
        update(&mut app, &Action::Shuffle, at(t0, Duration::ZERO));
        let memory = app.router.home().unwrap().memory;
        assert_eq!(memory, MemorySelection { image: 3, caption: Some(7) });
        assert_eq!(memory.caption_text(), CAPTIONS[7]);
    }

    #[test]
    fn shuffle_and_celebrate_ignored_off_home() {
        let t0 = Instant::now();
        let mut app = app_with(2, vec![1], t0);
        let now = at(t0, Duration::ZERO);
        update(&mut app, &Action::Navigate(PageId::Subject), now);
        assert_eq!(update(&mut app, &Action::Shuffle, now), Transition::Ignored);
        assert_eq!(update(&mut app, &Action::Celebrate, now), Transition::Ignored);
        assert!(app.celebration.is_none());
    }

    #[test]
    fn tick_recomputes_countdown_each_second() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        assert!(!handle_tick(&mut app, at(t0, Duration::from_millis(400))));
        assert!(handle_tick(&mut app, at(t0, TICK)));
        assert_eq!(app.router.home().unwrap().countdown.value().seconds, 1);
        assert!(handle_tick(&mut app, at(t0, Duration::from_secs(90_125))));
        let value = app.router.home().unwrap().countdown.value();
        assert_eq!((value.days, value.hours, value.minutes, value.seconds), (1, 1, 2, 5));
    }

    #[test]
    fn no_wakeups_off_home_without_celebration() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        update(&mut app, &Action::Navigate(PageId::Author), at(t0, Duration::ZERO));
        assert_eq!(app.next_wakeup(t0), None);
        assert!(!handle_tick(&mut app, at(t0, TICK * 5)));
    }

    #[test]
    fn celebration_survives_navigation_and_ends_on_its_own() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        update(&mut app, &Action::Celebrate, at(t0, Duration::ZERO));
        assert!(app.celebration.is_some());

        update(&mut app, &Action::Navigate(PageId::Subject), at(t0, FRAME));
        assert!(app.celebration.is_some());

        let mut offset = FRAME;
        while app.celebration.is_some() && offset < DURATION * 10 {
            offset += FRAME;
            handle_tick(&mut app, at(t0, offset));
        }
        assert!(app.celebration.is_none());
        assert!(offset >= DURATION);
        assert_eq!(app.next_wakeup(t0 + offset), None);
    }

    #[test]
    fn scrolling_saturates_at_top() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        let now = at(t0, Duration::ZERO);
        assert_eq!(update(&mut app, &Action::ScrollUp, now), Transition::Ignored);
        update(&mut app, &Action::PageDown, now);
        assert_eq!(app.router.scroll, PAGE_STEP);
        update(&mut app, &Action::ScrollUp, now);
        assert_eq!(app.router.scroll, PAGE_STEP - 1);
        update(&mut app, &Action::ScrollTop, now);
        assert_eq!(app.router.scroll, 0);
    }

    #[test]
    fn max_scroll_is_overflow() {
        assert_eq!(max_scroll(50, 20), 30);
        assert_eq!(max_scroll(10, 20), 0);
    }

    #[test]
    fn close_menu_only_when_open() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        let now = at(t0, Duration::ZERO);
        assert_eq!(update(&mut app, &Action::CloseMenu, now), Transition::Ignored);
        update(&mut app, &Action::ToggleMenu, now);
        assert!(app.menu_open);
        assert_eq!(update(&mut app, &Action::CloseMenu, now), Transition::Redraw);
        assert!(!app.menu_open);
    }

    #[test]
    fn quit_transitions_to_quit() {
        let t0 = Instant::now();
        let mut app = app_with(1, vec![0], t0);
        assert_eq!(update(&mut app, &Action::Quit, at(t0, Duration::ZERO)), Transition::Quit);
    }
}
