//! TUI state algebra: the whole app state lives in one [`App`] value.
//!
//! The event loop owns it and passes it by reference to the pure
//! `update` and `view` layers. There are no globals.
//!
//! Per-view resources (the Home countdown timer) are owned by the view's
//! state, so replacing the view releases them.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;

use crate::assets::AssetList;
use crate::content::{self, Document, PageView};
use crate::countdown::Countdown;
use crate::schedule::earliest;
use crate::shuffle::IndexSource;
use crate::types::{ImageRef, MemorySelection, Now, PageId};

use super::confetti::Celebration;
use super::theme::{self, Theme};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can react to.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key press.
    Key(KeyEvent),
    /// The terminal was resized; only needs a redraw.
    Resize,
    /// A scheduled task may be due.
    Tick,
}

// ============================================================================
// VIEWS
// ============================================================================

/// State of a mounted Home view.
#[derive(Debug, Clone)]
pub struct HomeState {
    pub countdown: Countdown,
    pub memory: MemorySelection,
}

impl HomeState {
    /// Mount: arm the countdown, show the first photo and the heading.
    pub fn mount(reference: DateTime<Utc>, now: Now) -> Self {
        HomeState {
            countdown: Countdown::start(reference, now),
            memory: MemorySelection::default(),
        }
    }
}

/// The mounted view. Only Home carries state.
#[derive(Debug, Clone)]
pub enum Screen {
    Home(HomeState),
    Subject,
    Author,
}

impl Screen {
    pub fn page(&self) -> PageId {
        match self {
            Screen::Home(_) => PageId::Home,
            Screen::Subject => PageId::Subject,
            Screen::Author => PageId::Author,
        }
    }
}

/// Current page plus the presentation state navigation resets.
#[derive(Debug, Clone)]
pub struct Router {
    screen: Screen,
    reference: DateTime<Utc>,
    /// Vertical scroll offset of the content area, in lines.
    pub scroll: u16,
}

impl Router {
    /// Start on Home.
    pub fn new(reference: DateTime<Utc>, now: Now) -> Self {
        Router {
            screen: Screen::Home(HomeState::mount(reference, now)),
            reference,
            scroll: 0,
        }
    }

    pub fn current(&self) -> PageId {
        self.screen.page()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn home(&self) -> Option<&HomeState> {
        match &self.screen {
            Screen::Home(home) => Some(home),
            _ => None,
        }
    }

    pub fn home_mut(&mut self) -> Option<&mut HomeState> {
        match &mut self.screen {
            Screen::Home(home) => Some(home),
            _ => None,
        }
    }

    /// Switch pages and scroll to the top.
    ///
    /// Navigating to the current page keeps its state. Leaving Home drops
    /// its state, countdown timer included. Entering Home from elsewhere
    /// mounts a fresh one.
    pub fn navigate(&mut self, target: PageId, now: Now) {
        self.scroll = 0;
        if target == self.current() {
            return;
        }
        self.screen = match target {
            PageId::Home => Screen::Home(HomeState::mount(self.reference, now)),
            PageId::Subject => Screen::Subject,
            PageId::Author => Screen::Author,
        };
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
pub struct App {
    pub router: Router,
    pub dark_mode: bool,
    pub menu_open: bool,
    pub assets: AssetList,
    pub celebration: Option<Celebration>,
    /// Random source for the photo vault.
    pub source: Box<dyn IndexSource>,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
    subject_portrait: ImageRef,
    author_portrait: ImageRef,
}

impl App {
    pub fn new(
        assets: AssetList,
        reference: DateTime<Utc>,
        dark_mode: bool,
        source: Box<dyn IndexSource>,
        now: Now,
    ) -> Self {
        App {
            router: Router::new(reference, now),
            dark_mode,
            menu_open: false,
            subject_portrait: assets.subject_portrait(),
            author_portrait: assets.author_portrait(),
            assets,
            celebration: None,
            source,
            should_quit: false,
        }
    }

    pub fn theme(&self) -> Theme {
        theme::resolve(self.dark_mode)
    }

    pub fn current(&self) -> PageId {
        self.router.current()
    }

    pub fn subject_portrait(&self) -> &ImageRef {
        &self.subject_portrait
    }

    pub fn author_portrait(&self) -> &ImageRef {
        &self.author_portrait
    }

    /// Earliest instant a scheduled task needs attention, if any.
    pub fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        let countdown = self.router.home().map(|home| home.countdown.next_due());
        let confetti = self.celebration.as_ref().and_then(|c| c.next_due(now));
        earliest(countdown, confetti)
    }

    /// The current page's content.
    pub fn page_view(&self) -> PageView {
        match self.router.screen() {
            Screen::Home(home) => {
                content::home(&self.assets, &home.memory, home.countdown.value())
            }
            Screen::Subject => content::subject(&self.subject_portrait),
            Screen::Author => content::author(&self.author_portrait),
        }
    }

    /// Full declarative frame for an external renderer.
    pub fn document(&self) -> Document {
        let theme = self.theme();
        Document {
            nav: content::nav(self.current(), &theme, self.menu_open),
            theme,
            menu_open: self.menu_open,
            page: self.page_view(),
            footer: content::footer(),
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(PageId),
    ToggleTheme,
    Shuffle,
    Celebrate,
    ToggleMenu,
    CloseMenu,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State may have changed; redraw.
    Redraw,
    /// Action did not apply in the current state.
    Ignored,
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================
