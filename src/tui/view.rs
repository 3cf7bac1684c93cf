//! Pure rendering: map App state to ratatui widget trees.
//!
//! Page content arrives as a [`PageView`]; this module only decides how
//! blocks look in a terminal. Text is wrapped here (not by `Paragraph`)
//! so the content height is known and scrolling can be clamped.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{self, Borders, Clear, Paragraph};

use crate::content::{self, Block, Footer, NavBar, PageView, Surface, TimeBox};
use crate::types::ImageRef;

use super::state::App;
use super::theme::{self, Shadow, Theme};
use super::update::max_scroll;

/// Widest a photo frame gets, in cells.
const PHOTO_WIDTH: usize = 44;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole UI. Returns the largest valid scroll offset for the
/// current content and viewport.
pub fn render(app: &App, frame: &mut Frame) -> u16 {
    let area = frame.area();
    let theme = app.theme();

    let chunks = Layout::vertical([
        Constraint::Length(2), // nav bar
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(widgets::Block::new().style(theme.page()), area);

    let nav = content::nav(app.current(), &theme, app.menu_open);
    frame.render_widget(render_nav(&nav, &theme), chunks[0]);

    let content_area = chunks[1];
    let width = usize::from(content_area.width.saturating_sub(2)).max(10);
    let mut lines = page_lines(&app.page_view(), &theme, width);
    lines.extend(footer_lines(&content::footer(), &theme));

    let limit = max_scroll(lines.len(), content_area.height);
    let scroll = app.router.scroll.min(limit);
    let paragraph = Paragraph::new(lines)
        .style(theme.page())
        .scroll((scroll, 0));
    frame.render_widget(paragraph, content_area);

    frame.render_widget(render_help(), chunks[2]);

    if app.menu_open {
        render_menu(&nav, &theme, frame, content_area);
    }

    if let Some(celebration) = &app.celebration {
        frame.render_widget(celebration, area);
    }

    limit
}

// ============================================================================
// SHARED CHROME
// ============================================================================

fn render_nav(nav: &NavBar, theme: &Theme) -> Paragraph<'static> {
    let bar = Style::new().fg(theme.text).bg(theme.nav_background);
    let mut spans = vec![
        Span::styled(format!(" {} ", nav.brand), bar.add_modifier(Modifier::BOLD)),
        Span::styled("  ", bar),
    ];
    for link in &nav.links {
        let style = if link.active {
            bar.patch(theme::STYLE_ACTIVE).add_modifier(Modifier::BOLD)
        } else {
            bar
        };
        spans.push(Span::styled(format!("[{}] {}", link.key, link.label), style));
        spans.push(Span::styled("  ", bar));
    }
    spans.push(Span::styled(format!("{} [t]  {} [m] ", nav.theme_glyph, nav.menu_glyph), bar));

    Paragraph::new(Line::from(spans)).block(
        widgets::Block::new()
            .borders(Borders::BOTTOM)
            .border_style(theme.border_style())
            .style(bar),
    )
}

fn render_help() -> Paragraph<'static> {
    let hints = [
        ("1-3", "pages"),
        ("t", "theme"),
        ("s", "shuffle"),
        ("p", "party"),
        ("m", "menu"),
        ("j/k", "scroll"),
        ("q", "quit"),
    ];
    let mut spans = Vec::new();
    for (key, what) in hints {
        spans.push(Span::styled(format!("[{}]", key), theme::STYLE_KEY));
        spans.push(Span::styled(format!(" {}  ", what), theme::STYLE_HELP));
    }
    Paragraph::new(Line::from(spans))
}

fn render_menu(nav: &NavBar, theme: &Theme, frame: &mut Frame, area: Rect) {
    let width = 22.min(area.width);
    let height = (nav.links.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let lines: Vec<Line> = nav
        .links
        .iter()
        .map(|link| {
            let marker = if link.active { "▸" } else { " " };
            let style = if link.active { theme.emphasis() } else { theme.card() };
            Line::styled(format!("{} [{}] {}", marker, link.key, link.label), style)
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            widgets::Block::bordered()
                .title(" MENU ")
                .border_style(theme.border_style())
                .style(Style::new().fg(theme.text).bg(theme.nav_background)),
        ),
        popup,
    );
}

fn footer_lines(footer: &Footer, theme: &Theme) -> Vec<Line<'static>> {
    let style = Style::new().fg(Color::White).bg(theme.footer_background);
    vec![
        Line::styled("", style),
        Line::styled(footer.hint, style.add_modifier(Modifier::DIM)).centered(),
        Line::styled(footer.credit, style.add_modifier(Modifier::BOLD)).centered(),
        Line::styled("", style),
    ]
}

// ============================================================================
// PAGE CONTENT
// ============================================================================

/// Flatten a page into styled, pre-wrapped lines.
pub fn page_lines(view: &PageView, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in &view.sections {
        let base = Style::new().fg(theme.text).bg(surface_color(section.surface, theme));
        lines.push(Line::styled("", base));
        for block in &section.blocks {
            lines.extend(block_lines(block, section.surface, theme, base, width));
            lines.push(Line::styled("", base));
        }
        lines.push(Line::styled("━".repeat(width), base.fg(theme.border)));
    }
    lines
}

fn surface_color(surface: Surface, theme: &Theme) -> Color {
    match surface {
        Surface::Page => theme.background,
        Surface::Hero => theme.hero_section,
        Surface::Vault => theme.vault_section,
        Surface::Note => theme.note_section,
    }
}

fn block_lines(
    block: &Block,
    surface: Surface,
    theme: &Theme,
    base: Style,
    width: usize,
) -> Vec<Line<'static>> {
    let card = theme.card().add_modifier(Modifier::BOLD);
    match block {
        Block::Badge { text } => {
            let mut spans = vec![Span::styled(format!("  {}  ", text), card)];
            if theme.shadow == Shadow::Hard {
                spans.push(Span::styled(" ", Style::new().bg(theme.border)));
            }
            vec![Line::from(spans).centered()]
        }
        Block::Title { text } => vec![
            Line::styled(
                spaced(text),
                base.add_modifier(Modifier::BOLD),
            )
            .centered(),
        ],
        Block::Heading { text } => vec![
            Line::styled(
                text.to_string(),
                base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        ],
        Block::Paragraph { text, strong } => {
            let style = if *strong { base.add_modifier(Modifier::BOLD) } else { base };
            wrap(text, width)
                .into_iter()
                .map(|l| Line::styled(l, style))
                .collect()
        }
        Block::Quote { text } => wrap(text, width.saturating_sub(2))
            .into_iter()
            .map(|l| {
                Line::from(vec![
                    Span::styled("▌ ", base.fg(theme.border)),
                    Span::styled(l, base.add_modifier(Modifier::ITALIC)),
                ])
            })
            .collect(),
        Block::Countdown { label, boxes } => countdown_lines(label, boxes, theme, base),
        Block::Photo { image, caption } => photo_lines(image, caption.as_deref(), theme, base, width),
        Block::Field { label, value, emphasis } => {
            let value_style = if *emphasis { base.patch(theme.emphasis()) } else { base };
            vec![Line::from(vec![
                Span::styled(format!("{} ", label), base),
                Span::styled(value.clone(), value_style),
            ])]
        }
        Block::List { title, items, numbered } => {
            let mut lines = vec![Line::styled(title.to_string(), base.patch(theme.emphasis()))];
            for (i, item) in items.iter().enumerate() {
                let bullet = if *numbered { format!("  {}. ", i + 1) } else { "  • ".to_string() };
                lines.push(Line::styled(format!("{}{}", bullet, item), base));
            }
            lines
        }
        Block::Button { label, key } => {
            let swatch = if surface == Surface::Vault { theme.accent } else { theme.button };
            vec![
                Line::from(vec![
                    Span::styled(format!("  {}  [{}]  ", label, key), swatch.style()),
                ])
                .centered(),
            ]
        }
        Block::Signature { text } => vec![
            Line::styled(format!("──── {}", text), base.add_modifier(Modifier::BOLD))
                .alignment(Alignment::Right),
        ],
        Block::Fine { text } => vec![Line::styled(text.to_string(), base.add_modifier(Modifier::DIM))],
    }
}

fn countdown_lines(label: &str, boxes: &[TimeBox], theme: &Theme, base: Style) -> Vec<Line<'static>> {
    let cell = base.bg(theme.card_background);
    let border = cell.fg(theme.border);
    let widths: Vec<usize> = boxes
        .iter()
        .map(|b| b.value.len().max(b.label.len()) + 2)
        .collect();

    let mut digits = vec![Span::styled("│", border)];
    let mut labels = vec![Span::styled("│", border)];
    for (b, &w) in boxes.iter().zip(&widths) {
        digits.push(Span::styled(format!("{:^w$}", b.value), cell.patch(theme.emphasis())));
        digits.push(Span::styled("│", border));
        labels.push(Span::styled(format!("{:^w$}", b.label), cell.add_modifier(Modifier::DIM)));
        labels.push(Span::styled("│", border));
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let inner: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        Line::styled(format!("{}{}{}", left, inner.join(mid), right), border).centered()
    };

    vec![
        Line::styled(label.to_string(), base.add_modifier(Modifier::BOLD)).centered(),
        rule("┌", "┬", "┐"),
        Line::from(digits).centered(),
        Line::from(labels).centered(),
        rule("└", "┴", "┘"),
    ]
}

fn photo_lines(
    image: &ImageRef,
    caption: Option<&str>,
    theme: &Theme,
    base: Style,
    width: usize,
) -> Vec<Line<'static>> {
    let inner = width.min(PHOTO_WIDTH).saturating_sub(4).max(8);
    let frame = theme.card().fg(theme.border);
    let body = theme.card();
    let row = |text: String, style: Style| {
        let text = truncate(&text, inner);
        let pad = inner.saturating_sub(Span::raw(text.as_str()).width());
        Line::from(vec![
            Span::styled("│ ", frame),
            Span::styled(format!("{}{}", text, " ".repeat(pad)), style),
            Span::styled(" │", frame),
        ])
        .centered()
    };

    let mut lines = vec![
        Line::styled(format!("┌{}┐", "─".repeat(inner + 2)), frame).centered(),
        row(String::new(), body),
        row(format!("▣ {}", image.title), body.add_modifier(Modifier::BOLD)),
        row(image.locator.clone(), body.add_modifier(Modifier::DIM)),
        row(String::new(), body),
        Line::styled(format!("└{}┘", "─".repeat(inner + 2)), frame).centered(),
    ];
    if let Some(caption) = caption {
        lines.push(
            Line::styled(
                caption.to_uppercase(),
                base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
            )
            .centered(),
        );
    }
    lines
}

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Letter-space a title: "HBD" → "H B D".
fn spaced(text: &str) -> String {
    let mut out = String::new();
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Greedy word wrap by display width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let w = Span::raw(word).width();
        if current_width > 0 && current_width + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += w;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut to at most `width` display cells, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if Span::raw(text).width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = Span::raw(c.to_string()).width();
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ============================================================================
// TESTS
// ============================================================================
