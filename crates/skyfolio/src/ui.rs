//! Drawing of everything in front of the sky: intro banner, page panel,
//! navigation menu and help line.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};
use skyfolio_config::{Profile, Skill};
use skyfolio_core::{Palette, Rgba, Theme};

use crate::intro::Typewriter;
use crate::page::Page;

/// Widest the page panel gets, in columns.
const MAX_COLUMN_WIDTH: u16 = 78;
/// Rows needed before the intro uses block letters.
const BANNER_MIN_ROWS: u16 = 24;
const SKILL_NAME_WIDTH: usize = 14;
/// Caret blink half-period.
const CARET_BLINK_MS: f64 = 500.0;
/// Rows of the menu besides its items.
const MENU_CHROME: u16 = 2;

/// Rows taken by the intro header for a terminal `rows` tall.
pub fn header_height(rows: u16) -> u16 {
    if rows >= BANNER_MIN_ROWS {
        skyfolio_fonts::GLYPH_HEIGHT as u16 + 2
    } else {
        2
    }
}

/// Centred column for the page panel.
pub fn content_column(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MAX_COLUMN_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Block surrounding the page content.
pub fn page_block(palette: &Palette) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::new().bg(palette.panel.to_color()).fg(palette.muted.to_color()))
}

/// Write the non-space characters of `text`, leaving the sky visible between them.
fn overlay(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < clip.top() || y >= clip.bottom() {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x.saturating_add(i as u16);
        if cx >= clip.right() {
            break;
        }
        if ch == ' ' || cx < clip.left() {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Typed name, tagline and the theme indicator.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    typewriter: &Typewriter,
    tagline: &str,
    now_ms: f64,
    theme: Theme,
) {
    let palette = theme.palette();
    let typed = typewriter.visible(now_ms);
    let finished = typewriter.is_finished(now_ms);
    let caret_on = !finished || (now_ms / CARET_BLINK_MS) as u64 % 2 == 0;
    let caret = if caret_on { "▌" } else { "" };
    let text_style = Style::new().fg(palette.text.to_color()).bold();
    let buf = frame.buffer_mut();

    let full = typewriter.text();
    let banner_width = skyfolio_fonts::banner_width(full) as u16;
    let use_banner = area.height > 2
        && skyfolio_fonts::supports(full)
        && banner_width.saturating_add(2) <= area.width;

    let tagline_row = if use_banner {
        let left = area.x + (area.width - banner_width) / 2;
        let rows = skyfolio_fonts::build_banner(typed);
        let last = rows.len().saturating_sub(1);
        for (i, row) in rows.iter().enumerate() {
            let y = area.y + i as u16;
            overlay(buf, area, left, y, row, text_style);
            if i == last {
                let x = left + row.chars().count() as u16;
                overlay(buf, area, x, y, caret, Style::new().fg(palette.accent.to_color()));
            }
        }
        area.y + skyfolio_fonts::GLYPH_HEIGHT as u16
    } else {
        let line = format!("{typed}{caret}");
        let width = full.chars().count() as u16 + 1;
        let left = area.x + area.width.saturating_sub(width) / 2;
        overlay(buf, area, left, area.y, &line, text_style);
        area.y + 1
    };

    if finished && !tagline.is_empty() {
        let width = tagline.chars().count() as u16;
        let left = area.x + area.width.saturating_sub(width) / 2;
        overlay(
            buf,
            area,
            left,
            tagline_row,
            tagline,
            Style::new().fg(palette.muted.to_color()).italic(),
        );
    }

    let indicator = format!("{} ☰", theme.icon());
    let width = indicator.chars().count() as u16;
    overlay(
        buf,
        area,
        area.right().saturating_sub(width + 1),
        area.y,
        &indicator,
        Style::new().fg(palette.accent.to_color()),
    );
}

/// One skill bar row sized to `width` columns.
pub fn skill_line(skill: &Skill, fill: f64, width: u16, palette: &Palette, fade: f64) -> Line<'static> {
    let percent = (skill.progress as f64 * fill.clamp(0.0, 1.0)).round() as usize;
    let bar_width = (width as usize).saturating_sub(SKILL_NAME_WIDTH + 6);
    let filled = (bar_width * percent + 50) / 100;
    let color = |c: Rgba| palette.panel.lerp(c, fade).to_color();

    let name: String = skill.name.chars().take(SKILL_NAME_WIDTH - 1).collect();
    Line::from(vec![
        Span::styled(
            format!("{name:<width$}", width = SKILL_NAME_WIDTH),
            Style::new().fg(color(palette.text)),
        ),
        Span::styled("█".repeat(filled), Style::new().fg(color(palette.accent))),
        Span::styled(
            "█".repeat(bar_width - filled),
            Style::new().fg(color(palette.track)),
        ),
        Span::styled(format!(" {percent:>3}%"), Style::new().fg(color(palette.muted))),
    ])
}

/// Every content row of the page, hidden sections as blank rows.
pub fn page_lines(
    profile: &Profile,
    page: &Page,
    now_ms: f64,
    width: u16,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let fill = page.skill_fill(now_ms);
    let mut lines = Vec::new();
    for (i, section) in profile.sections.iter().enumerate() {
        let fade = page.reveal_opacity(i, now_ms);
        let color = |c: Rgba| palette.panel.lerp(c, fade).to_color();
        if fade <= 0.0 {
            let rows = 1 + section.body.len() + section.skills.len() + 1;
            lines.extend(std::iter::repeat_n(Line::default(), rows));
            continue;
        }

        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::new().fg(color(palette.accent)).bold(),
        )));
        for body in &section.body {
            lines.push(Line::from(Span::styled(
                body.clone(),
                Style::new().fg(color(palette.text)),
            )));
        }
        for skill in &section.skills {
            lines.push(skill_line(skill, fill, width, palette, fade));
        }
        lines.push(Line::default());
    }
    lines
}

/// Panel with the scrolled page content.
pub fn render_page(
    frame: &mut Frame,
    area: Rect,
    profile: &Profile,
    page: &Page,
    now_ms: f64,
    palette: &Palette,
) {
    let block = page_block(palette);
    let inner = block.inner(area);
    let lines = page_lines(profile, page, now_ms, inner.width, palette);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).scroll((page.scroll_row(), 0)), inner);
}

/// Where the menu is drawn inside the page `area`.
pub fn menu_area(area: Rect, profile: &Profile) -> Rect {
    let items = profile.sections.len().min(9) as u16;
    let longest = profile
        .sections
        .iter()
        .take(9)
        .map(|s| s.title.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let width = (longest + 8).min(area.width);
    let height = (items + MENU_CHROME).min(area.height);
    Rect::new(area.right().saturating_sub(width), area.y, width, height)
}

/// Section picked by a click at (`column`, `row`) on the menu drawn at `menu`.
pub fn menu_hit(menu: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column > menu.left()
        && column + 1 < menu.right()
        && row > menu.top()
        && row + 1 < menu.bottom();
    inside.then(|| (row - menu.top() - 1) as usize)
}

/// Navigation overlay listing the sections.
pub fn render_menu(frame: &mut Frame, area: Rect, profile: &Profile, palette: &Palette) -> Rect {
    let rect = menu_area(area, profile);
    let lines: Vec<Line> = profile
        .sections
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::new().fg(palette.accent.to_color()).bold()),
                Span::styled(s.title.clone(), Style::new().fg(palette.text.to_color())),
            ])
        })
        .collect();
    let block = page_block(palette)
        .border_style(Style::new().fg(palette.accent.to_color()))
        .title(" Menu ");
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
    rect
}

/// Key hints on the bottom row.
pub fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let key = |k: &'static str| k.bold().fg(palette.accent.to_color());
    let hint = |h: &'static str| h.fg(palette.muted.to_color());
    let help = Line::from(vec![
        key("q"),
        hint(" quit  "),
        key("t"),
        hint(" theme  "),
        key("m"),
        hint(" menu  "),
        key("1-9"),
        hint(" jump  "),
        key("↑↓"),
        hint(" scroll  "),
        key("space"),
        hint("/click shooting star"),
    ]);
    frame.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::new().bg(palette.sky_base.to_color())),
        area,
    );
}
