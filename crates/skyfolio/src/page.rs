//! Scrollable page state: section layout, reveal-on-scroll, skill bars,
//! the navigation menu and smooth scrolling.

use skyfolio_config::Profile;

use crate::easing::{self, Easing};

/// Share of a section that must be on screen before it is revealed.
const REVEAL_THRESHOLD: f64 = 0.2;
/// Rows at the bottom of the viewport that do not count for reveals.
const REVEAL_BOTTOM_MARGIN: f64 = 3.0;
const REVEAL_FADE_MS: f64 = 400.0;
/// Share of the skills section that must be on screen to start the bars.
const SKILLS_THRESHOLD: f64 = 0.5;
const SKILLS_DELAY_MS: f64 = 200.0;
const SKILLS_GROW_MS: f64 = 1200.0;
const SMOOTH_SCROLL_MS: f64 = 450.0;

/// Position and reveal state of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSlot {
    /// First content row.
    pub top: f64,
    /// Rows including the trailing spacer.
    pub height: f64,
    /// When the section was first revealed.
    pub revealed_at: Option<f64>,
    pub has_skills: bool,
}

/// An in-flight smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    start_ms: f64,
}

/// The hamburger-style navigation overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Fraction of a section visible in `[scroll, scroll + viewport - margin)`.
///
/// Sections taller than the visible window are measured against the window.
pub fn visible_fraction(top: f64, height: f64, scroll: f64, viewport: f64, margin: f64) -> f64 {
    let window = (viewport - margin).max(0.0);
    if height <= 0.0 || window <= 0.0 {
        return 0.0;
    }
    let start = top.max(scroll);
    let end = (top + height).min(scroll + window);
    ((end - start).max(0.0) / height.min(window)).min(1.0)
}

/// Scroll and animation state of the portfolio page.
#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<SectionSlot>,
    /// Row offset of the top of the viewport.
    scroll: f64,
    viewport_rows: f64,
    smooth: Option<ScrollAnimation>,
    /// When the skill bars start growing.
    skills_start: Option<f64>,
    pub menu: NavMenu,
}

impl Page {
    /// Lay out the profile's sections top to bottom.
    pub fn new(profile: &Profile) -> Self {
        let mut top = 0.0;
        let sections = profile
            .sections
            .iter()
            .map(|section| {
                let height = (1 + section.body.len() + section.skills.len() + 1) as f64;
                let slot = SectionSlot {
                    top,
                    height,
                    revealed_at: None,
                    has_skills: section.has_skills(),
                };
                top += height;
                slot
            })
            .collect();
        Self {
            sections,
            scroll: 0.0,
            viewport_rows: 0.0,
            smooth: None,
            skills_start: None,
            menu: NavMenu::default(),
        }
    }

    pub fn sections(&self) -> &[SectionSlot] {
        &self.sections
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Scroll offset as a whole row.
    pub fn scroll_row(&self) -> u16 {
        self.scroll.round().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn content_height(&self) -> f64 {
        self.sections.iter().map(|s| s.height).sum()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport_rows).max(0.0)
    }

    fn clamp_scroll(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max_scroll())
    }

    pub fn viewport_rows(&self) -> f64 {
        self.viewport_rows
    }

    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows as f64;
        self.scroll = self.clamp_scroll(self.scroll);
    }

    /// Scroll by `rows` (negative is up), cancelling any smooth scroll.
    pub fn scroll_by(&mut self, rows: f64) {
        self.smooth = None;
        self.scroll = self.clamp_scroll(self.scroll + rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.smooth = None;
        self.scroll = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.smooth = None;
        self.scroll = self.max_scroll();
    }

    /// Close the menu and smoothly scroll to section `index`.
    ///
    /// Returns `false` and does nothing for an unknown section.
    pub fn jump_to(&mut self, index: usize, now_ms: f64) -> bool {
        let Some(target) = self.sections.get(index).map(|s| s.top) else {
            return false;
        };
        self.menu.close();
        self.smooth = Some(ScrollAnimation {
            from: self.scroll,
            to: self.clamp_scroll(target),
            start_ms: now_ms,
        });
        true
    }

    pub fn is_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    /// Advance smooth scrolling and check reveal triggers.
    pub fn update(&mut self, now_ms: f64) {
        if let Some(anim) = self.smooth {
            let t = easing::progress(now_ms, anim.start_ms, SMOOTH_SCROLL_MS);
            self.scroll = anim.from + (anim.to - anim.from) * Easing::CubicInOut.apply(t);
            if t >= 1.0 {
                self.scroll = anim.to;
                self.smooth = None;
            }
        }

        for slot in &mut self.sections {
            if slot.revealed_at.is_none()
                && visible_fraction(
                    slot.top,
                    slot.height,
                    self.scroll,
                    self.viewport_rows,
                    REVEAL_BOTTOM_MARGIN,
                ) >= REVEAL_THRESHOLD
            {
                slot.revealed_at = Some(now_ms);
            }

            if slot.has_skills
                && self.skills_start.is_none()
                && visible_fraction(slot.top, slot.height, self.scroll, self.viewport_rows, 0.0)
                    >= SKILLS_THRESHOLD
            {
                self.skills_start = Some(now_ms + SKILLS_DELAY_MS);
            }
        }
    }

    /// Opacity of section `index` at `now_ms`, 0 while hidden.
    pub fn reveal_opacity(&self, index: usize, now_ms: f64) -> f64 {
        match self.sections.get(index).and_then(|s| s.revealed_at) {
            Some(at) => easing::progress(now_ms, at, REVEAL_FADE_MS),
            None => 0.0,
        }
    }

    /// How far skill bars have grown towards their targets, in `[0, 1]`.
    pub fn skill_fill(&self, now_ms: f64) -> f64 {
        match self.skills_start {
            Some(start) => {
                Easing::CubicOut.apply(easing::progress(now_ms, start, SKILLS_GROW_MS))
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use skyfolio_config::{Section, Skill};

    use super::*;

    fn section(id: &str, body_rows: usize, skills: usize) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_string(),
            body: vec!["line".to_string(); body_rows],
            skills: (0..skills).map(|i| Skill::new(format!("s{i}"), 50)).collect(),
        }
    }

    /// Heights: about 10, skills 6, projects 20, contact 4.
    fn page() -> Page {
        let profile = Profile {
            name: "Test".to_string(),
            tagline: String::new(),
            sections: vec![
                section("about", 8, 0),
                section("skills", 0, 4),
                section("projects", 18, 0),
                section("contact", 2, 0),
            ],
        };
        let mut page = Page::new(&profile);
        page.set_viewport_rows(12);
        page
    }

    #[test]
    fn test_layout_offsets() {
        let p = page();
        let tops: Vec<f64> = p.sections().iter().map(|s| s.top).collect();
        assert_eq!(tops, vec![0.0, 10.0, 16.0, 36.0]);
        assert_eq!(p.content_height(), 40.0);
        assert_eq!(p.max_scroll(), 28.0);
    }

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(0.0, 10.0, 0.0, 20.0, 0.0), 1.0);
        assert_eq!(visible_fraction(15.0, 10.0, 0.0, 20.0, 0.0), 0.5);
        assert_eq!(visible_fraction(15.0, 10.0, 0.0, 20.0, 3.0), 0.2);
        assert_eq!(visible_fraction(30.0, 10.0, 0.0, 20.0, 0.0), 0.0);
        // Taller than the window: measured against the window.
        assert_eq!(visible_fraction(0.0, 100.0, 10.0, 20.0, 0.0), 1.0);
    }

    #[test]
    fn test_reveal_is_sticky_and_fades() {
        let mut p = page();
        p.update(0.0);
        // Window is rows 0..9: about (0..10) revealed, skills (10..16) not.
        assert_eq!(p.sections()[0].revealed_at, Some(0.0));
        assert_eq!(p.sections()[1].revealed_at, None);
        assert_eq!(p.reveal_opacity(0, 200.0), 0.5);
        assert_eq!(p.reveal_opacity(1, 200.0), 0.0);

        // Jumping to the bottom skips the skills section entirely.
        p.scroll_by(30.0);
        p.update(1000.0);
        assert_eq!(p.sections()[1].revealed_at, None);
        assert_eq!(p.sections()[2].revealed_at, Some(1000.0));
        assert_eq!(p.sections()[3].revealed_at, Some(1000.0));

        p.scroll_to_top();
        p.scroll_by(10.0);
        p.update(2000.0);
        assert!(p.sections().iter().all(|s| s.revealed_at.is_some()));
        assert_eq!(p.sections()[0].revealed_at, Some(0.0));
        assert_eq!(p.sections()[1].revealed_at, Some(2000.0));
    }

    #[test]
    fn test_skill_bars_start_once_half_visible() {
        let mut p = page();
        p.update(0.0);
        assert_eq!(p.skill_fill(5000.0), 0.0);

        // Window rows 2..14 shows 4 of the 6 skill rows.
        p.scroll_by(2.0);
        p.update(1000.0);
        assert_eq!(p.skill_fill(1200.0), 0.0);
        assert!((p.skill_fill(1800.0) - Easing::CubicOut.apply(0.5)).abs() < 1e-12);
        assert_eq!(p.skill_fill(2400.0), 1.0);

        // Scrolling away and back does not restart them.
        p.scroll_to_bottom();
        p.update(3000.0);
        p.scroll_to_top();
        p.scroll_by(2.0);
        p.update(4000.0);
        assert_eq!(p.skill_fill(4000.0), 1.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut p = page();
        p.scroll_by(-5.0);
        assert_eq!(p.scroll(), 0.0);
        p.scroll_by(500.0);
        assert_eq!(p.scroll(), 28.0);
        p.set_viewport_rows(60);
        assert_eq!(p.scroll(), 0.0);
    }

    #[test]
    fn test_jump_smoothly_scrolls_and_closes_menu() {
        let mut p = page();
        p.menu.toggle();
        assert!(p.menu.is_open());

        assert!(p.jump_to(2, 100.0));
        assert!(!p.menu.is_open());
        p.update(100.0);
        assert_eq!(p.scroll(), 0.0);
        p.update(325.0);
        assert!((p.scroll() - 8.0).abs() < 1e-9);
        p.update(550.0);
        assert_eq!(p.scroll(), 16.0);
        assert!(!p.is_scrolling());
    }

    #[test]
    fn test_jump_target_is_clamped_and_unknown_ignored() {
        let mut p = page();
        assert!(p.jump_to(3, 0.0));
        p.update(1000.0);
        assert_eq!(p.scroll(), 28.0);
        assert!(!p.jump_to(9, 0.0));
    }

    #[test]
    fn test_manual_scroll_cancels_smooth_scroll() {
        let mut p = page();
        p.jump_to(2, 0.0);
        p.update(100.0);
        p.scroll_by(1.0);
        assert!(!p.is_scrolling());
        let here = p.scroll();
        p.update(1000.0);
        assert_eq!(p.scroll(), here);
    }
}
