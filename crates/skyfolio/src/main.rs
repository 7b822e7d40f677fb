use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};
use skyfolio_config::{Config, Profile, SkySettings, ThemeStore};
use skyfolio_core::{Surface, Theme};
use skyfolio_sky::{PixelCanvas, SkyParams, SkySession};

mod easing;
mod events;
mod intro;
mod logging;
mod page;
mod ui;

use events::{AppEvent, EventHub};
use intro::Typewriter;
use page::Page;

/// Rows moved by one mouse wheel step.
const WHEEL_ROWS: f64 = 3.0;

/// A personal portfolio in the terminal, under an animated night sky.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file [default: platform config dir]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Profile with the page content [default: platform config dir]
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Start with this theme (dark or light) instead of the saved one
    #[arg(long)]
    theme: Option<Theme>,
    /// Seed the random generator for a reproducible sky
    #[arg(long)]
    seed: Option<u64>,
    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(skyfolio_config::config_path);
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    let config = config.normalized();

    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }
    log::info!("skyfolio {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        log::info!("config: {}", path.display());
    }

    let profile_path = cli.profile.clone().or_else(skyfolio_config::profile_path);
    let profile = match &profile_path {
        Some(path) => {
            log::info!("profile: {}", path.display());
            Profile::load(path)?
        }
        None => Profile::default(),
    };

    let theme_store = ThemeStore::locate();
    let theme = cli.theme.unwrap_or_else(|| saved_theme(theme_store.as_ref()));

    let rng = match cli.seed {
        Some(seed) => {
            log::info!("seed: {seed}");
            fastrand::Rng::with_seed(seed)
        }
        None => fastrand::Rng::new(),
    };

    let app = App::new(config, profile, theme, theme_store, rng);
    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .wrap_err("failed to enable mouse capture")
        .and_then(|()| app.run(terminal));
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    log::info!("skyfolio exiting");
    result
}

/// Persisted theme, falling back to the default.
fn saved_theme(store: Option<&ThemeStore>) -> Theme {
    let Some(store) = store else {
        return Theme::default();
    };
    match store.load() {
        Ok(theme) => theme.unwrap_or_default(),
        Err(err) => {
            log::warn!("ignoring saved theme: {err:#}");
            Theme::default()
        }
    }
}

fn sky_params(settings: &SkySettings) -> SkyParams {
    SkyParams {
        min_stars: settings.min_stars,
        area_per_star: settings.area_per_star,
        spawn_probability: settings.spawn_probability,
        max_shooting_stars: settings.max_shooting_stars,
        exit_margin: settings.exit_margin,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    profile: Profile,
    theme: Theme,
    /// Where theme changes are saved; `None` disables persistence.
    theme_store: Option<ThemeStore>,
    sky: SkySession,
    canvas: PixelCanvas,
    typewriter: Typewriter,
    page: Page,
    started: Instant,
    /// Regenerate the sky on the next frame even if the size is unchanged.
    resize_pending: bool,
    /// Menu overlay position from the last frame, for click hit-testing.
    menu_area: Option<Rect>,
}

impl App {
    pub fn new(
        config: Config,
        profile: Profile,
        theme: Theme,
        theme_store: Option<ThemeStore>,
        rng: fastrand::Rng,
    ) -> Self {
        let sky = SkySession::new(sky_params(&config.sky), rng, 0.0);
        let canvas = PixelCanvas::new(config.sky.cell_width, config.sky.cell_height);
        let typewriter = Typewriter::new(
            profile.name.clone(),
            config.intro.start_delay_ms,
            config.intro.char_interval_ms,
        );
        let page = Page::new(&profile);
        Self {
            running: false,
            config,
            profile,
            theme,
            theme_store,
            sky,
            canvas,
            typewriter,
            page,
            started: Instant::now(),
            resize_pending: true,
            menu_area: None,
        }
    }

    /// Milliseconds since launch.
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let events = EventHub::new()
            .with_input_reader()
            .with_spawn_timer(Duration::from_millis(self.config.sky.spawn_interval_ms));
        let frame_time = Duration::from_secs_f64(1.0 / self.config.fps as f64);

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.drain_events(&events, Instant::now() + frame_time)?;
        }
        Ok(())
    }

    /// Handle events until `deadline`, even if more keep arriving.
    fn drain_events(&mut self, events: &EventHub, deadline: Instant) -> Result<()> {
        while self.running {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match events.next(remaining) {
                Some(event) => self.handle_event(event)?,
                None => break,
            }
            if remaining.is_zero() {
                break;
            }
        }
        Ok(())
    }

    /// Renders the sky and the page on top of it.
    fn render(&mut self, frame: &mut Frame) {
        let now = self.now_ms();
        let area = frame.area();
        let palette = self.theme.palette();

        if self.resize_pending || self.canvas.cells() != (area.width, area.height) {
            self.canvas.resize(area.width, area.height);
            self.sky.resize(self.canvas.viewport());
            self.resize_pending = false;
        }
        self.canvas.set_base(palette.sky_base);
        self.sky.frame(now, &mut self.canvas);
        frame.render_widget(&self.canvas, area);

        let chunks = Layout::vertical([
            Constraint::Length(ui::header_height(area.height)),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

        let column = ui::content_column(chunks[1]);
        let inner = ui::page_block(&palette).inner(column);
        self.page.set_viewport_rows(inner.height);
        self.page.update(now);

        ui::render_header(
            frame,
            chunks[0],
            &self.typewriter,
            &self.profile.tagline,
            now,
            self.theme,
        );
        ui::render_page(frame, column, &self.profile, &self.page, now, &palette);
        self.menu_area = self
            .page
            .menu
            .is_open()
            .then(|| ui::render_menu(frame, column, &self.profile, &palette));
        ui::render_help(frame, chunks[2], &palette);
    }

    /// Applies one event from the hub.
    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::SpawnTick => {
                self.sky.on_spawn_timer();
            }
            AppEvent::InputError(err) => {
                return Err(err).wrap_err("failed to read terminal input");
            }
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.on_key_event(key)
            }
            AppEvent::Input(Event::Mouse(mouse)) => self.on_mouse_event(mouse),
            AppEvent::Input(Event::Resize(_, _)) => self.resize_pending = true,
            AppEvent::Input(_) => {}
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page_rows = self.page_rows();
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('m')) => self.page.menu.toggle(),
            (_, KeyCode::Char(' ')) => self.sky.on_click(),
            (_, KeyCode::Char(digit @ '1'..='9')) => {
                let index = digit as usize - '1' as usize;
                let now = self.now_ms();
                self.page.jump_to(index, now);
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => self.page.scroll_by(-1.0),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.page.scroll_by(1.0),
            (_, KeyCode::PageUp) => self.page.scroll_by(-page_rows),
            (_, KeyCode::PageDown) => self.page.scroll_by(page_rows),
            (_, KeyCode::Home) => self.page.scroll_to_top(),
            (_, KeyCode::End) => self.page.scroll_to_bottom(),
            _ => {}
        }
    }

    /// Handles clicks and the mouse wheel.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.sky.on_click();
                let picked = self
                    .menu_area
                    .filter(|_| self.page.menu.is_open())
                    .and_then(|menu| ui::menu_hit(menu, mouse.column, mouse.row));
                if let Some(index) = picked {
                    let now = self.now_ms();
                    self.page.jump_to(index, now);
                }
            }
            MouseEventKind::ScrollUp => self.page.scroll_by(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.page.scroll_by(WHEEL_ROWS),
            _ => {}
        }
    }

    /// One screen of page rows, leaving a row of overlap.
    fn page_rows(&self) -> f64 {
        (self.page.viewport_rows() - 1.0).max(1.0)
    }

    /// Switch theme and remember the choice.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        log::info!("theme changed to {}", self.theme);
        if let Some(store) = &self.theme_store {
            if let Err(err) = store.save(self.theme) {
                log::warn!("failed to save theme to {}: {err:#}", store.path().display());
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
