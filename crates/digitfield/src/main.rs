use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use digitfield_config::Config;
use digitfield_field::{BufferSurface, ParticleField, cell_center, viewport_for};
use fastrand::Rng;
use log::{debug, info};
use ratatui::{DefaultTerminal, layout::Rect};

mod cli;
mod logging;

use cli::Cli;

/// Event poll timeout while no field is mounted.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref());

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let config = cli.apply(config);
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let rng = cli.seed.map_or_else(Rng::new, Rng::with_seed);
    let terminal = ratatui::init();
    let result = App::new(config, rng).run(terminal);
    ratatui::restore();
    result
}

/// Mouse reporting, enabled for as long as the guard lives.
#[derive(Debug)]
struct PointerCapture;

impl PointerCapture {
    fn enable() -> io::Result<Self> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Active configuration; the preset changes at runtime.
    config: Config,
    /// Source of every particle layout.
    rng: Rng,
    /// The mounted field, absent while the terminal has no area.
    field: Option<ParticleField>,
    /// Whether mounting should capture the mouse.
    capture_pointer: bool,
    /// Mouse capture held while a field is mounted.
    capture: Option<PointerCapture>,
    /// Last known terminal size in cells.
    size: (u16, u16),
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, rng: Rng) -> Self {
        Self {
            running: false,
            config,
            rng,
            field: None,
            capture_pointer: false,
            capture: None,
            size: (0, 0),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.capture_pointer = true;

        let size = terminal.size()?;
        self.mount(size.width, size.height)?;

        while self.running {
            let cell = self.config.cell;
            if let Some(field) = self.field.as_mut()
                && let Some(timestamp) = field.frames_mut().poll(Instant::now())
            {
                terminal.draw(|frame| {
                    let area = frame.area();
                    let mut surface = BufferSurface::new(frame.buffer_mut(), area, cell);
                    field.frame(timestamp, &mut surface);
                })?;
                field.frames_mut().request(Instant::now());
            }

            let timeout = self
                .field
                .as_ref()
                .and_then(|field| field.frames().timeout(Instant::now()))
                .unwrap_or(IDLE_POLL);
            self.handle_crossterm_events(timeout)?;
        }

        self.unmount();
        Ok(())
    }

    /// Mount a fresh field for a terminal of the given size in cells.
    ///
    /// Nothing is mounted when the terminal has no area.
    fn mount(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.size = (width, height);
        let viewport = viewport_for(Rect::new(0, 0, width, height), self.config.cell);
        self.field = ParticleField::mount(
            self.config.field_config(),
            viewport,
            self.rng.fork(),
            Instant::now(),
            self.config.target_fps,
        );

        if self.field.is_some() {
            info!("mounted {} preset on {width}x{height}", self.config.preset.name());
            if self.capture_pointer && self.capture.is_none() {
                self.capture = Some(PointerCapture::enable()?);
            }
        } else {
            debug!("terminal has no area, nothing mounted");
        }
        Ok(())
    }

    /// Tear the field down and release the mouse.
    fn unmount(&mut self) {
        if let Some(field) = self.field.take() {
            field.unmount();
        }
        self.capture = None;
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> io::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p')) => self.cycle_preset()?,
            _ => {}
        }
        Ok(())
    }

    /// Track the pointer in virtual pixels.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            let (x, y) = cell_center(mouse.column, mouse.row, self.config.cell);
            field.pointer_moved(x, y);
        }
    }

    /// Rebuild the field for the new terminal size.
    fn on_resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.size = (width, height);
        match self.field.as_mut() {
            Some(field) => {
                field.resize(viewport_for(Rect::new(0, 0, width, height), self.config.cell));
                Ok(())
            }
            None => self.mount(width, height),
        }
    }

    /// Switch to the next preset, replacing the mounted field.
    fn cycle_preset(&mut self) -> io::Result<()> {
        self.config.preset = self.config.preset.next();
        if let Some(field) = self.field.take() {
            field.unmount();
        }
        let (width, height) = self.size;
        self.mount(width, height)
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
