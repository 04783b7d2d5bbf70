#![forbid(unsafe_code)]

//! Interactive demo controller.
//!
//! [`MarqueeApp`] owns one marquee on a [`CellCanvas`] and maps key presses
//! to its commands. It never touches the terminal; the binary draws
//! [`MarqueeApp::strip`] and [`MarqueeApp::status_line`] and feeds it key
//! events, resizes and the current instant.
//!
//! | Key     | Action                                   |
//! |---------|------------------------------------------|
//! | `r`     | run / resume                             |
//! | `p`     | pause                                    |
//! | `s`     | stop                                     |
//! | `l`     | swap between the two text lists          |
//! | `h`     | hide / show (detach / attach)            |
//! | `+` `-` | faster / slower (only while stopped)     |
//! | `c`     | cycle text color                         |
//! | `q` Esc | quit                                     |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use marquee_core::geometry::Size;
use marquee_core::style::Color;
use marquee_core::{Marquee, MarqueeError, RunState};
use web_time::Instant;

use crate::canvas::CellCanvas;
use crate::config::DemoConfig;
use crate::ticker::FrameTicker;

/// Scroll speed change per `+`/`-` press, in cells per second.
pub const SPEED_STEP: f64 = 4.0;

const PALETTE: [Color; 4] = [
    Color::WHITE,
    Color::rgb(255, 200, 0),
    Color::rgb(0, 220, 120),
    Color::rgb(90, 160, 255),
];

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    Pause,
    Stop,
    SwapList,
    ToggleVisibility,
    Faster,
    Slower,
    CycleColor,
    Quit,
}

impl Action {
    /// Map a key event. Releases and unbound keys map to `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Self::Quit);
        }
        match key.code {
            KeyCode::Char('r') => Some(Self::Run),
            KeyCode::Char('p') => Some(Self::Pause),
            KeyCode::Char('s') => Some(Self::Stop),
            KeyCode::Char('l') => Some(Self::SwapList),
            KeyCode::Char('h') => Some(Self::ToggleVisibility),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Self::Faster),
            KeyCode::Char('-') => Some(Self::Slower),
            KeyCode::Char('c') => Some(Self::CycleColor),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The demo's model.
pub struct MarqueeApp {
    marquee: Marquee<CellCanvas, FrameTicker>,
    ticker: FrameTicker,
    lists: [Vec<String>; 2],
    active_list: usize,
    fixed_width: Option<u16>,
    width: u16,
    color_index: usize,
    notice: Option<String>,
    quit: bool,
}

impl MarqueeApp {
    /// Build the app for a terminal `columns` wide. The marquee starts
    /// attached and running.
    pub fn new(config: DemoConfig, columns: u16) -> Result<Self, MarqueeError> {
        let ticker = FrameTicker::from_fps(config.fps);
        let mut marquee = Marquee::with_config(CellCanvas::new(), ticker.clone(), config.marquee)?;
        marquee.set_text_list(config.texts.iter().cloned());

        let mut app = Self {
            marquee,
            ticker,
            lists: [config.texts, config.alternate_texts],
            active_list: 0,
            fixed_width: config.width,
            width: 0,
            color_index: 0,
            notice: None,
            quit: false,
        };
        app.resize(columns);
        app.marquee.attach_to_display();
        app.marquee.run();
        Ok(app)
    }

    pub fn marquee(&self) -> &Marquee<CellCanvas, FrameTicker> {
        &self.marquee
    }

    pub fn ticker(&self) -> &FrameTicker {
        &self.ticker
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Strip width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Follow a terminal resize. A width fixed by configuration is kept,
    /// clamped to the terminal.
    pub fn resize(&mut self, columns: u16) {
        let width = self.fixed_width.map_or(columns, |w| w.min(columns));
        if width != self.width {
            self.width = width;
            self.marquee.set_viewport(Size::new(f64::from(width), 1.0));
        }
    }

    pub fn handle(&mut self, action: Action) {
        tracing::debug!(?action, state = %self.marquee.state(), "key action");
        self.notice = None;
        match action {
            Action::Run => self.marquee.run(),
            Action::Pause => self.marquee.pause(),
            Action::Stop => self.marquee.stop(),
            Action::SwapList => {
                self.active_list = 1 - self.active_list;
                let texts = self.lists[self.active_list].clone();
                self.marquee.set_text_list(texts);
            }
            Action::ToggleVisibility => {
                if self.marquee.is_attached() {
                    self.marquee.detach_from_display();
                } else {
                    self.marquee.attach_to_display();
                }
            }
            Action::Faster => self.change_speed(SPEED_STEP),
            Action::Slower => self.change_speed(-SPEED_STEP),
            Action::CycleColor => {
                self.color_index = (self.color_index + 1) % PALETTE.len();
                self.marquee.set_text_color(PALETTE[self.color_index]);
            }
            Action::Quit => self.quit = true,
        }
    }

    fn change_speed(&mut self, delta: f64) {
        let speed = (self.marquee.scroll_speed() + delta).max(0.0);
        if let Err(err) = self.marquee.try_set_scroll_speed(speed) {
            tracing::debug!(%err, "speed change refused");
            self.notice = Some(err.to_string());
        }
    }

    /// Deliver every tick due at `now`. Returns how many reached the marquee.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        for (id, dt) in self.ticker.poll(now) {
            if Some(id) != self.marquee.tick_id() {
                continue;
            }
            if self.marquee.on_tick(dt).is_some() {
                delivered += 1;
            }
        }
        delivered
    }

    /// When the event loop should wake for the next tick.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.ticker.next_deadline(now)
    }

    /// The marquee row, exactly [`Self::width`] cells wide.
    pub fn strip(&self) -> String {
        self.marquee.surface().render_row(self.width)
    }

    pub fn status_line(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        let visibility = if self.marquee.is_attached() { "shown" } else { "hidden" };
        format!(
            "{} ({visibility}) | speed {} | list {} | r run  p pause  s stop  l list  h hide  +/- speed  c color  q quit",
            state_label(self.marquee.state()),
            self.marquee.scroll_speed(),
            self.active_list + 1,
        )
    }
}

fn state_label(state: RunState) -> &'static str {
    match state {
        RunState::Stopped => "STOPPED",
        RunState::Running => "RUNNING",
        RunState::Paused => "PAUSED",
    }
}
