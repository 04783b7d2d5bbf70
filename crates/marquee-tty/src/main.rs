#![forbid(unsafe_code)]

//! Interactive marquee demo.
//!
//! # Running
//!
//! ```sh
//! cargo run -p marquee-tty
//! MARQUEE_TEXT="first|second|third" MARQUEE_SPEED=20 cargo run -p marquee-tty
//! MARQUEE_LOG_FILE=/tmp/marquee.log MARQUEE_LOG=marquee_core=trace cargo run -p marquee-tty
//! ```
//!
//! See [`marquee_tty::config`] for every variable and [`marquee_tty::app`]
//! for the key bindings.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use marquee_core::style::Color;
use marquee_tty::{Action, DemoConfig, MarqueeApp, TerminalSession};
use web_time::Instant;

/// File that receives log output. Unset means no logging.
const ENV_LOG_FILE: &str = "MARQUEE_LOG_FILE";
/// Log filter directives, `EnvFilter` syntax.
const ENV_LOG: &str = "MARQUEE_LOG";

/// Event wait when no tick is pending (stopped, paused or hidden).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn init_logging() -> io::Result<()> {
    match std::env::var_os(ENV_LOG_FILE) {
        Some(path) => init_logging_to(Path::new(&path)),
        None => Ok(()),
    }
}

/// Install the global subscriber writing to `path`. Fails if the file cannot
/// be created or a subscriber is already installed.
fn init_logging_to(path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}

fn term_color(color: Color) -> style::Color {
    if color.is_transparent() {
        style::Color::Reset
    } else {
        style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

fn draw(out: &mut impl Write, app: &MarqueeApp, (cols, rows): (u16, u16)) -> io::Result<()> {
    let marquee = app.marquee();
    let strip_row = rows.saturating_sub(1) / 2;
    let background = marquee
        .background_color()
        .map_or(style::Color::Reset, term_color);
    let status: String = app.status_line().chars().take(usize::from(cols)).collect();

    queue!(
        out,
        MoveTo(0, strip_row),
        SetForegroundColor(term_color(marquee.text_color())),
        SetBackgroundColor(background),
        Print(app.strip()),
        ResetColor,
        MoveTo(0, rows.saturating_sub(1)),
        Print(status),
        Clear(ClearType::UntilNewLine)
    )?;
    out.flush()
}

fn run(session: &TerminalSession, app: &mut MarqueeApp) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut size = session.size()?;

    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now);
        draw(&mut stdout, app, size)?;

        let timeout = app
            .next_deadline(now)
            .map_or(IDLE_POLL, |deadline| {
                deadline.saturating_duration_since(Instant::now())
            });
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = Action::from_key(key) {
                    app.handle(action);
                }
            }
            Event::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "terminal resized");
                size = (cols, rows);
                app.resize(cols);
                queue!(stdout, Clear(ClearType::All))?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging()?;
    let config = DemoConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let session = TerminalSession::new()?;
    let (cols, _) = session.size()?;
    let mut app = MarqueeApp::new(config, cols).map_err(io::Error::other)?;
    tracing::info!(cols, "marquee demo started");

    let result = run(&session, &mut app);
    drop(app);
    drop(session);
    if let Err(err) = &result {
        eprintln!("marquee-demo: {err}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_logging_init_is_reported() {
        let path = std::env::temp_dir().join(format!("marquee-demo-log-{}.log", std::process::id()));
        let first = init_logging_to(&path);
        let second = init_logging_to(&path);
        std::fs::remove_file(&path).ok();
        assert!(first.is_ok(), "{first:?}");
        assert!(second.is_err());
    }

    #[test]
    fn unwritable_log_path_is_reported() {
        let err = init_logging_to(Path::new("/nonexistent/dir/marquee.log")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
