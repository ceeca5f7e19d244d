use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub const TICK: Duration = Duration::from_millis(33);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const GREEN: Rgb = Rgb { r: 0, g: 200, b: 90 };
pub const GOLD: Rgb = Rgb { r: 255, g: 215, b: 0 };
pub const RED: Rgb = Rgb { r: 220, g: 40, b: 40 };
pub const SLATE: Rgb = Rgb { r: 50, g: 50, b: 60 };
pub const BLUE: Rgb = Rgb { r: 80, g: 140, b: 255 };

/// Raw mode plus alternate screen for as long as the guard lives.
pub struct TerminalGuard
{
    stdout: Stdout,
    mouse: bool,
}

impl TerminalGuard
{
    pub fn enter(mouse: bool) -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(Self { stdout, mouse })
    }

    /// Redraws the whole screen from `lines`.
    pub fn present(&mut self, lines: &[String]) -> io::Result<()>
    {
        let output = format!("{}\r\n", lines.join("\r\n"));
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        if self.mouse {
            let _ = execute!(self.stdout, DisableMouseCapture);
        }
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub fn size() -> (u16, u16)
{
    terminal::size().unwrap_or((80, 24))
}

/// Discards any queued input events.
pub fn drain_events() -> io::Result<()>
{
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}

pub fn background(text: &str, color: Rgb) -> String
{
    format!("\x1b[48;2;{};{};{}m{}\x1b[0m", color.r, color.g, color.b, text)
}

pub fn foreground(text: &str, color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.r, color.g, color.b, text)
}
