use crate::config::PlayConfig;
use crate::error::AppError;
use crate::games::choice::{Choice, ChoiceGame, Outcome};
use crate::games::memory::{MemoryGame, PAIR_COUNT};
use crate::games::reaction::{Cell, Playfield, ReactionGame, SPEEDUP_SCORE, TARGET_SCORE};
use crate::levels::{Event, LEVEL_COUNT, Levels, Signal, Stage};
use crate::random::RandomSource;
use crate::terminal::{self, BLUE, GOLD, GREEN, RED, SLATE, TICK, TerminalGuard, background, foreground};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};

const BODY_TOP: u16 = 3;
const FOOTER_LINES: u16 = 3;
const GRID_COLUMNS: usize = 5;
const CARD_STRIDE: u16 = 4;
const TARGET_WIDTH: u16 = 3;
const TARGET_LABELS: [char; 10] = ['a', 's', 'd', 'f', 'j', 'k', 'l', 'g', 'h', 'e'];
const NOTICE_TTL: Duration = Duration::from_millis(2500);

/// Screen geometry derived from the terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout
{
    field_width: u16,
    field_height: u16,
}

impl Layout
{
    fn from_size((cols, rows): (u16, u16)) -> Self
    {
        let field_width = cols.saturating_sub(2).clamp(12, 100);
        let reserved = BODY_TOP + 2 + FOOTER_LINES;
        let field_height = rows.saturating_sub(reserved).clamp(4, 20);
        Self {
            field_width,
            field_height,
        }
    }

    /// Cells the target's left edge may occupy.
    fn playfield(self) -> Playfield
    {
        Playfield::new(self.field_width - TARGET_WIDTH + 1, self.field_height)
    }

    fn field_cell(self, column: u16, row: u16) -> Option<Cell>
    {
        let top = BODY_TOP + 1;
        if column == 0 || row < top {
            return None;
        }
        let cell = Cell {
            x: column - 1,
            y: row - top,
        };
        (cell.x < self.field_width && cell.y < self.field_height).then_some(cell)
    }
}

/// Presentation state that never feeds back into game decisions.
struct PlayScreen
{
    cursor: usize,
    notice: Option<(String, Instant)>,
    layout: Option<Layout>,
}

impl PlayScreen
{
    fn new() -> Self
    {
        Self {
            cursor: 0,
            notice: None,
            layout: None,
        }
    }

    fn set_notice(&mut self, text: impl Into<String>, now: Instant)
    {
        self.notice = Some((text.into(), now));
    }

    fn notice(&self, now: Instant) -> Option<&str>
    {
        self.notice
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < NOTICE_TTL)
            .map(|(text, _)| text.as_str())
    }

    /// Reacts to an outbound signal. Returns true when the screen should close.
    fn on_signal(&mut self, signal: Signal, now: Instant) -> bool
    {
        match signal {
            Signal::LevelCompleted { level } => {
                self.set_notice(format!("Level {level} passed! Press Enter to continue."), now);
            }
            Signal::LevelLocked { level } => {
                self.set_notice(format!("Level {level} is locked. Finish it first."), now);
            }
            Signal::GameCompleted => {
                self.set_notice("Every level cleared.", now);
            }
            Signal::ExitConfirmed => return true,
        }
        false
    }

    fn translate<R: RandomSource>(
        &mut self,
        input: &TermEvent,
        levels: &Levels<R>,
        layout: Layout,
        now: Instant,
    ) -> Option<Event>
    {
        match input {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                self.translate_key(*key, levels)
            }
            TermEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) if !levels.is_exit_pending() => match levels.stage() {
                Stage::Memory(game) => {
                    let index = card_at(*column, *row, game.deck().len())?;
                    self.cursor = index;
                    Some(Event::TapCard(index))
                }
                Stage::Reaction(game) => {
                    let cell = layout.field_cell(*column, *row)?;
                    target_hit(game, cell, now).then_some(Event::TapTarget)
                }
                Stage::Choice(_) | Stage::Completed => None,
            },
            _ => None,
        }
    }

    fn translate_key<R: RandomSource>(
        &mut self,
        key: KeyEvent,
        levels: &Levels<R>,
    ) -> Option<Event>
    {
        let KeyEvent { code, modifiers, .. } = key;
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        if levels.is_exit_pending() {
            return match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(Event::ConfirmExit),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Event::CancelExit),
                _ => None,
            };
        }

        match code {
            KeyCode::Esc => return Some(Event::RequestExit),
            KeyCode::Char('c') if ctrl => return Some(Event::RequestExit),
            KeyCode::Char('r') if ctrl => return Some(Event::Restart),
            KeyCode::Enter if levels.is_completed() => return Some(Event::Restart),
            KeyCode::Enter => return Some(Event::Advance),
            _ => {}
        }
        if ctrl {
            return None;
        }

        match levels.stage() {
            Stage::Choice(_) => choice_for_key(code).map(Event::SelectChoice),
            Stage::Memory(game) => self.move_cursor(code, game.deck().len()),
            Stage::Reaction(game) => match code {
                KeyCode::Char(ch) if ch.to_ascii_lowercase() == target_label(game) => {
                    Some(Event::TapTarget)
                }
                _ => None,
            },
            Stage::Completed => None,
        }
    }

    fn move_cursor(&mut self, code: KeyCode, cards: usize) -> Option<Event>
    {
        if cards == 0 {
            return None;
        }
        let rows = cards.div_ceil(GRID_COLUMNS);
        let (mut col, mut row) = (self.cursor % GRID_COLUMNS, self.cursor / GRID_COLUMNS);
        match code {
            KeyCode::Left => col = (col + GRID_COLUMNS - 1) % GRID_COLUMNS,
            KeyCode::Right => col = (col + 1) % GRID_COLUMNS,
            KeyCode::Up => row = (row + rows - 1) % rows,
            KeyCode::Down => row = (row + 1) % rows,
            KeyCode::Char(' ') => return Some(Event::TapCard(self.cursor)),
            _ => return None,
        }
        self.cursor = (row * GRID_COLUMNS + col).min(cards - 1);
        None
    }
}

pub fn run(config: &PlayConfig) -> Result<(), AppError>
{
    let mut term = TerminalGuard::enter(config.mouse)?;
    let mut screen = PlayScreen::new();
    let mut levels = Levels::new(config.rng(), Layout::from_size(terminal::size()).playfield());
    let mut last_tick = Instant::now();
    tracing::info!(seed = ?config.seed, "levels session started");

    'session: loop {
        let now = Instant::now();
        let layout = Layout::from_size(terminal::size());
        if screen.layout != Some(layout) {
            levels.handle(Event::Resize(layout.playfield()), now);
            screen.layout = Some(layout);
        }
        levels.handle(Event::Tick, now);

        while event::poll(Duration::ZERO)? {
            let input = event::read()?;
            let Some(action) = screen.translate(&input, &levels, layout, now) else {
                continue;
            };
            if action == Event::Restart {
                screen.cursor = 0;
            }
            for signal in levels.handle(action, now) {
                if screen.on_signal(signal, now) {
                    break 'session;
                }
            }
        }

        if last_tick.elapsed() >= TICK {
            term.present(&render(&levels, &screen, layout, now))?;
            last_tick = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    tracing::info!(level = levels.level(), "levels session ended");
    Ok(())
}

fn render<R: RandomSource>(
    levels: &Levels<R>,
    screen: &PlayScreen,
    layout: Layout,
    now: Instant,
) -> Vec<String>
{
    let state = levels.snapshot();
    let mut lines = Vec::new();
    if state.completed {
        lines.push("Mini Levels - Complete".to_string());
    } else {
        lines.push(format!(
            "Mini Levels - Level {}/{}: {}",
            state.level,
            LEVEL_COUNT,
            stage_title(levels.stage())
        ));
    }
    lines.push(if state.passed {
        foreground("Passed - press Enter for the next level", GREEN)
    } else {
        stage_goal(levels.stage())
    });
    lines.push(String::new());

    match levels.stage() {
        Stage::Choice(game) => render_choice(&mut lines, game),
        Stage::Memory(game) => render_memory(&mut lines, game, screen.cursor),
        Stage::Reaction(game) => render_reaction(&mut lines, game, layout, now),
        Stage::Completed => {
            lines.push(foreground("All levels complete!", GOLD));
            lines.push(String::new());
            lines.push("Press Enter to play again.".to_string());
        }
    }

    lines.push(String::new());
    if state.exit_pending {
        lines.push(foreground("Quit the game? (y/n)", RED));
    } else {
        lines.push(screen.notice(now).unwrap_or_default().to_string());
    }
    lines.push("Enter next level. Ctrl+R restart. Esc quits.".to_string());
    lines
}

fn stage_title(stage: &Stage) -> &'static str
{
    match stage {
        Stage::Choice(_) => "Rock Paper Scissors",
        Stage::Memory(_) => "Memory Match",
        Stage::Reaction(_) => "Catch the Target",
        Stage::Completed => "Complete",
    }
}

fn stage_goal(stage: &Stage) -> String
{
    match stage {
        Stage::Choice(_) => "Win one round to unlock the next level.".to_string(),
        Stage::Memory(game) => format!(
            "Match every pair. Pairs found: {}/{}",
            game.matched().len() / 2,
            game.deck().len() / 2
        ),
        Stage::Reaction(game) => format!(
            "Catch the target {} times. Score: {}{}",
            TARGET_SCORE,
            game.score(),
            if game.score() >= SPEEDUP_SCORE { "  (fast!)" } else { "" }
        ),
        Stage::Completed => String::new(),
    }
}

fn render_choice(lines: &mut Vec<String>, game: &ChoiceGame)
{
    lines.push("Pick: [r]ock  [p]aper  [s]cissors   (or 1/2/3)".to_string());
    lines.push(String::new());
    match game.last_round() {
        None => lines.push("No rounds yet.".to_string()),
        Some(round) => {
            lines.push(format!("You: {}   Computer: {}", round.user, round.computer));
            lines.push(match round.outcome {
                Outcome::Win => foreground("You win!", GREEN),
                Outcome::Lose => foreground("You lose.", RED),
                Outcome::Tie => foreground("It's a tie.", GOLD),
            });
        }
    }
    lines.push(format!("Rounds played: {}", game.rounds_played()));
}

fn render_memory(lines: &mut Vec<String>, game: &MemoryGame, cursor: usize)
{
    for (row, cards) in game.deck().chunks(GRID_COLUMNS).enumerate() {
        let mut line = String::new();
        for (col, symbol) in cards.iter().enumerate() {
            let index = row * GRID_COLUMNS + col;
            let face = if game.is_face_up(index) {
                format!(" {symbol} ")
            } else {
                " ? ".to_string()
            };
            let color = if index == cursor {
                BLUE
            } else if game.matched().contains(&index) {
                GREEN
            } else if game.selected().contains(&index) {
                GOLD
            } else {
                SLATE
            };
            line.push_str(&background(&face, color));
            line.push(' ');
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(format!(
        "Arrows move, Space flips, or click a card. {PAIR_COUNT} pairs in play."
    ));
}

fn render_reaction(lines: &mut Vec<String>, game: &ReactionGame, layout: Layout, now: Instant)
{
    let width = layout.field_width as usize;
    let target = game.cell(now);
    let label = target_label(game);
    lines.push(format!("+{}+", "-".repeat(width)));
    for y in 0..layout.field_height {
        if y != target.y {
            lines.push(format!("|{}|", " ".repeat(width)));
            continue;
        }
        let left = (target.x as usize).min(width.saturating_sub(TARGET_WIDTH as usize));
        let right = width.saturating_sub(left + TARGET_WIDTH as usize);
        lines.push(format!(
            "|{}{}{}|",
            " ".repeat(left),
            foreground(&format!("[{label}]"), GOLD),
            " ".repeat(right)
        ));
    }
    lines.push(format!("+{}+", "-".repeat(width)));
}

fn choice_for_key(code: KeyCode) -> Option<Choice>
{
    match code {
        KeyCode::Char('r') | KeyCode::Char('1') => Some(Choice::Rock),
        KeyCode::Char('p') | KeyCode::Char('2') => Some(Choice::Paper),
        KeyCode::Char('s') | KeyCode::Char('3') => Some(Choice::Scissors),
        _ => None,
    }
}

/// Letter shown on the target; changes with every relocation.
fn target_label(game: &ReactionGame) -> char
{
    TARGET_LABELS[game.relocations() as usize % TARGET_LABELS.len()]
}

fn target_hit(game: &ReactionGame, cell: Cell, now: Instant) -> bool
{
    let target = game.cell(now);
    cell.y == target.y && cell.x >= target.x && cell.x < target.x + TARGET_WIDTH
}

fn card_at(column: u16, row: u16, cards: usize) -> Option<usize>
{
    if row < BODY_TOP || column % CARD_STRIDE == CARD_STRIDE - 1 {
        return None;
    }
    let index = (row - BODY_TOP) as usize * GRID_COLUMNS + (column / CARD_STRIDE) as usize;
    let in_grid = ((column / CARD_STRIDE) as usize) < GRID_COLUMNS;
    (in_grid && index < cards).then_some(index)
}
