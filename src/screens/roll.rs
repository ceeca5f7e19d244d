use crate::config::PlayConfig;
use crate::error::AppError;
use crate::games::roll::RandomNumber;
use crate::terminal::{self, GOLD, TICK, TerminalGuard, foreground};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

enum RollAction
{
    Generate,
    Quit,
}

pub fn run(config: &PlayConfig) -> Result<(), AppError>
{
    let mut term = TerminalGuard::enter(false)?;
    let mut rng = config.rng();
    let mut roll = RandomNumber::default();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            match action_for(&event::read()?) {
                Some(RollAction::Generate) => {
                    let value = roll.generate(&mut rng);
                    tracing::debug!(value, "number generated");
                    dirty = true;
                }
                Some(RollAction::Quit) => quit = true,
                None => {}
            }
        }
        if quit {
            break;
        }

        if dirty && last_tick.elapsed() >= TICK {
            term.present(&render(&roll))?;
            last_tick = Instant::now();
            dirty = false;
        }

        std::thread::sleep(Duration::from_millis(5));
    }

    terminal::drain_events()?;
    Ok(())
}

fn action_for(input: &Event) -> Option<RollAction>
{
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = input
    else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }
    match code {
        KeyCode::Esc => Some(RollAction::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(RollAction::Quit),
        KeyCode::Char(' ') | KeyCode::Char('g') | KeyCode::Enter => Some(RollAction::Generate),
        _ => None,
    }
}

fn render(roll: &RandomNumber) -> Vec<String>
{
    vec![
        "Random Number".to_string(),
        String::new(),
        foreground(&format!("{:>4}", roll.value()), GOLD),
        String::new(),
        format!("Numbers drawn: {}", roll.draws()),
        String::new(),
        "Space or g to generate. Esc quits.".to_string(),
    ]
}
