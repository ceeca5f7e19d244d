//! Level progression.
//!
//! [`Levels`] owns the active mini-game and decides when the player may move
//! on. Each level's game is built fresh on entry and torn down on exit, so no
//! timer from an earlier level can touch the current one.

use crate::games::choice::{Choice, ChoiceGame, Round};
use crate::games::memory::{MemoryGame, Pick};
use crate::games::reaction::{Playfield, ReactionGame};
use crate::random::RandomSource;
use std::time::Instant;
use thiserror::Error;

pub const LEVEL_COUNT: u32 = 3;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError
{
    #[error("level {level} is locked, finish it first")]
    Locked { level: u32 },
    #[error("all levels are already complete")]
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event
{
    SelectChoice(Choice),
    TapCard(usize),
    TapTarget,
    Advance,
    Restart,
    RequestExit,
    ConfirmExit,
    CancelExit,
    Tick,
    Resize(Playfield),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal
{
    LevelCompleted { level: u32 },
    LevelLocked { level: u32 },
    GameCompleted,
    ExitConfirmed,
}

#[derive(Debug)]
pub enum Stage
{
    Choice(ChoiceGame),
    Memory(MemoryGame),
    Reaction(ReactionGame),
    Completed,
}

impl Stage
{
    fn teardown(&mut self)
    {
        match self {
            Stage::Memory(game) => game.teardown(),
            Stage::Reaction(game) => game.teardown(),
            Stage::Choice(_) | Stage::Completed => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot
{
    pub level: u32,
    pub passed: bool,
    pub completed: bool,
    pub exit_pending: bool,
}

pub struct Levels<R>
{
    rng: R,
    level: u32,
    passed: bool,
    exit_pending: bool,
    stage: Stage,
    playfield: Playfield,
}

impl<R: RandomSource> Levels<R>
{
    pub fn new(rng: R, playfield: Playfield) -> Self
    {
        Self {
            rng,
            level: 1,
            passed: false,
            exit_pending: false,
            stage: Stage::Choice(ChoiceGame::new()),
            playfield,
        }
    }

    pub fn snapshot(&self) -> Snapshot
    {
        Snapshot {
            level: self.level,
            passed: self.passed,
            completed: self.is_completed(),
            exit_pending: self.exit_pending,
        }
    }

    pub fn stage(&self) -> &Stage
    {
        &self.stage
    }

    pub fn level(&self) -> u32
    {
        self.level
    }

    pub fn is_passed(&self) -> bool
    {
        self.passed
    }

    pub fn is_completed(&self) -> bool
    {
        matches!(self.stage, Stage::Completed)
    }

    pub fn is_exit_pending(&self) -> bool
    {
        self.exit_pending
    }

    /// Single transition function over inbound events.
    pub fn handle(&mut self, event: Event, now: Instant) -> Vec<Signal>
    {
        let mut signals = Vec::new();
        match event {
            Event::SelectChoice(choice) => {
                if self.select_choice(choice).is_some_and(|(_, done)| done) {
                    signals.push(Signal::LevelCompleted { level: self.level });
                }
            }
            Event::TapCard(index) => {
                if self.tap_card(index, now) == Pick::Completed {
                    signals.push(Signal::LevelCompleted { level: self.level });
                }
            }
            Event::TapTarget => {
                if self.tap_target() {
                    signals.push(Signal::LevelCompleted { level: self.level });
                }
            }
            Event::Advance => match self.advance(now) {
                Ok(()) if self.is_completed() => signals.push(Signal::GameCompleted),
                Ok(()) => {}
                Err(AdvanceError::Locked { level }) => signals.push(Signal::LevelLocked { level }),
                Err(AdvanceError::Finished) => {}
            },
            Event::Restart => self.restart(now),
            Event::RequestExit => self.request_exit(),
            Event::ConfirmExit => {
                if self.confirm_exit() {
                    signals.push(Signal::ExitConfirmed);
                }
            }
            Event::CancelExit => self.cancel_exit(),
            Event::Tick => self.tick(now),
            Event::Resize(playfield) => self.resize(playfield),
        }
        signals
    }

    /// Plays a rock-paper-scissors round on level 1. Returns the round and
    /// whether it passed the level.
    pub fn select_choice(&mut self, choice: Choice) -> Option<(Round, bool)>
    {
        if self.exit_pending {
            return None;
        }
        let Stage::Choice(game) = &mut self.stage else {
            return None;
        };
        let (round, first_win) = game.play(choice, &mut self.rng);
        tracing::debug!(user = %round.user, computer = %round.computer, outcome = ?round.outcome, "round played");
        if first_win {
            self.mark_passed();
        }
        Some((round, first_win))
    }

    pub fn tap_card(&mut self, index: usize, now: Instant) -> Pick
    {
        if self.exit_pending {
            return Pick::Ignored;
        }
        let Stage::Memory(game) = &mut self.stage else {
            return Pick::Ignored;
        };
        let pick = game.select(index, now);
        if pick == Pick::Completed {
            self.mark_passed();
        }
        pick
    }

    /// Returns true when this tap passes level 3.
    pub fn tap_target(&mut self) -> bool
    {
        if self.exit_pending {
            return false;
        }
        let Stage::Reaction(game) = &mut self.stage else {
            return false;
        };
        let done = game.tap();
        if done {
            self.mark_passed();
        }
        done
    }

    fn mark_passed(&mut self)
    {
        self.passed = true;
        tracing::info!(level = self.level, "level passed");
    }

    pub fn advance(&mut self, now: Instant) -> Result<(), AdvanceError>
    {
        if self.is_completed() {
            return Err(AdvanceError::Finished);
        }
        if !self.passed {
            tracing::info!(level = self.level, "advance rejected, level locked");
            return Err(AdvanceError::Locked { level: self.level });
        }

        self.stage.teardown();
        self.level += 1;
        self.passed = false;
        self.stage = self.stage_for(self.level, now);
        if self.is_completed() {
            tracing::info!("all levels complete");
        } else {
            tracing::info!(level = self.level, "advanced");
        }
        Ok(())
    }

    pub fn restart(&mut self, now: Instant)
    {
        self.stage.teardown();
        self.level = 1;
        self.passed = false;
        self.exit_pending = false;
        self.stage = self.stage_for(1, now);
        tracing::info!("restarted");
    }

    pub fn request_exit(&mut self)
    {
        self.exit_pending = true;
    }

    /// Returns true when an exit prompt was open and is now confirmed.
    pub fn confirm_exit(&mut self) -> bool
    {
        if !self.exit_pending {
            return false;
        }
        tracing::info!(level = self.level, "exit confirmed");
        true
    }

    pub fn cancel_exit(&mut self)
    {
        self.exit_pending = false;
    }

    pub fn tick(&mut self, now: Instant)
    {
        match &mut self.stage {
            Stage::Memory(game) => game.tick(now),
            Stage::Reaction(game) => game.tick(now, &mut self.rng),
            Stage::Choice(_) | Stage::Completed => {}
        }
    }

    pub fn resize(&mut self, playfield: Playfield)
    {
        self.playfield = playfield;
        if let Stage::Reaction(game) = &mut self.stage {
            game.resize(playfield);
        }
    }

    fn stage_for(&mut self, level: u32, now: Instant) -> Stage
    {
        match level {
            1 => Stage::Choice(ChoiceGame::new()),
            2 => Stage::Memory(MemoryGame::new(&mut self.rng)),
            3 => Stage::Reaction(ReactionGame::new(self.playfield, &mut self.rng, now)),
            _ => {
                debug_assert!(level > LEVEL_COUNT);
                Stage::Completed
            }
        }
    }
}
