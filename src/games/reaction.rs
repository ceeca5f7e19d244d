use crate::random::RandomSource;
use crate::timer::Timer;
use std::time::{Duration, Instant};

pub const TARGET_SCORE: u32 = 10;
pub const SPEEDUP_SCORE: u32 = 5;
pub const SLOW_TRAVEL: Duration = Duration::from_millis(1200);
pub const FAST_TRAVEL: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield
{
    pub width: u16,
    pub height: u16,
}

impl Playfield
{
    pub fn new(width: u16, height: u16) -> Self
    {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn clamp(self, cell: Cell) -> Cell
    {
        Cell {
            x: cell.x.min(self.width - 1),
            y: cell.y.min(self.height - 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell
{
    pub x: u16,
    pub y: u16,
}

#[derive(Clone, Copy, Debug)]
struct Travel
{
    from: Cell,
    to: Cell,
    started_at: Instant,
    duration: Duration,
}

/// Level 3: a target that keeps hopping around the playfield.
#[derive(Debug)]
pub struct ReactionGame
{
    playfield: Playfield,
    travel: Travel,
    arrival: Timer,
    score: u32,
    relocations: u32,
    completion_reported: bool,
    live: bool,
}

impl ReactionGame
{
    pub fn new(playfield: Playfield, rng: &mut impl RandomSource, now: Instant) -> Self
    {
        let start = Cell {
            x: playfield.width / 2,
            y: playfield.height / 2,
        };
        let mut game = Self {
            playfield,
            travel: Travel {
                from: start,
                to: start,
                started_at: now,
                duration: Duration::ZERO,
            },
            arrival: Timer::default(),
            score: 0,
            relocations: 0,
            completion_reported: false,
            live: true,
        };
        game.relocate(rng, now);
        game
    }

    pub fn travel_time(&self) -> Duration
    {
        if self.score >= SPEEDUP_SCORE {
            FAST_TRAVEL
        } else {
            SLOW_TRAVEL
        }
    }

    fn relocate(&mut self, rng: &mut impl RandomSource, now: Instant)
    {
        let to = Cell {
            x: rng.below(self.playfield.width as usize) as u16,
            y: rng.below(self.playfield.height as usize) as u16,
        };
        let duration = self.travel_time();
        self.travel = Travel {
            from: self.travel.to,
            to,
            started_at: now,
            duration,
        };
        self.arrival.arm(now, duration);
        self.relocations += 1;
    }

    /// Chains the next relocation as soon as the current one lands.
    pub fn tick(&mut self, now: Instant, rng: &mut impl RandomSource)
    {
        if self.live && self.arrival.fire(now) {
            self.relocate(rng, now);
        }
    }

    /// Counts a hit. Returns true exactly once, on the tap that reaches
    /// [`TARGET_SCORE`].
    pub fn tap(&mut self) -> bool
    {
        if !self.live {
            return false;
        }
        self.score += 1;
        if self.score >= TARGET_SCORE && !self.completion_reported {
            self.completion_reported = true;
            tracing::debug!(score = self.score, "reaction target score reached");
            return true;
        }
        false
    }

    pub fn resize(&mut self, playfield: Playfield)
    {
        self.playfield = playfield;
        self.travel.from = playfield.clamp(self.travel.from);
        self.travel.to = playfield.clamp(self.travel.to);
    }

    pub fn teardown(&mut self)
    {
        self.arrival.cancel();
        self.live = false;
    }

    /// Interpolated target position at `now`, in playfield cells.
    pub fn position(&self, now: Instant) -> (f32, f32)
    {
        let Travel {
            from,
            to,
            started_at,
            duration,
        } = self.travel;
        let progress = if duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started_at).as_secs_f32() / duration.as_secs_f32())
                .clamp(0.0, 1.0)
        };
        (
            lerp(from.x as f32, to.x as f32, progress),
            lerp(from.y as f32, to.y as f32, progress),
        )
    }

    /// Cell the target currently occupies.
    pub fn cell(&self, now: Instant) -> Cell
    {
        let (x, y) = self.position(now);
        self.playfield.clamp(Cell {
            x: x.round() as u16,
            y: y.round() as u16,
        })
    }

    pub fn destination(&self) -> Cell
    {
        self.travel.to
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    pub fn relocations(&self) -> u32
    {
        self.relocations
    }

    pub fn is_complete(&self) -> bool
    {
        self.completion_reported
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32
{
    a + (b - a) * t
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::random::ScriptedRandom;

    fn game(now: Instant) -> ReactionGame
    {
        ReactionGame::new(
            Playfield::new(40, 12),
            &mut ScriptedRandom::new(vec![5, 3, 30, 9]),
            now,
        )
    }

    #[test]
    fn tenth_tap_completes_once()
    {
        let mut game = game(Instant::now());
        for tap in 1..TARGET_SCORE {
            assert!(!game.tap(), "tap {tap} should not complete");
        }
        assert!(game.tap());
        assert!(!game.tap());
        assert_eq!(game.score(), TARGET_SCORE + 1);
    }

    #[test]
    fn travel_speeds_up_at_five()
    {
        let mut game = game(Instant::now());
        assert_eq!(game.travel_time(), SLOW_TRAVEL);
        for _ in 0..SPEEDUP_SCORE {
            game.tap();
        }
        assert_eq!(game.travel_time(), FAST_TRAVEL);
    }

    #[test]
    fn relocations_chain_on_arrival()
    {
        let now = Instant::now();
        let mut rng = ScriptedRandom::new(vec![30, 9, 1, 1]);
        let mut game = ReactionGame::new(Playfield::new(40, 12), &mut rng, now);
        assert_eq!(game.relocations(), 1);
        assert_eq!(game.destination(), Cell { x: 30, y: 9 });

        game.tick(now + Duration::from_millis(600), &mut rng);
        assert_eq!(game.relocations(), 1);
        let (x, _) = game.position(now + Duration::from_millis(600));
        assert!(x > 20.0 && x < 30.0);

        game.tick(now + SLOW_TRAVEL, &mut rng);
        assert_eq!(game.relocations(), 2);
        assert_eq!(game.destination(), Cell { x: 1, y: 1 });
        assert_eq!(game.cell(now + SLOW_TRAVEL), Cell { x: 30, y: 9 });
    }

    #[test]
    fn destinations_stay_inside_playfield()
    {
        let now = Instant::now();
        let mut rng = ScriptedRandom::new(vec![99, 77, 1000, 3]);
        let mut game = ReactionGame::new(Playfield::new(10, 5), &mut rng, now);
        for step in 1..20u32 {
            game.tick(now + SLOW_TRAVEL * step, &mut rng);
            let cell = game.destination();
            assert!(cell.x < 10 && cell.y < 5);
        }
    }

    #[test]
    fn teardown_stops_relocations_and_taps()
    {
        let now = Instant::now();
        let mut rng = ScriptedRandom::new(vec![1, 2]);
        let mut game = ReactionGame::new(Playfield::new(10, 5), &mut rng, now);
        game.teardown();
        game.tick(now + SLOW_TRAVEL * 4, &mut rng);
        assert_eq!(game.relocations(), 1);
        assert!(!game.tap());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn resize_clamps_the_current_path()
    {
        let now = Instant::now();
        let mut game = game(now);
        game.resize(Playfield::new(3, 2));
        let cell = game.cell(now + SLOW_TRAVEL);
        assert!(cell.x < 3 && cell.y < 2);
    }
}
