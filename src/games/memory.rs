use crate::random::RandomSource;
use crate::timer::Timer;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

pub const PAIR_COUNT: usize = 10;
pub const HIDE_DELAY: Duration = Duration::from_millis(1000);
pub const SYMBOLS: [char; PAIR_COUNT] = ['@', '#', '$', '%', '&', '*', '+', '?', '=', '~'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPhase
{
    AwaitingFirstPick,
    AwaitingSecondPick(usize),
    Evaluating,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick
{
    Ignored,
    Revealed,
    Matched,
    Mismatched,
    /// Final pair matched; reported once per game.
    Completed,
}

#[derive(Debug)]
pub struct MemoryGame
{
    deck: Vec<char>,
    selected: Vec<usize>,
    matched: BTreeSet<usize>,
    phase: MemoryPhase,
    hide_timer: Timer,
    completion_reported: bool,
    live: bool,
}

impl MemoryGame
{
    pub fn new(rng: &mut impl RandomSource) -> Self
    {
        let mut deck: Vec<char> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        rng.shuffle(&mut deck);
        Self::with_deck(deck)
    }

    pub(crate) fn with_deck(deck: Vec<char>) -> Self
    {
        Self {
            deck,
            selected: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            phase: MemoryPhase::AwaitingFirstPick,
            hide_timer: Timer::default(),
            completion_reported: false,
            live: true,
        }
    }

    pub fn select(&mut self, index: usize, now: Instant) -> Pick
    {
        if !self.live
            || index >= self.deck.len()
            || self.selected.len() >= 2
            || self.selected.contains(&index)
            || self.matched.contains(&index)
        {
            return Pick::Ignored;
        }

        self.selected.push(index);
        if self.selected.len() == 1 {
            self.phase = MemoryPhase::AwaitingSecondPick(index);
            return Pick::Revealed;
        }

        self.phase = MemoryPhase::Evaluating;
        self.hide_timer.arm(now, HIDE_DELAY);
        let (first, second) = (self.selected[0], self.selected[1]);
        if self.deck[first] != self.deck[second] {
            return Pick::Mismatched;
        }

        self.matched.insert(first);
        self.matched.insert(second);
        tracing::debug!(first, second, symbol = %self.deck[first], "pair matched");
        if self.matched.len() == self.deck.len() {
            self.phase = MemoryPhase::Complete;
            if !self.completion_reported {
                self.completion_reported = true;
                return Pick::Completed;
            }
        }
        Pick::Matched
    }

    /// Closes the reveal window once the hide delay has elapsed.
    pub fn tick(&mut self, now: Instant)
    {
        if !self.live || !self.hide_timer.fire(now) {
            return;
        }
        self.selected.clear();
        if self.phase != MemoryPhase::Complete {
            self.phase = MemoryPhase::AwaitingFirstPick;
        }
    }

    pub fn teardown(&mut self)
    {
        self.hide_timer.cancel();
        self.live = false;
    }

    pub fn deck(&self) -> &[char]
    {
        &self.deck
    }

    pub fn selected(&self) -> &[usize]
    {
        &self.selected
    }

    pub fn matched(&self) -> &BTreeSet<usize>
    {
        &self.matched
    }

    pub fn phase(&self) -> MemoryPhase
    {
        self.phase
    }

    pub fn is_face_up(&self, index: usize) -> bool
    {
        self.selected.contains(&index) || self.matched.contains(&index)
    }

    pub fn is_complete(&self) -> bool
    {
        self.phase == MemoryPhase::Complete
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::random::ScriptedRandom;
    use std::collections::HashMap;

    fn small_game() -> MemoryGame
    {
        MemoryGame::with_deck(vec!['a', 'b', 'a', 'b'])
    }

    #[test]
    fn shuffled_deck_holds_each_symbol_twice()
    {
        for script in [vec![0], vec![3, 1, 4, 1, 5, 9, 2, 6], vec![19, 7, 11]] {
            let game = MemoryGame::new(&mut ScriptedRandom::new(script));
            let mut counts: HashMap<char, usize> = HashMap::new();
            for symbol in game.deck() {
                *counts.entry(*symbol).or_insert(0) += 1;
            }
            assert_eq!(game.deck().len(), PAIR_COUNT * 2);
            assert_eq!(counts.len(), PAIR_COUNT);
            assert!(counts.values().all(|count| *count == 2));
        }
    }

    #[test]
    fn third_pick_and_repeat_picks_are_ignored()
    {
        let now = Instant::now();
        let mut game = small_game();
        assert_eq!(game.select(0, now), Pick::Revealed);
        assert_eq!(game.phase(), MemoryPhase::AwaitingSecondPick(0));
        assert_eq!(game.select(0, now), Pick::Ignored);
        assert_eq!(game.select(1, now), Pick::Mismatched);
        assert_eq!(game.phase(), MemoryPhase::Evaluating);
        assert_eq!(game.select(2, now), Pick::Ignored);
        assert_eq!(game.selected().len(), 2);
        assert_eq!(game.select(9, now), Pick::Ignored);
    }

    #[test]
    fn mismatch_hides_after_delay()
    {
        let now = Instant::now();
        let mut game = small_game();
        game.select(0, now);
        game.select(1, now);
        game.tick(now + Duration::from_millis(999));
        assert_eq!(game.selected().len(), 2);
        game.tick(now + HIDE_DELAY);
        assert!(game.selected().is_empty());
        assert!(game.matched().is_empty());
        assert_eq!(game.phase(), MemoryPhase::AwaitingFirstPick);
    }

    #[test]
    fn matched_cards_stay_and_cannot_be_picked()
    {
        let now = Instant::now();
        let mut game = small_game();
        assert_eq!(game.select(0, now), Pick::Revealed);
        assert_eq!(game.select(2, now), Pick::Matched);
        game.tick(now + HIDE_DELAY);
        assert!(game.matched().contains(&0) && game.matched().contains(&2));
        assert_eq!(game.select(2, now + HIDE_DELAY), Pick::Ignored);
    }

    #[test]
    fn completion_is_reported_once()
    {
        let now = Instant::now();
        let mut game = small_game();
        game.select(0, now);
        game.select(2, now);
        game.tick(now + HIDE_DELAY);
        game.select(1, now + HIDE_DELAY);
        assert_eq!(game.select(3, now + HIDE_DELAY), Pick::Completed);
        assert!(game.is_complete());
        game.tick(now + HIDE_DELAY * 2);
        assert_eq!(game.phase(), MemoryPhase::Complete);
        for index in 0..4 {
            assert_eq!(game.select(index, now + HIDE_DELAY * 2), Pick::Ignored);
        }
    }

    #[test]
    fn teardown_suppresses_pending_hide()
    {
        let now = Instant::now();
        let mut game = small_game();
        game.select(0, now);
        game.select(1, now);
        game.teardown();
        game.tick(now + HIDE_DELAY * 3);
        assert_eq!(game.selected().len(), 2);
        assert_eq!(game.select(2, now), Pick::Ignored);
    }
}
