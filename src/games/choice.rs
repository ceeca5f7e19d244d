use crate::random::RandomSource;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice
{
    Rock,
    Paper,
    Scissors,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome
{
    Tie,
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round
{
    pub user: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
}

impl Choice
{
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The choice this one defeats.
    pub fn beats(self) -> Choice
    {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    pub fn random(rng: &mut impl RandomSource) -> Choice
    {
        Self::ALL[rng.below(Self::ALL.len())]
    }

    pub fn label(self) -> &'static str
    {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Choice
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.label())
    }
}

pub fn resolve(user: Choice, computer: Choice) -> Outcome
{
    if user == computer {
        Outcome::Tie
    } else if user.beats() == computer {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Level 1: rounds against a random computer until the first win.
#[derive(Debug, Default)]
pub struct ChoiceGame
{
    last_round: Option<Round>,
    rounds_played: u32,
    won: bool,
}

impl ChoiceGame
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Plays one round. Returns the round and whether this round is the
    /// first win.
    pub fn play(&mut self, user: Choice, rng: &mut impl RandomSource) -> (Round, bool)
    {
        let computer = Choice::random(rng);
        let round = Round {
            user,
            computer,
            outcome: resolve(user, computer),
        };
        self.last_round = Some(round);
        self.rounds_played += 1;

        let first_win = round.outcome == Outcome::Win && !self.won;
        if first_win {
            self.won = true;
        }
        (round, first_win)
    }

    pub fn last_round(&self) -> Option<Round>
    {
        self.last_round
    }

    pub fn rounds_played(&self) -> u32
    {
        self.rounds_played
    }

    pub fn won(&self) -> bool
    {
        self.won
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn dominance_is_cyclic()
    {
        assert_eq!(resolve(Choice::Rock, Choice::Scissors), Outcome::Win);
        assert_eq!(resolve(Choice::Scissors, Choice::Paper), Outcome::Win);
        assert_eq!(resolve(Choice::Paper, Choice::Rock), Outcome::Win);
        assert_eq!(resolve(Choice::Scissors, Choice::Rock), Outcome::Lose);
    }

    #[test]
    fn swapping_players_flips_the_outcome()
    {
        for user in Choice::ALL {
            for computer in Choice::ALL {
                let forward = resolve(user, computer);
                let backward = resolve(computer, user);
                match forward {
                    Outcome::Tie => {
                        assert_eq!(user, computer);
                        assert_eq!(backward, Outcome::Tie);
                    }
                    Outcome::Win => assert_eq!(backward, Outcome::Lose),
                    Outcome::Lose => assert_eq!(backward, Outcome::Win),
                }
            }
        }
    }

    #[test]
    fn only_first_win_is_reported()
    {
        // Draw 2 is scissors every round.
        let mut rng = ScriptedRandom::new(vec![2]);
        let mut game = ChoiceGame::new();

        let (round, first) = game.play(Choice::Paper, &mut rng);
        assert_eq!(round.outcome, Outcome::Lose);
        assert!(!first);

        let (round, first) = game.play(Choice::Rock, &mut rng);
        assert_eq!(round.computer, Choice::Scissors);
        assert_eq!(round.outcome, Outcome::Win);
        assert!(first);

        let (_, again) = game.play(Choice::Rock, &mut rng);
        assert!(!again);
        assert!(game.won());
        assert_eq!(game.rounds_played(), 3);
    }
}
