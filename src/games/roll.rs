use crate::random::RandomSource;

pub const ROLL_RANGE: usize = 100;

/// The single-number screen: each generate draws from `0..100`.
#[derive(Debug, Default)]
pub struct RandomNumber
{
    value: u32,
    draws: u32,
}

impl RandomNumber
{
    pub fn generate(&mut self, rng: &mut impl RandomSource) -> u32
    {
        self.value = rng.below(ROLL_RANGE) as u32;
        self.draws += 1;
        self.value
    }

    pub fn value(&self) -> u32
    {
        self.value
    }

    pub fn draws(&self) -> u32
    {
        self.draws
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::random::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starts_at_zero()
    {
        let roll = RandomNumber::default();
        assert_eq!(roll.value(), 0);
        assert_eq!(roll.draws(), 0);
    }

    #[test]
    fn generate_uses_the_draw()
    {
        let mut roll = RandomNumber::default();
        assert_eq!(roll.generate(&mut ScriptedRandom::new(vec![142])), 42);
        assert_eq!(roll.value(), 42);
    }

    #[test]
    fn values_stay_below_one_hundred()
    {
        let mut rng = StdRng::seed_from_u64(11);
        let mut roll = RandomNumber::default();
        for _ in 0..500 {
            assert!(roll.generate(&mut rng) < 100);
        }
        assert_eq!(roll.draws(), 500);
    }
}
