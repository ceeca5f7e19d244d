use crate::error::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Options shared by the interactive screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayConfig
{
    pub seed: Option<u64>,
    pub mouse: bool,
}

impl PlayConfig
{
    pub fn new() -> Self
    {
        Self {
            seed: None,
            mouse: true,
        }
    }

    pub fn from_args(args: &[String]) -> Result<Self, AppError>
    {
        let mut config = Self::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--seed" {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::usage("Expected value after --seed"))?;
                config.seed = Some(parse_seed(value)?);
            } else if let Some(rest) = arg.strip_prefix("--seed=") {
                config.seed = Some(parse_seed(rest)?);
            } else if arg == "--no-mouse" {
                config.mouse = false;
            } else {
                return Err(AppError::usage(format!("Unknown option '{arg}'")));
            }
        }
        Ok(config)
    }

    /// Session RNG: reproducible when a seed is given.
    pub fn rng(&self) -> StdRng
    {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_seed(value: &str) -> Result<u64, AppError>
{
    value
        .parse::<u64>()
        .map_err(|_| AppError::usage("Seed must be a non-negative integer"))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::Rng;

    fn args(values: &[&str]) -> Vec<String>
    {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_enable_mouse_without_seed()
    {
        assert_eq!(
            PlayConfig::from_args(&[]).unwrap(),
            PlayConfig {
                seed: None,
                mouse: true,
            }
        );
    }

    #[test]
    fn parses_both_seed_forms()
    {
        assert_eq!(PlayConfig::from_args(&args(&["--seed", "9"])).unwrap().seed, Some(9));
        let config = PlayConfig::from_args(&args(&["--seed=12", "--no-mouse"])).unwrap();
        assert_eq!(config.seed, Some(12));
        assert!(!config.mouse);
    }

    #[test]
    fn rejects_bad_input()
    {
        assert!(PlayConfig::from_args(&args(&["--seed"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--seed=-1"])).is_err());
        assert!(PlayConfig::from_args(&args(&["--wpm=20"])).is_err());
    }

    #[test]
    fn same_seed_same_session()
    {
        let config = PlayConfig::from_args(&args(&["--seed=5"])).unwrap();
        let mut first = config.rng();
        let mut second = config.rng();
        let b: Vec<u32> = (0..8).map(|_| first.gen_range(0..100)).collect();
        let c: Vec<u32> = (0..8).map(|_| second.gen_range(0..100)).collect();
        assert_eq!(b, c);
    }
}
