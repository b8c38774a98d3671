//! Combat odds: attack strength against defense strength, e.g. "2:1"

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Odds {
    pub attack: u32,
    pub defense: u32,
}

impl Odds {
    pub const EVEN: Odds = Odds {
        attack: 1,
        defense: 1,
    };

    pub fn new(attack: u32, defense: u32) -> Self {
        Self {
            attack,
            defense: defense.max(1),
        }
    }

    /// Standard odds for the given strengths, rounded in the defender's favour
    ///
    /// 7 vs 3 is 2:1, 3 vs 7 is 1:3. Zero attack strength yields 0:1, which
    /// no table column accepts.
    pub fn from_strengths(attack: u32, defense: u32) -> Self {
        let defense = defense.max(1);
        if attack >= defense {
            Self::new(attack / defense, 1)
        } else if attack == 0 {
            Self::new(0, 1)
        } else {
            Self::new(1, defense.div_ceil(attack))
        }
    }

    pub fn ratio(&self) -> f64 {
        self.attack as f64 / self.defense as f64
    }

    /// Exact ratio comparison (cross-multiplied, no floats)
    pub fn compare(&self, other: &Odds) -> Ordering {
        (self.attack as u64 * other.defense as u64).cmp(&(other.attack as u64 * self.defense as u64))
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.attack, self.defense)
    }
}

impl FromStr for Odds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attack, defense) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("odds '{}' must look like 2:1", s))?;
        let attack: u32 = attack
            .trim()
            .parse()
            .map_err(|e| format!("bad attack value in '{}': {}", s, e))?;
        let defense: u32 = defense
            .trim()
            .parse()
            .map_err(|e| format!("bad defense value in '{}': {}", s, e))?;
        if defense == 0 {
            return Err(format!("odds '{}' have zero defense", s));
        }
        Ok(Self { attack, defense })
    }
}

impl TryFrom<String> for Odds {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Odds> for String {
    fn from(odds: Odds) -> Self {
        odds.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let odds: Odds = "3:1".parse().unwrap();
        assert_eq!(odds, Odds::new(3, 1));
        assert_eq!(odds.to_string(), "3:1");
        assert!("3-1".parse::<Odds>().is_err());
        assert!("1:0".parse::<Odds>().is_err());
    }

    #[test]
    fn test_from_strengths_rounds_for_defender() {
        assert_eq!(Odds::from_strengths(7, 3), Odds::new(2, 1));
        assert_eq!(Odds::from_strengths(3, 7), Odds::new(1, 3));
        assert_eq!(Odds::from_strengths(4, 4), Odds::EVEN);
        assert_eq!(Odds::from_strengths(0, 4), Odds::new(0, 1));
        assert_eq!(Odds::from_strengths(5, 0), Odds::new(5, 1));
    }

    #[test]
    fn test_compare_is_exact() {
        assert_eq!(Odds::new(2, 4).compare(&Odds::new(1, 2)), Ordering::Equal);
        assert_eq!(Odds::new(3, 1).compare(&Odds::new(2, 1)), Ordering::Greater);
        assert_eq!(Odds::new(1, 4).compare(&Odds::new(1, 2)), Ordering::Less);
    }

    #[test]
    fn test_serde_as_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            odds: Odds,
        }
        let w: Wrapper = toml::from_str("odds = \"1:2\"").unwrap();
        assert_eq!(w.odds, Odds::new(1, 2));
    }
}
