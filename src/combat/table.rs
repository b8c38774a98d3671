//! Combat results table (CRT)
//!
//! One column per odds ratio, one row per modified die roll. Rolls below
//! the first row use the first row; rolls above the last row use the last.
//! The classic table ships built in and can be replaced from TOML.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::combat::odds::Odds;
use crate::core::config::ConfigError;

/// Largest `Dn` a table cell may hold
pub const MAX_DISABLED_TURNS: u32 = 99;

/// What a single attack does to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DamageResult {
    Miss,
    /// Target is disabled for this many additional turns
    Disabled(u32),
    Eliminated,
}

impl DamageResult {
    pub fn turns_disabled(&self) -> u32 {
        match self {
            DamageResult::Disabled(turns) => *turns,
            DamageResult::Miss | DamageResult::Eliminated => 0,
        }
    }
}

impl fmt::Display for DamageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageResult::Miss => write!(f, "-"),
            DamageResult::Disabled(turns) => write!(f, "D{}", turns),
            DamageResult::Eliminated => write!(f, "E"),
        }
    }
}

impl FromStr for DamageResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "" => Ok(DamageResult::Miss),
            "E" | "e" => Ok(DamageResult::Eliminated),
            other => other
                .strip_prefix(['D', 'd'])
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .map(DamageResult::Disabled)
                .ok_or_else(|| format!("unknown table entry '{}'", other)),
        }
    }
}

impl TryFrom<String> for DamageResult {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DamageResult> for String {
    fn from(result: DamageResult) -> Self {
        result.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsColumn {
    pub odds: Odds,
    /// Results for rolls `min_roll, min_roll + 1, ...`
    pub results: Vec<DamageResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResultsTable {
    /// Modified roll of the first row
    pub min_roll: i32,
    #[serde(rename = "column")]
    pub columns: Vec<OddsColumn>,
}

impl Default for CombatResultsTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl CombatResultsTable {
    /// Gun combat table for 1:4 through 4:1, rolls "0 or less" through "7+"
    pub fn classic() -> Self {
        use crate::combat::table::DamageResult::{Disabled as D, Eliminated as E, Miss as M};

        let column = |attack, defense, results: [DamageResult; 8]| OddsColumn {
            odds: Odds::new(attack, defense),
            results: results.to_vec(),
        };

        Self {
            min_roll: 0,
            columns: vec![
                //                0     1     2     3     4     5     6     7+
                column(1, 4, [M, M, M, M, M, M, D(1), D(2)]),
                column(1, 2, [M, M, M, M, M, D(1), D(2), D(3)]),
                column(1, 1, [M, M, M, M, D(1), D(2), D(3), D(4)]),
                column(2, 1, [M, M, M, D(1), D(2), D(3), D(4), D(5)]),
                column(3, 1, [M, M, D(1), D(2), D(3), D(4), D(5), E]),
                column(4, 1, [M, D(1), D(2), D(3), D(4), D(5), E, E]),
            ],
        }
    }

    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let table: CombatResultsTable =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse_toml(&content)
    }

    /// Columns must be non-empty, strictly increasing in odds and equal length
    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = self
            .columns
            .first()
            .ok_or_else(|| ConfigError::Invalid("combat table has no columns".into()))?;

        let rows = first.results.len();
        if rows == 0 {
            return Err(ConfigError::Invalid("combat table has no rows".into()));
        }

        for pair in self.columns.windows(2) {
            if pair[0].odds.compare(&pair[1].odds) != Ordering::Less {
                return Err(ConfigError::Invalid(format!(
                    "combat table columns out of order: {} then {}",
                    pair[0].odds, pair[1].odds
                )));
            }
        }

        if let Some((column, turns)) = self.columns.iter().find_map(|c| {
            c.results
                .iter()
                .map(DamageResult::turns_disabled)
                .find(|n| *n > MAX_DISABLED_TURNS)
                .map(|n| (c.odds, n))
        }) {
            return Err(ConfigError::Invalid(format!(
                "column {} disables for {} turns, at most {} allowed",
                column, turns, MAX_DISABLED_TURNS
            )));
        }

        if let Some(bad) = self.columns.iter().find(|c| c.results.len() != rows) {
            return Err(ConfigError::Invalid(format!(
                "column {} has {} rows, expected {}",
                bad.odds,
                bad.results.len(),
                rows
            )));
        }

        Ok(())
    }

    pub fn max_roll(&self) -> i32 {
        let rows = self.columns.first().map_or(1, |c| c.results.len()) as i32;
        self.min_roll + rows - 1
    }

    /// Strongest column whose odds do not exceed `odds`
    pub fn column_for(&self, odds: Odds) -> Option<&OddsColumn> {
        self.columns
            .iter()
            .rev()
            .find(|c| c.odds.compare(&odds) != Ordering::Greater)
    }

    /// Look up the result for declared odds and a modified roll
    ///
    /// Odds weaker than every column always miss.
    pub fn lookup(&self, odds: Odds, modified_roll: i32) -> DamageResult {
        let Some(column) = self.column_for(odds) else {
            return DamageResult::Miss;
        };
        let row = (modified_roll.clamp(self.min_roll, self.max_roll()) - self.min_roll) as usize;
        column.results.get(row).copied().unwrap_or(DamageResult::Miss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_table_is_valid() {
        let table = CombatResultsTable::classic();
        assert!(table.validate().is_ok());
        assert_eq!(table.max_roll(), 7);
    }

    #[test]
    fn test_lookup_even_odds() {
        let table = CombatResultsTable::classic();
        assert_eq!(table.lookup(Odds::EVEN, 3), DamageResult::Miss);
        assert_eq!(table.lookup(Odds::EVEN, 4), DamageResult::Disabled(1));
        assert_eq!(table.lookup(Odds::EVEN, 6), DamageResult::Disabled(3));
    }

    #[test]
    fn test_rolls_clamp_to_table() {
        let table = CombatResultsTable::classic();
        assert_eq!(table.lookup(Odds::new(4, 1), -5), DamageResult::Miss);
        assert_eq!(table.lookup(Odds::new(4, 1), 12), DamageResult::Eliminated);
    }

    #[test]
    fn test_odds_between_columns_round_down() {
        let table = CombatResultsTable::classic();
        // 5:2 sits between 2:1 and 3:1 and uses 2:1
        assert_eq!(table.column_for(Odds::new(5, 2)).unwrap().odds, Odds::new(2, 1));
        // Anything past 4:1 uses 4:1
        assert_eq!(table.column_for(Odds::new(9, 1)).unwrap().odds, Odds::new(4, 1));
    }

    #[test]
    fn test_odds_below_table_miss() {
        let table = CombatResultsTable::classic();
        assert!(table.column_for(Odds::new(1, 6)).is_none());
        assert_eq!(table.lookup(Odds::new(1, 6), 7), DamageResult::Miss);
        assert_eq!(table.lookup(Odds::new(0, 1), 7), DamageResult::Miss);
    }

    #[test]
    fn test_results_improve_with_odds() {
        let table = CombatResultsTable::classic();
        for roll in 0..=7 {
            let mut previous = 0;
            for column in &table.columns {
                let score = match column.results[roll as usize] {
                    DamageResult::Miss => 0,
                    DamageResult::Disabled(n) => n,
                    DamageResult::Eliminated => 100,
                };
                assert!(score >= previous, "roll {} column {}", roll, column.odds);
                previous = score;
            }
        }
    }

    #[test]
    fn test_oversized_disable_rejected() {
        let toml = r#"
            min_roll = 0

            [[column]]
            odds = "1:1"
            results = ["-", "D4294967295"]
        "#;
        assert!(matches!(
            CombatResultsTable::parse_toml(toml),
            Err(ConfigError::Invalid(msg)) if msg.contains("4294967295")
        ));

        let mut table = CombatResultsTable::classic();
        table.columns[0].results[7] = DamageResult::Disabled(MAX_DISABLED_TURNS);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_table() {
        let toml = r#"
            min_roll = 1

            [[column]]
            odds = "1:1"
            results = ["-", "-", "D1", "D2", "D3", "E"]

            [[column]]
            odds = "2:1"
            results = ["-", "D1", "D2", "D3", "E", "E"]
        "#;
        let table = CombatResultsTable::parse_toml(toml).unwrap();
        assert_eq!(table.min_roll, 1);
        assert_eq!(table.lookup(Odds::EVEN, 3), DamageResult::Disabled(1));
        assert_eq!(table.lookup(Odds::new(2, 1), 6), DamageResult::Eliminated);
    }

    #[test]
    fn test_parse_rejects_ragged_columns() {
        let toml = r#"
            min_roll = 1
            [[column]]
            odds = "1:1"
            results = ["-", "D1"]
            [[column]]
            odds = "2:1"
            results = ["-"]
        "#;
        assert!(matches!(
            CombatResultsTable::parse_toml(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_entry() {
        let toml = r#"
            min_roll = 1
            [[column]]
            odds = "1:1"
            results = ["-", "X3"]
        "#;
        assert!(matches!(
            CombatResultsTable::parse_toml(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_damage_result_round_trip_strings() {
        assert_eq!("D3".parse::<DamageResult>(), Ok(DamageResult::Disabled(3)));
        assert_eq!(DamageResult::Eliminated.to_string(), "E");
        assert!("D0".parse::<DamageResult>().is_err());
    }
}
