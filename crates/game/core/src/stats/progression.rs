//! Per-class, per-level stat table.

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{CharacterClass, Stat};

/// One stat column: values indexed by level (1-based).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionStat {
    pub stat: Stat,
    pub levels: Vec<f32>,
}

/// All stat columns for one character class.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionClass {
    pub class: CharacterClass,
    pub stats: Vec<ProgressionStat>,
}

type Lookup = HashMap<CharacterClass, HashMap<Stat, Vec<f32>>>;

/// Immutable progression configuration with a lazily built lookup table.
///
/// The flat class list is what content files deserialize into; the nested
/// map is built on first query and cached for the object's lifetime, since
/// the configuration never changes after load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Progression {
    classes: Vec<ProgressionClass>,
    #[serde(skip)]
    lookup: OnceCell<Lookup>,
}

impl Progression {
    pub fn new(classes: Vec<ProgressionClass>) -> Self {
        Self {
            classes,
            lookup: OnceCell::new(),
        }
    }

    fn lookup(&self) -> &Lookup {
        self.lookup.get_or_init(|| {
            let mut table: Lookup = HashMap::new();
            for class in &self.classes {
                let columns = table.entry(class.class).or_default();
                for column in &class.stats {
                    columns.insert(column.stat, column.levels.clone());
                }
            }
            table
        })
    }

    /// Base value of `stat` for `class` at `level`.
    ///
    /// Returns 0.0 when the class or stat has no column, or when `level`
    /// runs past the end of the column (no extrapolation).
    pub fn stat(&self, stat: Stat, class: CharacterClass, level: u32) -> f32 {
        let Some(levels) = self.lookup().get(&class).and_then(|c| c.get(&stat)) else {
            return 0.0;
        };
        if level == 0 || levels.len() < level as usize {
            return 0.0;
        }
        levels[level as usize - 1]
    }

    /// Number of levels in the column for `stat`, 0 when absent.
    pub fn levels(&self, stat: Stat, class: CharacterClass) -> usize {
        self.lookup()
            .get(&class)
            .and_then(|c| c.get(&stat))
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Progression {
        Progression::new(vec![ProgressionClass {
            class: CharacterClass::Grunt,
            stats: vec![ProgressionStat {
                stat: Stat::Health,
                levels: vec![50.0, 80.0, 120.0],
            }],
        }])
    }

    #[test]
    fn lookup_is_one_based() {
        let table = table();
        assert_eq!(table.stat(Stat::Health, CharacterClass::Grunt, 1), 50.0);
        assert_eq!(table.stat(Stat::Health, CharacterClass::Grunt, 3), 120.0);
    }

    #[test]
    fn beyond_table_end_is_zero() {
        let table = table();
        assert_eq!(table.stat(Stat::Health, CharacterClass::Grunt, 4), 0.0);
        assert_eq!(table.stat(Stat::Health, CharacterClass::Grunt, 0), 0.0);
    }

    #[test]
    fn missing_class_or_stat_is_zero() {
        let table = table();
        assert_eq!(table.stat(Stat::Damage, CharacterClass::Grunt, 1), 0.0);
        assert_eq!(table.stat(Stat::Health, CharacterClass::Mage, 1), 0.0);
        assert_eq!(table.levels(Stat::Health, CharacterClass::Mage), 0);
    }
}
