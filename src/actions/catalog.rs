//! Action catalog - display names, classification, and search
//!
//! The engine consumes the catalog through the [`ActionCatalog`] trait so the
//! comparator and recorder can be tested against a small fixed table.
//! [`ActionTable`] is the concrete implementation, loaded from a JSON action
//! table extracted from the game's data files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::types::{ActionType, CATCH_ALL_ID, Job};

/// Display name for the catch-all wildcard slot
pub const CATCH_ALL_NAME: &str = "Catch-All Action";

/// Fallback display name for ids the catalog no longer knows
pub const OLD_ACTION_NAME: &str = "Old Action";

/// Name lookup, fuzzy equality, and classification queries the engine needs
/// from the game's static action data.
///
/// Every method is total: unknown ids resolve to sentinel answers, never
/// errors.
pub trait ActionCatalog {
    /// Display name for a concrete action id. Id 0 is the catch-all slot;
    /// unknown ids fall back to [`OLD_ACTION_NAME`].
    fn action_name(&self, id: u32) -> String;

    /// Fuzzy name equality: does the actual action's display name contain
    /// `expected` (case-insensitive)? Tolerates action-tier upgrades that
    /// rename but conceptually replace an action.
    fn names_match(&self, expected: &str, actual: u32) -> bool {
        self.action_name(actual)
            .to_lowercase()
            .contains(&expected.to_lowercase())
    }

    /// GCD/oGCD classification for an action id
    fn action_type(&self, id: u32) -> ActionType;

    /// Whether the id is a real, currently obtainable player action in the
    /// GCD/weaponskill/oGCD categories (PvP actions excluded)
    fn is_valid_action(&self, id: u32) -> bool;
}

/// One row of the action table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInfo {
    pub id: u32,
    pub name: String,
    /// Action category column (2 = spell, 3 = weaponskill, 4 = ability)
    pub category: u32,
    /// Level the owning class learns the action at (0 = unobtainable)
    #[serde(default)]
    pub class_job_level: u8,
    #[serde(default)]
    pub is_pvp: bool,
    /// Space-separated job abbreviations the action belongs to
    /// (empty = unobtainable)
    #[serde(default)]
    pub jobs: String,
}

impl ActionInfo {
    /// Whether this row is a usable PvE player action
    pub fn is_pve_action(&self) -> bool {
        matches!(self.category, 2..=4)
            && !self.is_pvp
            && self.class_job_level > 0
            && !self.jobs.is_empty()
    }

    /// Whether the action is usable by `job`
    pub fn usable_by(&self, job: Job) -> bool {
        job == Job::ANY || self.jobs.contains(job.abbrev())
    }
}

/// Concrete catalog backed by an in-memory table of PvE actions
pub struct ActionTable {
    actions: Vec<ActionInfo>,
    by_id: HashMap<u32, usize>,
}

impl ActionTable {
    /// Build a table from raw rows, keeping only usable PvE actions
    pub fn from_entries(entries: Vec<ActionInfo>) -> Self {
        let actions: Vec<ActionInfo> =
            entries.into_iter().filter(ActionInfo::is_pve_action).collect();
        let by_id = actions.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        Self { actions, by_id }
    }

    /// Load the action table from a JSON file, or return an empty table if
    /// the file is missing or malformed
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Could not read action table {}: {}", path.display(), e);
                return Self::from_entries(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<ActionInfo>>(&content) {
            Ok(entries) => {
                let table = Self::from_entries(entries);
                info!(
                    "Loaded {} PvE actions from {}",
                    table.actions.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                warn!("Failed to parse action table {}: {}", path.display(), e);
                Self::from_entries(Vec::new())
            }
        }
    }

    /// Look up a row by id
    pub fn get(&self, id: u32) -> Option<&ActionInfo> {
        self.by_id.get(&id).map(|&i| &self.actions[i])
    }

    /// Number of usable actions in the table
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Search actions by name substring, job, and action type, sorted by id.
    /// Used by the opener editor's palette.
    pub fn search(&self, name: &str, job: Job, action_type: ActionType) -> Vec<i32> {
        let needle = name.to_lowercase();
        let mut ids: Vec<i32> = self
            .actions
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    && action_type.accepts(ActionType::from_category(a.category))
                    && a.usable_by(job)
            })
            .map(|a| a.id as i32)
            .collect();
        ids.sort_unstable();
        ids
    }

}

impl ActionCatalog for ActionTable {
    fn action_name(&self, id: u32) -> String {
        if id as i32 == CATCH_ALL_ID {
            return CATCH_ALL_NAME.to_string();
        }
        self.get(id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| OLD_ACTION_NAME.to_string())
    }

    fn action_type(&self, id: u32) -> ActionType {
        self.get(id)
            .map(|a| ActionType::from_category(a.category))
            .unwrap_or_default()
    }

    fn is_valid_action(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, category: u32, jobs: &str) -> ActionInfo {
        ActionInfo {
            id,
            name: name.to_string(),
            category,
            class_job_level: 1,
            is_pvp: false,
            jobs: jobs.to_string(),
        }
    }

    fn sample_table() -> ActionTable {
        ActionTable::from_entries(vec![
            entry(1, "Spinning Edge", 3, "NIN"),
            entry(2, "Gust Slash", 3, "NIN"),
            entry(3, "Aeolian Edge", 3, "NIN"),
            entry(10, "Mug", 4, "NIN"),
            entry(11, "Dokumori", 4, "NIN"),
            entry(99, "Hide", 4, "NIN"),
            entry(141, "Fire", 2, "BLM"),
            entry(152, "Fire IV", 2, "BLM"),
        ])
    }

    #[test]
    fn test_pve_filtering() {
        let mut pvp = entry(500, "Seiton Tenchu", 3, "NIN");
        pvp.is_pvp = true;
        let mut old = entry(501, "Kiss of the Wasp", 3, "NIN");
        old.class_job_level = 0;
        let table = ActionTable::from_entries(vec![entry(1, "Spinning Edge", 3, "NIN"), pvp, old]);

        assert!(table.is_valid_action(1));
        assert!(!table.is_valid_action(500));
        assert!(!table.is_valid_action(501));
    }

    #[test]
    fn test_name_fallbacks() {
        let table = sample_table();
        assert_eq!(table.action_name(1), "Spinning Edge");
        assert_eq!(table.action_name(0), CATCH_ALL_NAME);
        assert_eq!(table.action_name(4242), OLD_ACTION_NAME);
    }

    #[test]
    fn test_names_match_is_substring_containment() {
        let table = sample_table();
        // Tier upgrade: "Fire" is contained in "Fire IV"
        assert!(table.names_match("Fire", 152));
        assert!(table.names_match("fire iv", 152));
        assert!(!table.names_match("Blizzard", 152));
    }

    #[test]
    fn test_classification() {
        let table = sample_table();
        assert_eq!(table.action_type(1), ActionType::Gcd);
        assert_eq!(table.action_type(10), ActionType::Ogcd);
        assert_eq!(table.action_type(4242), ActionType::Any);
    }

    #[test]
    fn test_search_filters_and_sorts() {
        let table = sample_table();
        assert_eq!(table.search("edge", Job::NIN, ActionType::Any), vec![1, 3]);
        assert_eq!(table.search("fire", Job::NIN, ActionType::Any), Vec::<i32>::new());
        assert_eq!(table.search("", Job::NIN, ActionType::Ogcd), vec![10, 11, 99]);
        assert_eq!(table.search("fire", Job::ANY, ActionType::Gcd), vec![141, 152]);
    }
}
