//! Slot identity and action classification types
//!
//! An opener slot is stored and persisted as a signed integer: positive ids
//! are concrete catalog actions, zero is the catch-all wildcard, and negative
//! ids reference a named group of interchangeable actions. `Slot::decode` is
//! the only place that inspects the sign.

use serde::{Deserialize, Serialize};

/// Persisted slot value for the catch-all wildcard
pub const CATCH_ALL_ID: i32 = 0;

/// Action id of True North, the directional-correction ability a recording
/// can be configured to ignore
pub const TRUE_NORTH_ID: u32 = 7546;

/// Decoded form of a slot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A concrete catalog action id
    Concrete(u32),
    /// Wildcard, satisfied by any captured action
    CatchAll,
    /// Reference into the group registry (negative raw id)
    Group(i32),
}

impl Slot {
    /// Decode a raw signed slot identifier into its tagged form
    pub fn decode(raw: i32) -> Self {
        if raw > 0 {
            Slot::Concrete(raw as u32)
        } else if raw == CATCH_ALL_ID {
            Slot::CatchAll
        } else {
            Slot::Group(raw)
        }
    }

    /// Re-encode into the compact storage form
    pub fn encode(self) -> i32 {
        match self {
            Slot::Concrete(id) => id as i32,
            Slot::CatchAll => CATCH_ALL_ID,
            Slot::Group(raw) => raw,
        }
    }
}

/// GCD/oGCD classification of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionType {
    #[default]
    Any,
    Gcd,
    Ogcd,
}

impl ActionType {
    /// Classify from the catalog's action-category column
    /// (2 = spell, 3 = weaponskill, 4 = ability)
    pub fn from_category(category: u32) -> Self {
        match category {
            2 | 3 => ActionType::Gcd,
            4 => ActionType::Ogcd,
            _ => ActionType::Any,
        }
    }

    /// Get the display name
    pub fn pretty_print(&self) -> &'static str {
        match self {
            ActionType::Gcd => "GCD",
            ActionType::Ogcd => "oGCD",
            ActionType::Any => "Any",
        }
    }

    /// Whether an action of type `other` passes this filter
    pub fn accepts(&self, other: ActionType) -> bool {
        *self == ActionType::Any || *self == other
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty_print())
    }
}

/// Combat job tag an opener belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum Job {
    #[default]
    ANY,
    PLD,
    WAR,
    DRK,
    GNB,
    WHM,
    SCH,
    AST,
    SGE,
    MNK,
    DRG,
    NIN,
    SAM,
    RPR,
    VPR,
    BRD,
    MCH,
    DNC,
    BLM,
    SMN,
    RDM,
    PCT,
    BLU,
}

impl Job {
    /// All jobs including the Any filter, in display order
    pub const ALL: [Job; 23] = [
        Job::ANY,
        Job::PLD,
        Job::WAR,
        Job::DRK,
        Job::GNB,
        Job::WHM,
        Job::SCH,
        Job::AST,
        Job::SGE,
        Job::MNK,
        Job::DRG,
        Job::NIN,
        Job::SAM,
        Job::RPR,
        Job::VPR,
        Job::BRD,
        Job::MCH,
        Job::DNC,
        Job::BLM,
        Job::SMN,
        Job::RDM,
        Job::PCT,
        Job::BLU,
    ];

    /// Parse a job tag from its three-letter abbreviation (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Job::ALL.iter().copied().find(|j| j.abbrev() == upper)
    }

    /// Three-letter abbreviation, or "ANY"
    pub fn abbrev(&self) -> &'static str {
        match self {
            Job::ANY => "ANY",
            Job::PLD => "PLD",
            Job::WAR => "WAR",
            Job::DRK => "DRK",
            Job::GNB => "GNB",
            Job::WHM => "WHM",
            Job::SCH => "SCH",
            Job::AST => "AST",
            Job::SGE => "SGE",
            Job::MNK => "MNK",
            Job::DRG => "DRG",
            Job::NIN => "NIN",
            Job::SAM => "SAM",
            Job::RPR => "RPR",
            Job::VPR => "VPR",
            Job::BRD => "BRD",
            Job::MCH => "MCH",
            Job::DNC => "DNC",
            Job::BLM => "BLM",
            Job::SMN => "SMN",
            Job::RDM => "RDM",
            Job::PCT => "PCT",
            Job::BLU => "BLU",
        }
    }

    /// Get the display name
    pub fn pretty_print(&self) -> &'static str {
        match self {
            Job::ANY => "Any",
            Job::PLD => "Paladin",
            Job::WAR => "Warrior",
            Job::DRK => "Dark Knight",
            Job::GNB => "Gunbreaker",
            Job::WHM => "White Mage",
            Job::SCH => "Scholar",
            Job::AST => "Astrologian",
            Job::SGE => "Sage",
            Job::MNK => "Monk",
            Job::DRG => "Dragoon",
            Job::NIN => "Ninja",
            Job::SAM => "Samurai",
            Job::RPR => "Reaper",
            Job::VPR => "Viper",
            Job::BRD => "Bard",
            Job::MCH => "Machinist",
            Job::DNC => "Dancer",
            Job::BLM => "Black Mage",
            Job::SMN => "Summoner",
            Job::RDM => "Red Mage",
            Job::PCT => "Pictomancer",
            Job::BLU => "Blue Mage",
        }
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_decode() {
        assert_eq!(Slot::decode(25), Slot::Concrete(25));
        assert_eq!(Slot::decode(0), Slot::CatchAll);
        assert_eq!(Slot::decode(-3), Slot::Group(-3));
    }

    #[test]
    fn test_slot_roundtrip() {
        for raw in [-7, -1, 0, 1, 7546] {
            assert_eq!(Slot::decode(raw).encode(), raw);
        }
    }

    #[test]
    fn test_action_type_from_category() {
        assert_eq!(ActionType::from_category(2), ActionType::Gcd);
        assert_eq!(ActionType::from_category(3), ActionType::Gcd);
        assert_eq!(ActionType::from_category(4), ActionType::Ogcd);
        assert_eq!(ActionType::from_category(1), ActionType::Any);
        assert_eq!(ActionType::from_category(99), ActionType::Any);
    }

    #[test]
    fn test_action_type_filter() {
        assert!(ActionType::Any.accepts(ActionType::Gcd));
        assert!(ActionType::Gcd.accepts(ActionType::Gcd));
        assert!(!ActionType::Gcd.accepts(ActionType::Ogcd));
    }

    #[test]
    fn test_job_parsing() {
        assert_eq!(Job::from_str("nin"), Some(Job::NIN));
        assert_eq!(Job::from_str("NIN"), Some(Job::NIN));
        assert_eq!(Job::from_str("any"), Some(Job::ANY));
        assert_eq!(Job::from_str("nope"), None);
    }
}
