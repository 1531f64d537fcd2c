//! Opener type - a prescribed action sequence for one job

use serde::{Deserialize, Serialize};

use crate::actions::{Job, Slot};

/// An ordered sequence of slot identifiers a player intends to execute at an
/// encounter's start. Created and edited by the UI, read-only for the engine
/// during a recording session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opener {
    pub name: String,
    pub job: Job,
    pub slots: Vec<i32>,
}

impl Opener {
    pub fn new(name: &str, job: Job, slots: Vec<i32>) -> Self {
        Self {
            name: name.to_string(),
            job,
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Decoded slots, for display code that needs the tagged form
    pub fn decoded(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().map(|&raw| Slot::decode(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_slots() {
        let opener = Opener::new("test", Job::NIN, vec![2259, 0, -1]);
        let slots: Vec<Slot> = opener.decoded().collect();
        assert_eq!(
            slots,
            vec![Slot::Concrete(2259), Slot::CatchAll, Slot::Group(-1)]
        );
    }
}
