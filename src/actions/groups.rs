//! Group registry - named sets of interchangeable actions
//!
//! A group slot (negative id) is satisfied by any of the group's member
//! actions, so an opener can prescribe "any mudra" or "any tincture" without
//! pinning a specific id.

use std::collections::HashMap;
use std::collections::HashSet;

use super::types::{ActionType, Job};

/// A named set of interchangeable concrete action ids, reachable from an
/// opener slot by a synthetic negative id. Immutable after registration.
#[derive(Debug, Clone)]
pub struct ActionGroup {
    id: i32,
    name: String,
    is_gcd: bool,
    job: Job,
    members: HashSet<u32>,
}

impl ActionGroup {
    pub fn new(
        id: i32,
        name: &str,
        is_gcd: bool,
        job: Job,
        members: impl IntoIterator<Item = u32>,
    ) -> Self {
        debug_assert!(id < 0, "group ids are negative slot ids");
        Self {
            id,
            name: name.to_string(),
            is_gcd,
            job,
            members: members.into_iter().collect(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_gcd(&self) -> bool {
        self.is_gcd
    }

    pub fn job(&self) -> Job {
        self.job
    }

    pub fn members(&self) -> impl Iterator<Item = u32> + '_ {
        self.members.iter().copied()
    }

    /// Whether `action_id` satisfies this group's slot
    pub fn is_member(&self, action_id: u32) -> bool {
        self.members.contains(&action_id)
    }

    pub fn action_type(&self) -> ActionType {
        if self.is_gcd { ActionType::Gcd } else { ActionType::Ogcd }
    }
}

/// Registry of action groups, resolvable by negative slot id.
/// Iteration order is stable registration order (for display lists).
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<ActionGroup>,
    by_id: HashMap<i32, usize>,
}

impl GroupRegistry {
    /// Empty registry (tests build their own groups)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the stock groups
    pub fn defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ActionGroup::new(
            -1,
            "Tinctures",
            false,
            Job::ANY,
            [19114, 19115, 19116, 19117],
        ));
        registry.register(ActionGroup::new(
            -2,
            "Mudras",
            true,
            Job::NIN,
            [2259, 2261, 2263],
        ));
        registry
    }

    /// Register a group, replacing any previous group with the same id
    pub fn register(&mut self, group: ActionGroup) {
        if let Some(&i) = self.by_id.get(&group.id) {
            self.groups[i] = group;
        } else {
            self.by_id.insert(group.id, self.groups.len());
            self.groups.push(group);
        }
    }

    /// Resolve a negative slot id to its group, if one is registered
    pub fn resolve(&self, slot_id: i32) -> Option<&ActionGroup> {
        self.by_id.get(&slot_id).map(|&i| &self.groups[i])
    }

    /// All groups in registration order
    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    /// Group names in registration order (for the info panel)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Slot ids of groups matching a name substring, job, and action type.
    /// Complements the catalog search for the editor's palette.
    pub fn filtered(&self, query: &str, job: Job, action_type: ActionType) -> Vec<i32> {
        let needle = query.to_lowercase();
        self.groups
            .iter()
            .filter(|g| {
                g.name.to_lowercase().contains(&needle)
                    && action_type.accepts(g.action_type())
                    && (job == Job::ANY || g.job == Job::ANY || g.job == job)
            })
            .map(|g| g.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> GroupRegistry {
        let mut r = GroupRegistry::new();
        r.register(ActionGroup::new(-5, "Mudras", true, Job::NIN, [10, 11]));
        r.register(ActionGroup::new(-6, "Tinctures", false, Job::ANY, [20]));
        r
    }

    #[test]
    fn test_resolve() {
        let r = registry();
        assert_eq!(r.resolve(-5).map(ActionGroup::name), Some("Mudras"));
        assert!(r.resolve(-99).is_none());
    }

    #[test]
    fn test_membership() {
        let r = registry();
        let mudras = r.resolve(-5).unwrap();
        assert!(mudras.is_member(10));
        assert!(mudras.is_member(11));
        // Ids outside the set fail, including members of another group
        assert!(!mudras.is_member(12));
        assert!(!mudras.is_member(20));
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut r = registry();
        r.register(ActionGroup::new(-5, "Mudras", true, Job::NIN, [10, 11, 12]));
        assert_eq!(r.groups().len(), 2);
        assert!(r.resolve(-5).unwrap().is_member(12));
    }

    #[test]
    fn test_filtered() {
        let r = registry();
        assert_eq!(r.filtered("mud", Job::NIN, ActionType::Any), vec![-5]);
        assert_eq!(r.filtered("", Job::ANY, ActionType::Any), vec![-5, -6]);
        assert_eq!(r.filtered("", Job::ANY, ActionType::Ogcd), vec![-6]);
        // Job-locked group filtered out for other jobs
        assert_eq!(r.filtered("mud", Job::BLM, ActionType::Any), Vec::<i32>::new());
    }

    #[test]
    fn test_stable_display_order() {
        let r = registry();
        let names: Vec<&str> = r.names().collect();
        assert_eq!(names, vec!["Mudras", "Tinctures"]);
    }
}
