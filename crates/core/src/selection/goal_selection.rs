use std::collections::BTreeMap;
use std::sync::Arc;

use crate::goals::{GoalLike, SubGoal};

/// Immutable view of the selection at one point in time.
pub type SelectionSnapshot<G> = Arc<BTreeMap<String, G>>;

/// Multi-select state for batch operations over goals.
///
/// Every change builds a fresh map and swaps it in; snapshots handed out
/// earlier keep their contents.
#[derive(Debug, Clone)]
pub struct GoalSelection<G = SubGoal> {
    selected: SelectionSnapshot<G>,
}

impl<G> Default for GoalSelection<G> {
    fn default() -> Self {
        Self {
            selected: Arc::new(BTreeMap::new()),
        }
    }
}

impl<G: GoalLike + Clone> GoalSelection<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `goal`. Goals without an id (unsaved drafts) are
    /// ignored.
    pub fn toggle_selection(&mut self, goal: &G) {
        let Some(id) = goal.id() else {
            return;
        };
        let mut next = (*self.selected).clone();
        if next.remove(id).is_none() {
            next.insert(id.to_string(), goal.clone());
        }
        self.selected = Arc::new(next);
    }

    pub fn clear_selection(&mut self) {
        self.selected = Arc::new(BTreeMap::new());
    }

    pub fn is_selected(&self, goal_id: &str) -> bool {
        self.selected.contains_key(goal_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in key order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.keys().cloned().collect()
    }

    pub fn snapshot(&self) -> SelectionSnapshot<G> {
        Arc::clone(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::ParentGoal;

    fn goal(id: Option<&str>) -> SubGoal {
        SubGoal {
            id: id.map(str::to_string),
            title: "Write".to_string(),
            description: String::new(),
            progress: 0.0,
            parent_goal_id: None,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = GoalSelection::new();
        let g = goal(Some("a"));

        selection.toggle_selection(&g);
        assert!(selection.is_selected("a"));
        assert_eq!(selection.selected_count(), 1);

        selection.toggle_selection(&g);
        assert!(!selection.is_selected("a"));
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn drafts_are_ignored() {
        let mut selection = GoalSelection::new();
        selection.toggle_selection(&goal(None));
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn old_snapshots_are_never_mutated() {
        let mut selection = GoalSelection::new();
        selection.toggle_selection(&goal(Some("a")));
        let before = selection.snapshot();

        selection.toggle_selection(&goal(Some("b")));
        selection.toggle_selection(&goal(Some("a")));

        assert_eq!(before.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(selection.selected_ids(), vec!["b".to_string()]);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut selection = GoalSelection::new();
        selection.toggle_selection(&goal(Some("a")));
        selection.toggle_selection(&goal(Some("b")));
        selection.clear_selection();
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn works_for_parent_goals() {
        let mut selection: GoalSelection<ParentGoal> = GoalSelection::new();
        selection.toggle_selection(&ParentGoal {
            id: Some("p1".to_string()),
            title: "Parent".to_string(),
            description: String::new(),
            position: None,
            goals: vec![],
        });
        assert!(selection.is_selected("p1"));
    }
}
