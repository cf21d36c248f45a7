//! Assignment-matrix reconciliation planning.

use super::types::AssignmentSelection;

/// Type IDs to deactivate and activate for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    /// Types with `selected = false`, in first-seen order.
    pub to_remove: Vec<i32>,
    /// Types with `selected = true`, in first-seen order.
    pub to_add: Vec<i32>,
}

impl SelectionPlan {
    /// Returns true if the plan changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Splits selections into the bulk delete and the per-type inserts.
///
/// A type listed both ways ends up in both lists. Deletes run before
/// inserts, so such a type ends up active.
#[must_use]
pub fn partition_selections(selections: &[AssignmentSelection]) -> SelectionPlan {
    let mut plan = SelectionPlan::default();
    for selection in selections {
        let target = if selection.selected {
            &mut plan.to_add
        } else {
            &mut plan.to_remove
        };
        if !target.contains(&selection.assignment_type_id) {
            target.push(selection.assignment_type_id);
        }
    }
    plan
}
