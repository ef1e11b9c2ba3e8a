//! Page-scoped multi-selection for bulk actions, plus the single/dual detail selection.
//!
//! INVARIANTS
//! ==========
//! - Every selected id is one of the ids rendered on the current page.
//! - `sync_visible` runs after each refresh and drops ids that left the page.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

/// Tri-state of the "select all" master checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Ids checked on the currently rendered page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    visible: Vec<String>,
    selected: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendered ids and drop selections no longer on the page.
    pub fn sync_visible<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.visible = ids.into_iter().collect();
        let visible: HashSet<&str> = self.visible.iter().map(String::as_str).collect();
        self.selected.retain(|id| visible.contains(id.as_str()));
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Checkbox change. Ids that are not rendered are ignored; returns whether it applied.
    pub fn toggle(&mut self, id: &str, checked: bool) -> bool {
        if !self.visible.iter().any(|v| v == id) {
            return false;
        }
        if checked {
            self.selected.insert(id.to_owned());
        } else {
            self.selected.remove(id);
        }
        true
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn select_all_visible(&mut self) {
        self.selected.extend(self.visible.iter().cloned());
    }

    pub fn clear_visible(&mut self) {
        self.selected.clear();
    }

    pub fn invert_visible(&mut self) {
        let inverted: HashSet<String> =
            self.visible.iter().filter(|id| !self.selected.contains(*id)).cloned().collect();
        self.selected = inverted;
    }

    /// Remove ids, e.g. the ones a bulk operation finished successfully.
    pub fn remove_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for id in ids {
            self.selected.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in rendered order.
    pub fn ids(&self) -> Vec<String> {
        self.visible.iter().filter(|id| self.selected.contains(*id)).cloned().collect()
    }

    pub fn master_state(&self) -> MasterState {
        let selected = self.visible.iter().filter(|id| self.selected.contains(*id)).count();
        if selected == 0 {
            MasterState::Unchecked
        } else if selected == self.visible.len() {
            MasterState::Checked
        } else {
            MasterState::Indeterminate
        }
    }

    /// "N of M selected" counter text.
    pub fn counter_text(&self) -> String {
        format!("{} of {} selected", self.len(), self.visible.len())
    }
}

/// Detail-panel subjects on dual-pane screens: at most one submission and one verifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DualSelection<P, S> {
    primary: Option<P>,
    secondary: Option<S>,
}

impl<P, S> Default for DualSelection<P, S> {
    fn default() -> Self {
        Self { primary: None, secondary: None }
    }
}

impl<P, S> DualSelection<P, S> {
    pub fn primary(&self) -> Option<&P> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&S> {
        self.secondary.as_ref()
    }

    /// Replace the primary subject wholesale.
    pub fn select_primary(&mut self, item: P) {
        self.primary = Some(item);
    }

    pub fn select_secondary(&mut self, item: S) {
        self.secondary = Some(item);
    }

    pub fn clear_primary(&mut self) {
        self.primary = None;
    }

    pub fn clear_secondary(&mut self) {
        self.secondary = None;
    }
}
