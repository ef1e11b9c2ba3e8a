//! App-wide busy indicator.
//!
//! DESIGN
//! ======
//! A counter rather than a flag so overlapping requests keep the indicator up
//! until the last one settles.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pending: u32,
}

impl UiState {
    pub fn begin(&mut self) {
        self.pending += 1;
    }

    /// Always called when a request settles, success or not.
    pub fn end(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}
