//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Page-scoped list, wizard and grading state live in `workflow` types held
//! by the pages themselves. Only app-wide chrome (toasts, busy indicator) is
//! provided through context from here.

pub mod toast;
pub mod ui;
