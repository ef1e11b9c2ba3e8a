//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod assign;
pub(crate) mod list_binding;
pub mod submissions;
pub mod submit;
