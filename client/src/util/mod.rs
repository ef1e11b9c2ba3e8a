//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the pages read as plain signal wiring.

pub mod dom;
pub mod storage;
