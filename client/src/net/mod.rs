//! Networking modules for the REST API and the PDF engine bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` implements the `workflow` API traits over `gloo-net`; `pdf` wraps
//! PDF.js behind the `workflow` renderer seam.

pub mod http;
pub mod pdf;
