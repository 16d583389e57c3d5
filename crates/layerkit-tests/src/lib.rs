//! Integration tests for layerkit crates.
//!
//! End-to-end checks of behavior that spans more than one crate: LUT files
//! found through resource discovery and applied by the color tools, geometry
//! helpers feeding the mask tools, and the fixed properties every release
//! must keep.
