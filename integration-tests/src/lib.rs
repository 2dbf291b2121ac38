//! End-to-end scenario tests for the Blendfit workspace live in
//! `tests/`. This crate intentionally exports nothing.
