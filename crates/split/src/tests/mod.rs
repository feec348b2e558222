//! Crate-level tests: the reference scenarios and whole-pipeline properties.

mod scenarios;
