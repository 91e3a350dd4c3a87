//! Integration tests for lumswitch crates.
//!
//! End-to-end checks across table files, configuration, encoding and
//! image I/O.
