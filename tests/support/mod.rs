//! Shared test support utilities.

// Each integration test crate compiles its own copy; not every crate uses
// every helper.
#![allow(dead_code)]

pub mod recording;
