//! Common test utilities for nzbget-unzip binary tests


pub use fixtures::*;
