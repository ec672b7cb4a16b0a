//! Integration test suite.
//!
//! 1. Mapping resolution and quick-map commits against a file store
//! 2. Campaign/ads provisioning and lead construction

pub mod helpers;
pub mod lead_flow_tests;
pub mod quick_map_tests;
