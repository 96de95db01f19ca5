//! Property-based tests for orchestration guarantees

#[allow(dead_code)]
#[path = "../integration/test_utils.rs"]
mod test_utils;

mod orchestration;
