//! Custom Test Assertions
//!
//! Assertion helpers for store state and client errors that give more
//! meaningful failure messages than bare `assert!`.

use std::fmt::Debug;

use claims_store::{ClaimsState, ClientError};

/// Asserts that no tracked operation is in flight
pub fn assert_at_rest(state: &ClaimsState) {
    assert!(
        !state.loading,
        "Expected store at rest, but loading is still set: {:?}",
        state
    );
}

/// Asserts that a store call failed with exactly `expected` as its message
///
/// # Panics
///
/// Panics if the result is `Ok` or carries a different message
pub fn assert_client_error<T: Debug>(result: &Result<T, ClientError>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error '{}', got Ok({:?})", expected, value),
        Err(error) => assert_eq!(
            error.to_string(),
            expected,
            "Unexpected error message for {:?}",
            error.operation()
        ),
    }
}
