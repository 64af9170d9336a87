//! Shared helpers for integration tests.
//!
//! Suites that need embedded PostgreSQL skip where the cluster cannot be
//! installed or started. Set `REQUIRE_TEST_CLUSTER` in CI to turn a setup
//! failure into a test failure instead.

/// Returns true when `REQUIRE_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handle an embedded cluster setup failure.
///
/// Prints a skip marker and returns `None`, unless `REQUIRE_TEST_CLUSTER`
/// is truthy, in which case it panics.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
