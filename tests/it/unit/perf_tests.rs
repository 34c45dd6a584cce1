//! Unit tests for perf module.

use zoomboard::perf::{ScopedTimer, measure_and_log};

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping should not warn.
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_and_log_returns_value() {
    let result = measure_and_log("sum", 1000.0, || (1..=10).sum::<i32>());
    assert_eq!(result, 55);
}
