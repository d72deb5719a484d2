//! Integration tests for the logging system
//!
//! These tests verify the global logger plumbing used by the grid.
//! They swap the process-wide logger, so they run serialized.
//!
//! Run with: cargo test --test logging_integration_tests

use splat_grid::splatgrid::log::{Log, Logger, LogEntry, LogSeverity};
use splat_grid::splatgrid::SpatialGrid;
use splat_grid::glam::{Vec3, Mat3};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    // Create test logger
    let (test_logger, entries) = TestLogger::new();

    // Set custom logger
    Log::set_logger(test_logger);

    // Log some messages
    Log::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Log::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Log::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    // Verify logs were captured
    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 3);

    // Verify first log (Info)
    assert_eq!(captured_entries[0].severity, LogSeverity::Info);
    assert_eq!(captured_entries[0].source, "test::module");
    assert_eq!(captured_entries[0].message, "Test info message");

    // Verify second log (Warn)
    assert_eq!(captured_entries[1].severity, LogSeverity::Warn);
    assert_eq!(captured_entries[1].message, "Test warning message");

    // Verify third log (Error)
    assert_eq!(captured_entries[2].severity, LogSeverity::Error);
    assert_eq!(captured_entries[2].message, "Test error message");

    drop(captured_entries);

    // Reset to default logger
    Log::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Log::set_logger(test_logger);

    Log::log_detailed(
        LogSeverity::Error,
        "test::module",
        "Detailed error".to_string(),
        file!(),
        line!(),
    );

    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 1);
    assert_eq!(captured_entries[0].severity, LogSeverity::Error);
    assert!(captured_entries[0].file.is_some());
    assert!(captured_entries[0].line.is_some());

    drop(captured_entries);
    Log::reset_logger();
}

#[test]
#[serial]
fn test_integration_grid_logs_construction_and_errors() {
    let (test_logger, entries) = TestLogger::new();
    Log::set_logger(test_logger);

    // A successful construction emits an INFO log
    let positions = vec![Vec3::ZERO, Vec3::ONE];
    let scales = vec![Vec3::ONE; 2];
    let rotations = vec![Mat3::IDENTITY; 2];
    let grid = SpatialGrid::new(&positions, &scales, &rotations, 0.6).unwrap();
    drop(grid);

    // A failed construction emits an ERROR log with file:line
    let result = SpatialGrid::new(&[], &[], &[], 0.6);
    assert!(result.is_err());

    let captured_entries = entries.lock().unwrap();
    assert!(captured_entries.iter().any(|e| {
        e.severity == LogSeverity::Info && e.message.contains("Grid constructed")
    }));
    assert!(captured_entries.iter().any(|e| {
        e.severity == LogSeverity::Error
            && e.message.contains("Construction failed")
            && e.file.is_some()
    }));

    drop(captured_entries);
    Log::reset_logger();
}
