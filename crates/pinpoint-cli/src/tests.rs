//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use crate::commands;

// ========== Calculate Command Tests ==========

#[test]
fn test_cmd_calculate_worked_example() {
    let result = commands::cmd_calculate("$15,000", "p8", 1, false, 0, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_calculate_json_output() {
    let result = commands::cmd_calculate("15000", "p8", 1, false, 0, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_calculate_garbage_volume_is_fine() {
    // Fail-soft input policy: unparsable volume computes as zero
    let result = commands::cmd_calculate("lots of money", "none", 1, false, 0, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_calculate_rejects_unknown_terminal() {
    let result = commands::cmd_calculate("15000", "p99", 1, false, 0, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_calculate_with_extras() {
    let result = commands::cmd_calculate("$25,000", "p8", 3, true, 2, false);
    assert!(result.is_ok());
}

// ========== Propose Command Tests ==========

#[tokio::test]
async fn test_cmd_propose_manual_only() {
    // No image: composes from overrides and defaults, no AI backend needed
    let result =
        commands::cmd_propose(None, Some("30,000"), Some(110.0), Some(0.029), Some(2), false)
            .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_propose_all_defaults() {
    let result = commands::cmd_propose(None, None, None, None, None, true).await;
    assert!(result.is_ok());
}
