//! Integration tests for CLI argument handling and exit codes
//!
//! The binary is pointed at a temporary cache directory and at a base URL
//! nothing listens on, so the tests never reach the real price service.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Local, Timelike};
use tempfile::TempDir;
use tpir::data::Price;

/// Base URL that refuses connections
const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Helper to run the CLI with given args and capture output
fn run_cli(cache_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tpir"))
        .env_remove("RUST_LOG")
        .env_remove("TPIR_BASE_URL")
        .env_remove("TPIR_TIMEOUT_SECS")
        .env("TPIR_CACHE_DIR", cache_dir)
        .arg("--base-url")
        .arg(UNREACHABLE)
        .args(args)
        .output()
        .expect("Failed to execute tpir")
}

/// Writes a complete price list for today, every hour priced `sek`
fn write_todays_cache(cache_dir: &Path, area: &str, sek: f64) {
    let now = Local::now().fixed_offset();
    let midnight = now
        .with_hour(0)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap();
    let prices: Vec<Price> = (0..24)
        .map(|hour| Price {
            sek_per_kwh: sek,
            eur_per_kwh: sek / 11.0,
            exchange_rate: 11.0,
            start: midnight + Duration::hours(hour),
            end: midnight + Duration::hours(hour + 1),
        })
        .collect();
    std::fs::write(
        cache_dir.join(format!("{area}_cache.json")),
        serde_json::to_vec(&prices).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_help_flag_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tpir"), "Help should mention tpir");
    assert!(stdout.contains("--debug"), "Help should mention --debug flag");
}

#[test]
fn test_missing_arguments_exit_2() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["SE3"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_area_code_prints_error_and_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["SE7", "1.0"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("area code has invalid value SE7"),
        "Should print error message about invalid area code: {}",
        stderr
    );
}

#[test]
fn test_invalid_price_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["SE3", "cheap"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cheap is not a valid price"), "{}", stderr);
}

#[test]
fn test_price_below_maximum_exits_0() {
    let temp_dir = TempDir::new().unwrap();
    write_todays_cache(temp_dir.path(), "SE3", 1.5);

    let output = run_cli(temp_dir.path(), &["SE3", "2.0"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_price_equal_to_maximum_exits_0() {
    let temp_dir = TempDir::new().unwrap();
    write_todays_cache(temp_dir.path(), "SE1", 1.5);

    let output = run_cli(temp_dir.path(), &["SE1", "1.5"]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_price_above_maximum_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    write_todays_cache(temp_dir.path(), "SE4", 1.5);

    let output = run_cli(temp_dir.path(), &["SE4", "0.5"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_fetch_failure_without_cache_exits_3() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(temp_dir.path(), &["SE2", "1.0"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not fetch daily prices"), "{}", stderr);
}

#[test]
fn test_corrupt_cache_exits_3() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("SE3_cache.json"), b"{broken").unwrap();

    let output = run_cli(temp_dir.path(), &["SE3", "1.0"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("corrupt"), "{}", stderr);
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    write_todays_cache(temp_dir.path(), "SE3", 1.5);

    let output = run_cli(temp_dir.path(), &["--debug", "SE3", "2.0"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("The Price Is Right!"), "{}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use tpir::cli::{parse_area_code_arg, Cli, CliError};
    use tpir::config::Config;
    use tpir::data::AreaCode;

    #[test]
    fn test_cli_debug_defaults_off() {
        let cli = Cli::parse_from(["tpir", "SE3", "1"]);
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_area_code_arg_all_valid() {
        for (arg, code) in [
            ("SE1", AreaCode::Se1),
            ("SE2", AreaCode::Se2),
            ("SE3", AreaCode::Se3),
            ("SE4", AreaCode::Se4),
        ] {
            assert_eq!(parse_area_code_arg(arg).unwrap(), code);
        }
    }

    #[test]
    fn test_config_from_cli_invalid_area() {
        let cli = Cli::parse_from(["tpir", "--cache-dir", "/tmp", "se3", "1"]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CliError::InvalidAreaCode(_))
        ));
    }
}
