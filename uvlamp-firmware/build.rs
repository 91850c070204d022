//! Build script for uvlamp-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates lamp.toml at compile time
//! - Generates the lamp_config.rs constants from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated lamp.toml values
struct LampConfig {
    debounce_ms: u32,
    long_press_ms: u32,
    arc_refresh_ms: u32,
    frame_rate_hz: u32,
    pwm_frequency_hz: u32,
}

/// Validate lamp.toml configuration at compile time
fn validate_config() -> LampConfig {
    println!("cargo:rerun-if-changed=lamp.toml");

    let config_path = Path::new("lamp.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lamp.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a lamp.toml configuration file.           ║\n\
            ║  Please create one in the uvlamp-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lamp.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in lamp.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let debounce_ms = read_field(&config, "timing", "debounce_ms", 0..=100, &mut errors);
    let long_press_ms = read_field(&config, "timing", "long_press_ms", 100..=5000, &mut errors);
    let arc_refresh_ms = read_field(&config, "timing", "arc_refresh_ms", 10..=1000, &mut errors);
    let frame_rate_hz = read_field(&config, "timing", "frame_rate_hz", 1..=200, &mut errors);
    let pwm_frequency_hz = read_field(&config, "pwm", "frequency_hz", 100..=100_000, &mut errors);

    if let (Some(debounce), Some(long_press)) = (debounce_ms, long_press_ms) {
        if debounce >= long_press {
            errors.push("[timing] debounce_ms must be below long_press_ms".to_string());
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in lamp.toml                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=lamp.toml validated successfully");

    // All fields are present once no errors were collected
    LampConfig {
        debounce_ms: debounce_ms.unwrap(),
        long_press_ms: long_press_ms.unwrap(),
        arc_refresh_ms: arc_refresh_ms.unwrap(),
        frame_rate_hz: frame_rate_hz.unwrap(),
        pwm_frequency_hz: pwm_frequency_hz.unwrap(),
    }
}

/// Read an integer field and check its range
fn read_field(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> Option<u32> {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return None;
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return None;
        }
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) if range.contains(value) => Some(*value as u32),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Write lamp_config.rs into OUT_DIR
fn generate_config(config: &LampConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("lamp_config.rs")).unwrap();

    writeln!(f, "// Generated from lamp.toml by build.rs").unwrap();
    writeln!(f, "pub const DEBOUNCE_MS: u32 = {};", config.debounce_ms).unwrap();
    writeln!(f, "pub const LONG_PRESS_MS: u32 = {};", config.long_press_ms).unwrap();
    writeln!(f, "pub const ARC_REFRESH_MS: u32 = {};", config.arc_refresh_ms).unwrap();
    writeln!(f, "pub const FRAME_RATE_HZ: u32 = {};", config.frame_rate_hz).unwrap();
    writeln!(f, "pub const PWM_FREQUENCY_HZ: u32 = {};", config.pwm_frequency_hz).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
