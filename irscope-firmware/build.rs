//! Build script for irscope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates recorder.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate recorder.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=recorder.toml");

    let config_path = Path::new("recorder.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: recorder.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds recorder.toml at build time.                ║\n\
            ║  Please create one in the irscope-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read recorder.toml                             ║\n\
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
                ║  ERROR: Invalid TOML syntax in recorder.toml                     ║\n\
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
    validate_receiver(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_presentation(&config, &mut errors);
    validate_serial(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid recorder configuration                           ║\n\
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

    println!("cargo:warning=recorder.toml validated successfully");
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

/// Look up a section; absent sections keep firmware defaults
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

/// Check an optional integer key against an inclusive range
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Validate receiver settings
fn validate_receiver(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(receiver) = section(config, "receiver", errors) else {
        return;
    };

    match receiver.get("pin") {
        Some(toml::Value::String(pin)) => {
            let number = pin.trim_start_matches(['^', '!']).strip_prefix("gpio");
            match number.and_then(|n| n.parse::<u8>().ok()) {
                Some(n) if n >= 30 => {
                    errors.push(format!("[receiver] pin gpio{} does not exist", n));
                }
                Some(0) | Some(4) | Some(5) => {
                    errors.push(format!(
                        "[receiver] pin '{}' is wired to UART0/I2C0",
                        pin
                    ));
                }
                Some(_) => {}
                None => errors.push(format!(
                    "[receiver] pin '{}' must look like \"^!gpio14\"",
                    pin
                )),
            }
        }
        Some(_) => errors.push("[receiver] pin must be a string".to_string()),
        None => {}
    }

    check_range(receiver, "receiver", "capture_buffer_size", 1, 512, errors);
    check_range(receiver, "receiver", "timeout_ms", 1, 255, errors);
    check_range(receiver, "receiver", "min_unknown_size", 3, 512, errors);
    check_range(receiver, "receiver", "tolerance_percent", 0, 100, errors);
}

/// Validate display settings
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = section(config, "display", errors) else {
        return;
    };

    check_range(display, "display", "i2c_address", 0x08, 0x77, errors);
    check_range(display, "display", "i2c_frequency", 1, 1_000_000, errors);
    check_range(display, "display", "width", 1, 128, errors);

    if let Some(toml::Value::Integer(h)) = display.get("height") {
        if *h != 32 && *h != 64 {
            errors.push("[display] height must be 32 or 64".to_string());
        }
    }
}

/// Validate presentation settings
fn validate_presentation(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(presentation) = section(config, "presentation", errors) else {
        return;
    };

    check_range(
        presentation,
        "presentation",
        "clear_window_ms",
        0,
        u32::MAX as i64,
        errors,
    );
    check_range(presentation, "presentation", "marker_size", 1, 32, errors);

    match presentation.get("overflow") {
        Some(toml::Value::String(policy)) => {
            if !["clip", "wrap", "truncate_oldest"].contains(&policy.as_str()) {
                errors.push(
                    "[presentation] overflow must be 'clip', 'wrap', or 'truncate_oldest'"
                        .to_string(),
                );
            }
        }
        Some(_) => errors.push("[presentation] overflow must be a string".to_string()),
        None => {}
    }
}

/// Validate serial settings
fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = section(config, "serial", errors) else {
        return;
    };

    check_range(serial, "serial", "baudrate", 1, 921_600, errors);
}
