//! Build script for starpoint-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pointer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use starpoint_core::config::{parse_config, PointerConfig};

fn main() {
    setup_linker();
    validate_config();
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pointer.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pointer.toml");

    let config_path = Path::new("pointer.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pointer.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds pointer.toml as its configuration.          ║\n\
            ║  Please create one in the starpoint-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pointer.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Full TOML grammar and field types via serde
    let config: PointerConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid pointer.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    // The on-device parser only handles a subset of TOML
    if let Err(e) = parse_config(&config_content) {
        report_errors(&[format!("device parser rejected file: {:?}", e)]);
    }

    validate_ranges(&config);

    println!("cargo:warning=pointer.toml validated successfully");
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

/// Check values that parse but cannot work on the hardware
fn validate_ranges(config: &PointerConfig) {
    let mut errors = Vec::new();

    let touch = &config.touch;
    if touch.min_pressure >= touch.max_pressure {
        errors.push("[touch] min_pressure must be below max_pressure".to_string());
    }
    if touch.raw_x_min >= touch.raw_x_max || touch.raw_y_min >= touch.raw_y_max {
        errors.push("[touch] raw minimums must be below raw maximums".to_string());
    }
    if touch.screen_width == 0 || touch.screen_height == 0 {
        errors.push("[touch] screen size must be non-zero".to_string());
    }

    if config.azimuth.steps_per_revolution == 0 {
        errors.push("[azimuth] steps_per_revolution must be non-zero".to_string());
    }

    let el = &config.elevation;
    if el.min_deg >= el.max_deg {
        errors.push("[elevation] min_deg must be below max_deg".to_string());
    }
    for (name, value) in [("initial_deg", el.initial_deg), ("home_deg", el.home_deg)] {
        if value < el.min_deg || value > el.max_deg {
            errors.push(format!("[elevation] {} must be within min_deg..max_deg", name));
        }
    }
    if el.servo_min_pulse_us >= el.servo_max_pulse_us || el.servo_max_pulse_us > 20_000 {
        errors.push("[elevation] servo pulse range must be increasing and under 20000".to_string());
    }

    if config.link.baudrate == 0 {
        errors.push("[link] baudrate must be non-zero".to_string());
    }

    if !errors.is_empty() {
        report_errors(&errors);
    }
}

fn report_errors(errors: &[String]) {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid pointer configuration                            ║\n\
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
