//! Simple TOML parser for pointer configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the pointer configuration file. It does NOT support the full TOML spec
//! and never allocates.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float, boolean)
//! - `[touch]`, `[azimuth]`, `[elevation]`, `[link]` and `[ui]` headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//! - Exponent notation in floats

use starpoint_protocol::{parse_angle, AngleParsing};

use super::types::{
    AzimuthConfig, AzimuthPath, ElevationConfig, LinkConfig, PointerConfig, TouchCalibration,
    UiConfig,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not known in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Touch,
    Azimuth,
    Elevation,
    Link,
    Ui,
}

/// Parse TOML configuration into PointerConfig
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<PointerConfig, ParseError> {
    let mut config = PointerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Parse section header like "touch" or "azimuth"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "touch" => Ok(Section::Touch),
        "azimuth" => Ok(Section::Azimuth),
        "elevation" => Ok(Section::Elevation),
        "link" => Ok(Section::Link),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse key = value
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a decimal value
fn parse_float(value: &str) -> Result<f32, ParseError> {
    parse_angle(value).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_path(value: &str) -> Result<AzimuthPath, ParseError> {
    match parse_string(value) {
        "direct" => Ok(AzimuthPath::Direct),
        "shortest" => Ok(AzimuthPath::Shortest),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_angle_parsing(value: &str) -> Result<AngleParsing, ParseError> {
    match parse_string(value) {
        "lenient" => Ok(AngleParsing::Lenient),
        "strict" => Ok(AngleParsing::Strict),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PointerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => Err(ParseError::UnknownKey),
        Section::Touch => apply_touch(&mut config.touch, key, value),
        Section::Azimuth => apply_azimuth(&mut config.azimuth, key, value),
        Section::Elevation => apply_elevation(&mut config.elevation, key, value),
        Section::Link => apply_link(&mut config.link, key, value),
        Section::Ui => apply_ui(&mut config.ui, key, value),
    }
}

fn apply_touch(t: &mut TouchCalibration, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "min_pressure" => t.min_pressure = parse_int(value)?,
        "max_pressure" => t.max_pressure = parse_int(value)?,
        "raw_x_min" => t.raw_x_min = parse_int(value)?,
        "raw_x_max" => t.raw_x_max = parse_int(value)?,
        "raw_y_min" => t.raw_y_min = parse_int(value)?,
        "raw_y_max" => t.raw_y_max = parse_int(value)?,
        "screen_width" => t.screen_width = parse_int(value)?,
        "screen_height" => t.screen_height = parse_int(value)?,
        "swap_axes" => t.swap_axes = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_azimuth(a: &mut AzimuthConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "steps_per_revolution" => a.steps_per_revolution = parse_int(value)?,
        "pulse_high_us" => a.pulse_high_us = parse_int(value)?,
        "pulse_low_us" => a.pulse_low_us = parse_int(value)?,
        "invert_direction" => a.invert_direction = parse_bool(value)?,
        "path" => a.path = parse_path(value)?,
        "home_deg" => a.home_deg = parse_float(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_elevation(e: &mut ElevationConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "min_deg" => e.min_deg = parse_float(value)?,
        "max_deg" => e.max_deg = parse_float(value)?,
        "initial_deg" => e.initial_deg = parse_float(value)?,
        "home_deg" => e.home_deg = parse_float(value)?,
        "mirror_companion" => e.mirror_companion = parse_bool(value)?,
        "servo_min_pulse_us" => e.servo_min_pulse_us = parse_int(value)?,
        "servo_max_pulse_us" => e.servo_max_pulse_us = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_link(l: &mut LinkConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "baudrate" => l.baudrate = parse_int(value)?,
        "angle_parsing" => l.angle_parsing = parse_angle_parsing(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_ui(u: &mut UiConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "settle_ms" => u.settle_ms = parse_int(value)?,
        "home_on_select" => u.home_on_select = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
