//! Frame types for the coordinate host protocol
//!
//! Frames are divided into two directions:
//! - Controller → Host: coordinate requests
//! - Host → Controller: coordinates, errors, and noise

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::line::MAX_LINE_LEN;
use crate::number::{lenient_angle, parse_angle};

/// Prefix of an outbound coordinate request
pub const REQUEST_PREFIX: &str = "STAR:";

/// Prefix of an inbound error frame
pub const ERROR_MARKER: &str = "ERROR:";

/// Prefix the host uses when it does not know the requested name
pub const UNKNOWN_OBJECT_MARKER: &str = "Unknown object:";

/// Longest object name that can be requested
pub const MAX_NAME_LEN: usize = 24;

/// Longest encoded request (prefix + name + terminator)
pub const MAX_REQUEST_LEN: usize = REQUEST_PREFIX.len() + MAX_NAME_LEN + 1;

/// Errors that can occur while encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Object name is longer than [`MAX_NAME_LEN`]
    NameTooLong,
    /// Object name is empty or contains a line terminator
    InvalidName,
}

/// How numeric fields of a coordinate frame are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AngleParsing {
    /// Longest numeric prefix, `0.0` when there is none
    #[default]
    Lenient,
    /// Whole field must be a decimal, otherwise the frame is unrecognized
    Strict,
}

/// Frames sent from the controller to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboundFrame<'a> {
    /// Ask for the current coordinates of a catalog object
    Request { object_name: &'a str },
}

impl<'a> OutboundFrame<'a> {
    /// Encode this frame as a terminated line
    pub fn encode(&self) -> Result<Vec<u8, MAX_REQUEST_LEN>, FrameError> {
        match self {
            OutboundFrame::Request { object_name } => {
                if object_name.is_empty() || object_name.contains(['\n', '\r']) {
                    return Err(FrameError::InvalidName);
                }
                if object_name.len() > MAX_NAME_LEN {
                    return Err(FrameError::NameTooLong);
                }

                let mut out = Vec::new();
                // Capacity is sized for prefix + MAX_NAME_LEN + terminator
                out.extend_from_slice(REQUEST_PREFIX.as_bytes())
                    .map_err(|_| FrameError::NameTooLong)?;
                out.extend_from_slice(object_name.as_bytes())
                    .map_err(|_| FrameError::NameTooLong)?;
                out.push(b'\n').map_err(|_| FrameError::NameTooLong)?;
                Ok(out)
            }
        }
    }
}

/// Encode a coordinate request for `object_name`
pub fn encode_request(object_name: &str) -> Result<Vec<u8, MAX_REQUEST_LEN>, FrameError> {
    OutboundFrame::Request { object_name }.encode()
}

/// Frames received from the host
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundFrame {
    /// Current position of the requested object, in degrees
    Response { azimuth: f32, elevation: f32 },
    /// The host could not resolve the request
    Error { message: String<MAX_LINE_LEN> },
    /// Anything else; dropped by the caller
    Unrecognized,
}

impl InboundFrame {
    /// Check if this frame carries coordinates
    pub fn is_response(&self) -> bool {
        matches!(self, InboundFrame::Response { .. })
    }

    /// Check if this frame reports a host-side failure
    pub fn is_error(&self) -> bool {
        matches!(self, InboundFrame::Error { .. })
    }
}

fn error_frame(message: &str) -> InboundFrame {
    let mut text = String::new();
    for ch in message.chars() {
        if text.push(ch).is_err() {
            break;
        }
    }
    InboundFrame::Error { message: text }
}

/// Classify one received line
///
/// Error markers are checked first, so an error message containing a comma
/// is still an error. A coordinate frame has exactly one comma with a
/// non-empty field on each side; how the fields are read depends on
/// `parsing`.
pub fn classify(line: &str, parsing: AngleParsing) -> InboundFrame {
    let line = line.trim();

    if let Some(message) = line.strip_prefix(ERROR_MARKER) {
        return error_frame(message.trim());
    }
    if line.starts_with(UNKNOWN_OBJECT_MARKER) {
        return error_frame(line);
    }

    let mut fields = line.split(',');
    let (azimuth, elevation) = match (fields.next(), fields.next(), fields.next()) {
        (Some(az), Some(el), None) => (az.trim(), el.trim()),
        _ => return InboundFrame::Unrecognized,
    };
    if azimuth.is_empty() || elevation.is_empty() {
        return InboundFrame::Unrecognized;
    }

    match parsing {
        AngleParsing::Lenient => InboundFrame::Response {
            azimuth: lenient_angle(azimuth),
            elevation: lenient_angle(elevation),
        },
        AngleParsing::Strict => match (parse_angle(azimuth), parse_angle(elevation)) {
            (Ok(azimuth), Ok(elevation)) => InboundFrame::Response { azimuth, elevation },
            _ => InboundFrame::Unrecognized,
        },
    }
}
