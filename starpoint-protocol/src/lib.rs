//! Coordinate host line protocol
//!
//! This crate defines the text protocol spoken over the 9600 baud serial link
//! between the pointing controller and the host that resolves object names to
//! sky coordinates. Every frame is one line of text terminated by `\n`.
//!
//! # Protocol Overview
//!
//! ```text
//! controller ──► host   STAR:<name>\n               request coordinates for <name>
//! controller ◄── host   <azimuth>,<elevation>\n     decimal degrees
//! controller ◄── host   ERROR:<message>\n           lookup failed
//! controller ◄── host   Unknown object: <name>\n    name not in the host's table
//! ```
//!
//! Anything else the host prints (banners, debug output, half a line after a
//! reset) is classified as [`InboundFrame::Unrecognized`] and dropped by the
//! caller. There is no checksum, no acknowledgement and no retry.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod messages;
pub mod number;

pub use line::{Line, LineAssembler, LineError, LINE_BUFFER_SIZE, MAX_LINE_LEN};
pub use messages::{
    classify, encode_request, AngleParsing, FrameError, InboundFrame, OutboundFrame, ERROR_MARKER,
    MAX_NAME_LEN, MAX_REQUEST_LEN, REQUEST_PREFIX, UNKNOWN_OBJECT_MARKER,
};
pub use number::{lenient_angle, parse_angle, NumberError};
