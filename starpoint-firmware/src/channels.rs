//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;

/// Pipe capacity for bytes received from the coordinate host
pub const RX_PIPE_SIZE: usize = 256;

/// Bytes from the host UART, filled by the receive task and drained by the
/// controller loop
pub static RX_PIPE: Pipe<CriticalSectionRawMutex, RX_PIPE_SIZE> = Pipe::new();
