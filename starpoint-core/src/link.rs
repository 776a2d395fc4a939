//! Serial link to the coordinate host
//!
//! Wraps a UART pair with line assembly and frame classification. The
//! receive side never blocks: each poll moves whatever bytes have arrived
//! into the line buffer and hands back at most one complete line.

use starpoint_hal::{UartRx, UartTx};
use starpoint_protocol::{
    classify, encode_request, AngleParsing, FrameError, InboundFrame, Line, LineAssembler,
    LineError, LINE_BUFFER_SIZE,
};

/// Errors that can occur on the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// UART transmit failed
    Write,
    /// UART receive failed
    Read,
    /// Request could not be encoded
    Frame(FrameError),
}

impl From<FrameError> for LinkError {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

/// One received line and its classification
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Received {
    pub line: Line,
    pub frame: InboundFrame,
}

/// Line-oriented link over a UART pair
pub struct SerialLink<T, R> {
    tx: T,
    rx: R,
    lines: LineAssembler,
    parsing: AngleParsing,
    overflows: u32,
}

impl<T: UartTx, R: UartRx> SerialLink<T, R> {
    pub fn new(tx: T, rx: R, parsing: AngleParsing) -> Self {
        Self {
            tx,
            rx,
            lines: LineAssembler::new(),
            parsing,
            overflows: 0,
        }
    }

    /// Number of oversized lines dropped so far
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    pub fn tx_mut(&mut self) -> &mut T {
        &mut self.tx
    }

    pub fn rx_mut(&mut self) -> &mut R {
        &mut self.rx
    }

    /// Send `STAR:<name>\n`
    pub fn send_request(&mut self, object_name: &str) -> Result<(), LinkError> {
        let frame = encode_request(object_name)?;
        self.tx
            .write_blocking(&frame)
            .map_err(|_| LinkError::Write)?;
        self.tx.flush().map_err(|_| LinkError::Write)
    }

    /// Take at most one complete line, reading new bytes if none is buffered
    pub fn poll(&mut self) -> Result<Option<Received>, LinkError> {
        if let Some(line) = self.lines.next_line() {
            return Ok(Some(self.classify(line)));
        }

        let mut buf = [0u8; LINE_BUFFER_SIZE];
        let room = self.lines.free().min(buf.len());
        let n = self
            .rx
            .read_available(&mut buf[..room])
            .map_err(|_| LinkError::Read)?;

        // Only `free()` bytes were read, so the assembler cannot be full
        if let Err(LineError::Overflow) = self.lines.push(&buf[..n]) {
            self.overflows = self.overflows.wrapping_add(1);
        }

        Ok(self.lines.next_line().map(|line| self.classify(line)))
    }

    fn classify(&self, line: Line) -> Received {
        let frame = match line.text() {
            Some(text) => classify(text, self.parsing),
            None => InboundFrame::Unrecognized,
        };
        Received { line, frame }
    }
}
