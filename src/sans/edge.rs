//! Sampled signal records and edge tracking.

use thiserror::Error;

/// An error validating a captured sample.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    /// A clock or command level outside `{0, 1}`.
    #[error("Clock and command levels must be the binary bit values 0 and 1 (got {0}).")]
    InvalidBitValue(u8),
    /// A data value outside the four-bit range.
    #[error("Data values must be hexadecimal nibbles (got {0:#x}).")]
    InvalidNibble(u8),
}

/// One capture row: the three bus signals at a single sample instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    clock: u8,
    command: u8,
    data: u8,
}

impl Sample {
    /// Validate and construct a sample.
    ///
    /// `clock` and `command` must be 0 or 1, and `data` a nibble in
    /// `0..=0xF`. Rejection happens here, before any decoder state can be
    /// touched by the malformed values.
    pub fn new(clock: u8, command: u8, data: u8) -> Result<Self, SampleError> {
        if clock > 1 {
            return Err(SampleError::InvalidBitValue(clock));
        }
        if command > 1 {
            return Err(SampleError::InvalidBitValue(command));
        }
        if data > 0xF {
            return Err(SampleError::InvalidNibble(data));
        }

        Ok(Self {
            clock,
            command,
            data,
        })
    }

    /// The clock-line level.
    pub fn clock(&self) -> u8 {
        self.clock
    }

    /// The command-line level.
    pub fn command(&self) -> u8 {
        self.command
    }

    /// The data-line nibble.
    ///
    /// Carried through for completeness of the capture record; command and
    /// response framing reads only the command line.
    pub fn data(&self) -> u8 {
        self.data
    }
}

/// Edge events observed between two consecutive samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    /// The clock line moved 0 to 1.
    pub rising_clock: bool,
    /// The clock line moved 1 to 0.
    pub falling_clock: bool,
    /// The command line moved 0 to 1.
    pub rising_command: bool,
    /// The command line moved 1 to 0.
    pub falling_command: bool,
    /// On a rising clock edge, the whole sample lines elapsed since the
    /// previous rising clock edge. Raw input to clock-rate estimation, kept
    /// unit-free so the edge tracker need not know the sample period.
    pub clock_interval: Option<u64>,
}

/// Signal history carried between samples.
///
/// The rest state models an idle bus: command held high, clock low. Line
/// numbering starts at [`EdgeState::FIRST_LINE`], matching a capture table
/// whose first line is the column header.
#[derive(Debug, Clone)]
pub struct EdgeState {
    last_clock: u8,
    last_command: u8,
    line: u64,
    last_clock_edge_line: u64,
}

impl EdgeState {
    /// Line number attributed to the first sample.
    pub const FIRST_LINE: u64 = 2;

    /// Begin tracking from the rest state.
    pub fn new() -> Self {
        Self {
            last_clock: 0,
            last_command: 1,
            line: Self::FIRST_LINE,
            last_clock_edge_line: 0,
        }
    }

    /// Compare a sample against the stored history, recording any edges,
    /// then advance the history to this sample.
    pub fn observe(&mut self, sample: &Sample) -> Edges {
        let mut edges = Edges {
            rising_clock: sample.clock() == 1 && self.last_clock == 0,
            falling_clock: sample.clock() == 0 && self.last_clock == 1,
            rising_command: sample.command() == 1 && self.last_command == 0,
            falling_command: sample.command() == 0 && self.last_command == 1,
            clock_interval: None,
        };

        if edges.rising_clock {
            edges.clock_interval = Some(self.line - self.last_clock_edge_line);
            self.last_clock_edge_line = self.line;
        }

        self.last_clock = sample.clock();
        self.last_command = sample.command();
        self.line += 1;

        edges
    }

    /// The line number the next observed sample will be attributed to.
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl Default for EdgeState {
    fn default() -> Self {
        Self::new()
    }
}
