//! States assembling command-line bits into frames.

use either::Either::{self, Left, Right};

use crate::vector::BitVector;

use super::{
    edge::Edges,
    frame::{self, Frame},
};

/// Command indices answered by a long register response.
const LONG_RESPONSE_COMMANDS: [u8; 3] = [2, 9, 10];

/// Target length of the frame being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLength {
    /// The standard 48-bit command or response frame.
    Short,
    /// The 136-bit register response to CMD2, CMD9, or CMD10.
    Long,
}

impl FrameLength {
    /// The number of bits in a frame of this length.
    pub fn bits(self) -> usize {
        match self {
            Self::Short => 48,
            Self::Long => 136,
        }
    }
}

/// State token watching an idle bus for the start of a transaction.
#[derive(Debug)]
pub struct Idle {
    pub(super) previous_command: u8,
}

impl Idle {
    /// Begin watching an idle bus.
    pub fn new() -> Self {
        Self {
            previous_command: 0,
        }
    }

    /// The index of the most recently decoded command frame.
    pub fn previous_command(&self) -> u8 {
        self.previous_command
    }

    /// Transition to another state by watching for a transaction start.
    ///
    /// A falling edge on the command line opens a frame. The target length
    /// comes from the previously decoded command index: CMD2, CMD9, and
    /// CMD10 solicit a long register response, everything else the standard
    /// short frame.
    pub fn advance(self, edges: &Edges) -> Either<Idle, Acquiring> {
        if !edges.falling_command {
            return Left(self);
        }

        let target = if LONG_RESPONSE_COMMANDS.contains(&self.previous_command) {
            FrameLength::Long
        } else {
            FrameLength::Short
        };

        Right(Acquiring {
            accumulator: BitVector::new(),
            target,
            previous_command: self.previous_command,
        })
    }
}

impl Default for Idle {
    fn default() -> Self {
        Self::new()
    }
}

/// State token clocking command-line bits into an accumulator.
#[derive(Debug)]
pub struct Acquiring {
    accumulator: BitVector,
    target: FrameLength,
    previous_command: u8,
}

impl Acquiring {
    /// The number of bits captured so far.
    pub fn bits_acquired(&self) -> usize {
        self.accumulator.len()
    }

    /// The length this frame will have when complete.
    pub fn target(&self) -> FrameLength {
        self.target
    }

    /// Transition to another state by latching the command line.
    ///
    /// The command level is latched on every rising clock edge. When the
    /// accumulator reaches the target length, the frame is classified and
    /// returned together with the successor [`Idle`] token. A failed
    /// classification discards the frame; the successor then keeps the
    /// prior command index, so later frames still size correctly.
    pub fn advance(
        mut self,
        edges: &Edges,
        command: u8,
    ) -> Either<(Result<Frame, frame::Error>, Idle), Acquiring> {
        if !edges.rising_clock {
            return Right(self);
        }

        if let Err(error) = self.accumulator.append(command) {
            let idle = Idle {
                previous_command: self.previous_command,
            };

            return Left((Err(error.into()), idle));
        }

        if self.accumulator.len() < self.target.bits() {
            return Right(self);
        }

        let outcome = frame::classify(self.accumulator, self.previous_command);

        // A command carries its index forward to size the next response; a
        // long register response resets the running index.
        let previous_command = match &outcome {
            Ok(Frame::Command { command_index, .. }) => *command_index,
            Ok(Frame::R2 { .. }) => 0,
            _ => self.previous_command,
        };

        Left((outcome, Idle { previous_command }))
    }
}
