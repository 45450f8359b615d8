//! Frame classification and field extraction.
//!
//! Bit positions in this module are protocol facts from the SD physical
//! layer specification: a frame leads with a start bit and a transfer
//! direction bit, the command index sits at bits 45 downto 40, and so on.
//! Fields are cut out of the captured vector with downto slices at those
//! fixed positions.

use core::fmt;

use thiserror::Error;

use crate::vector::{self, BitVector};

/// Reserved command-index value marking an OCR register response.
const OCR_RESPONSE_INDEX: u8 = 63;

/// Command-index value marking a published-RCA response.
const RCA_RESPONSE_INDEX: u8 = 3;

/// Command index announcing that the next command is application-specific.
const APP_COMMAND_INDEX: u8 = 55;

/// Bits in a long register response.
const LONG_FRAME_BITS: usize = 136;

/// An error classifying a completed frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A field slice fell outside the captured vector.
    #[error(transparent)]
    Vector(#[from] vector::Error),
}

/// A decoded command or response frame.
///
/// Every variant keeps the captured bits in `raw` alongside the extracted
/// fields, so renderers can show the wire image of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A host-to-card command.
    Command {
        raw: BitVector,
        start_and_transfer: u8,
        command_index: u8,
        argument: u32,
        crc7_and_stop: u8,
        /// Set when the preceding command was CMD55, marking this index as
        /// application-specific (`ACMD<n>`) for display. The underlying
        /// `command_index` is unaffected.
        application: bool,
    },
    /// A normal card status response.
    R1 {
        raw: BitVector,
        start_and_transfer: u8,
        command_index: u8,
        argument: u32,
        crc7_and_stop: u8,
    },
    /// An OCR register response.
    R3 {
        raw: BitVector,
        start_and_transfer: u8,
        reserved: u8,
        ocr: u32,
        reserved2: u8,
    },
    /// A published-RCA response.
    R6 {
        raw: BitVector,
        start_and_transfer: u8,
        command_index: u8,
        new_rca: u16,
        card_status: u16,
        crc7_and_stop: u8,
    },
    /// A CID or CSD register response.
    R2 {
        raw: BitVector,
        start_and_transfer: u8,
        reserved: u8,
        cid_or_csd: u128,
    },
}

/// Classify a completed frame and extract its fields.
///
/// The top two bits separate host-to-card commands (transfer bit set) from
/// card-to-host responses. Responses dispatch first on the captured length
/// (a 136-bit vector is read as a long register response without checking
/// that its content agrees), then on the command-index field.
///
/// `previous_command` is the index of the most recently decoded command
/// frame; it marks a command following CMD55 as application-specific.
///
/// A vector too short for any required slice fails with the propagated
/// range error.
pub fn classify(vector: BitVector, previous_command: u8) -> Result<Frame, Error> {
    let length = vector.len();

    if length < 2 {
        return Err(vector::Error::RangeError {
            high: 1,
            low: 0,
            length,
        }
        .into());
    }

    let start_and_transfer = vector.slice(length - 1, length - 2)?.value()? as u8;

    if start_and_transfer == 1 {
        let command_index = vector.slice(45, 40)?.value()? as u8;
        let argument = vector.slice(39, 8)?.value()? as u32;
        let crc7_and_stop = vector.slice(7, 0)?.value()? as u8;

        return Ok(Frame::Command {
            start_and_transfer,
            command_index,
            argument,
            crc7_and_stop,
            application: previous_command == APP_COMMAND_INDEX,
            raw: vector,
        });
    }

    if length == LONG_FRAME_BITS {
        let start_and_transfer = vector.slice(135, 134)?.value()? as u8;
        let reserved = vector.slice(133, 128)?.value()? as u8;
        let cid_or_csd = vector.slice(127, 0)?.value()?;

        return Ok(Frame::R2 {
            start_and_transfer,
            reserved,
            cid_or_csd,
            raw: vector,
        });
    }

    let command_index = vector.slice(45, 40)?.value()? as u8;

    match command_index {
        OCR_RESPONSE_INDEX => {
            let ocr = vector.slice(39, 8)?.value()? as u32;
            let reserved2 = vector.slice(7, 0)?.value()? as u8;

            Ok(Frame::R3 {
                start_and_transfer,
                reserved: command_index,
                ocr,
                reserved2,
                raw: vector,
            })
        }
        RCA_RESPONSE_INDEX => {
            let new_rca = vector.slice(39, 24)?.value()? as u16;
            let card_status = vector.slice(23, 8)?.value()? as u16;
            let crc7_and_stop = vector.slice(7, 0)?.value()? as u8;

            Ok(Frame::R6 {
                start_and_transfer,
                command_index,
                new_rca,
                card_status,
                crc7_and_stop,
                raw: vector,
            })
        }
        _ => {
            let argument = vector.slice(39, 8)?.value()? as u32;
            let crc7_and_stop = vector.slice(7, 0)?.value()? as u8;

            Ok(Frame::R1 {
                start_and_transfer,
                command_index,
                argument,
                crc7_and_stop,
                raw: vector,
            })
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command {
                raw,
                start_and_transfer,
                command_index,
                argument,
                crc7_and_stop,
                application,
            } => {
                let raw = raw.hex_string();
                let raw = raw.trim_start_matches("0x");

                let index = if *application { "ACMD" } else { " CMD" };

                write!(
                    f,
                    "Command:      Raw: {raw}  Start + Tx: {start_and_transfer:02x}  \
                     Cmd Idx: {index}{command_index:02}  Arg: {argument:08x}  \
                     CRC7 + Stop: {crc7_and_stop:02x}"
                )
            }
            Self::R1 {
                raw,
                start_and_transfer,
                command_index,
                argument,
                crc7_and_stop,
            } => {
                let raw = raw.hex_string();
                let raw = raw.trim_start_matches("0x");

                write!(
                    f,
                    "R1 (Normal):  Raw: {raw}  Start + Rx: {start_and_transfer:02x}  \
                     Cmd Idx:  CMD{command_index:02}  Arg: {argument:08x}  \
                     CRC7 + Stop: {crc7_and_stop:02x}"
                )
            }
            Self::R3 {
                raw,
                start_and_transfer,
                reserved,
                ocr,
                reserved2,
            } => {
                let raw = raw.hex_string();
                let raw = raw.trim_start_matches("0x");

                write!(
                    f,
                    "R3 (OCR):     Raw: {raw}  Start + Rx: {start_and_transfer:02x}  \
                     Reserved:    {reserved:02x}  OCR: {ocr:08x}  Reserved:    {reserved2:02x}"
                )
            }
            Self::R6 {
                raw,
                start_and_transfer,
                command_index,
                new_rca,
                card_status,
                crc7_and_stop,
            } => {
                let raw = raw.hex_string();
                let raw = raw.trim_start_matches("0x");

                writeln!(f, "R6 (RCA):     Raw: {raw}")?;
                writeln!(f, "              Start Rx: {start_and_transfer:02x}")?;
                writeln!(f, "              Cmd Idx:  {command_index:02x}")?;
                writeln!(f, "              RCA: {new_rca:04x}")?;
                writeln!(f, "              Card Status: {card_status:04x}")?;
                write!(f, "              CRC7 Stop: {crc7_and_stop:02x}")
            }
            Self::R2 {
                raw,
                start_and_transfer,
                reserved,
                cid_or_csd,
            } => {
                let raw = raw.hex_string();
                let raw = raw.trim_start_matches("0x");

                writeln!(f, "R2 (CID/CSD): Raw: {raw}")?;
                writeln!(f, "              Start Rx: {start_and_transfer:02x}")?;
                writeln!(f, "              Reserved: {reserved:02x}")?;
                write!(f, "              CID/CSD + Stop: {cid_or_csd:032x}")
            }
        }
    }
}
