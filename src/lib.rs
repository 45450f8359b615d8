#![no_std]

//! A streaming decoder for SD bus command traffic captured with a logic
//! analyzer.
//!
//! Interposer reconstructs command and response frames from a digitally
//! sampled three-signal trace (clock, command line, data nibble) taken at a
//! fixed sample period. It tracks signal edges, clocks command-line bits
//! into a growable [`vector::BitVector`], and classifies each completed
//! frame as a host command or one of the R1/R2/R3/R6 response formats.
//!
//! Most users should begin with the drivers and the receiver trait in the
//! [`avec`] module. If these prove insufficient, consider driving the
//! state machine directly as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the CSV capture reader (default).
//! - `cli`: build the `interposer` command-line decoder.

extern crate alloc;

pub mod avec;
pub mod sans;
pub mod vector;
