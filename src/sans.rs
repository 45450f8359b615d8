//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once a sample's edges
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any
//! completed frame.
//!
//! Edge detection sits outside the tokens: feed every sample through an
//! [`edge::EdgeState`] first, whatever the current state, and hand the
//! resulting [`edge::Edges`] to `advance`.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can
//! be constructed.
//!
//! Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Validating samples before they reach the machine (construct them
//!   through [`edge::Sample::new`]).
//!
//! - Estimating and reporting the bus clock rate from
//!   [`edge::Edges::clock_interval`].
//!
//! - Reporting a frame cut off by the end of a capture.
//!
//! Implementers are recommended to begin by studying and modifying the
//! driver in the [`crate::avec`] module.

pub mod capture;
pub mod edge;
pub mod frame;

/// Entrypoint to the finite-state machine.
pub type Decoder = capture::Idle;
