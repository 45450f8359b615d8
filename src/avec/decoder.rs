//! Push-per-sample decoder driving the state machine.

use core::mem;

use either::Either::{Left, Right};

use crate::sans::{
    capture::{Acquiring, Idle},
    edge::{EdgeState, Sample},
    frame,
};

use super::FromFrames;

/// A streaming frame decoder consuming one sample at a time.
///
/// Owns the edge-detection history, the capture state machine, and the
/// last-reported clock rate for one signal trace. Decoding a second trace
/// concurrently requires a second decoder; instances share nothing.
#[derive(Debug)]
pub struct FrameDecoder {
    state: State,
    edges: EdgeState,
    sample_period: f64,
    last_rate: Option<f64>,
}

#[derive(Debug)]
enum State {
    Idle(Idle),
    Acquiring(Acquiring),
}

impl Default for State {
    fn default() -> Self {
        Self::Idle(Idle::new())
    }
}

impl FrameDecoder {
    /// The sample period of a capture taken at the default rate, in seconds
    /// (10 ns).
    pub const DEFAULT_SAMPLE_PERIOD: f64 = 10e-9;

    /// Create a decoder for a capture taken at `sample_period` seconds per
    /// sample.
    pub fn new(sample_period: f64) -> Self {
        Self {
            state: State::default(),
            edges: EdgeState::new(),
            sample_period,
            last_rate: None,
        }
    }

    /// Process one sample, publishing any events to a receiver.
    ///
    /// Edges are evaluated on every sample, whatever the current state; at
    /// most one frame is published per call. An `Err` reports that the
    /// frame under assembly was discarded. The machine has already
    /// returned to idle, and further samples may be processed.
    pub fn process_sample(
        &mut self,
        sample: &Sample,
        receiver: &mut impl FromFrames,
    ) -> Result<(), frame::Error> {
        let line = self.edges.line();
        let edges = self.edges.observe(sample);

        if let Some(interval) = edges.clock_interval {
            let frequency_hz = 1.0 / (interval as f64 * self.sample_period);

            if self.last_rate != Some(frequency_hz) {
                receiver.add_clock_rate(frequency_hz);
                self.last_rate = Some(frequency_hz);
            }
        }

        let mut outcome = Ok(());

        self.state = match mem::take(&mut self.state) {
            State::Idle(idle) => match idle.advance(&edges) {
                Left(idle) => State::Idle(idle),
                Right(acquiring) => {
                    log::trace!("Transaction start at line {line}.");
                    State::Acquiring(acquiring)
                }
            },
            State::Acquiring(acquiring) => match acquiring.advance(&edges, sample.command()) {
                Right(acquiring) => State::Acquiring(acquiring),
                Left((Ok(frame), idle)) => {
                    receiver.add_frame(frame);
                    State::Idle(idle)
                }
                Left((Err(error), idle)) => {
                    outcome = Err(error);
                    State::Idle(idle)
                }
            },
        };

        outcome
    }

    /// Finish the capture, reporting a frame cut off by the end of the
    /// stream.
    pub fn finish(self, receiver: &mut impl FromFrames) {
        if let State::Acquiring(acquiring) = self.state {
            receiver.truncated_frame(acquiring.bits_acquired(), acquiring.target().bits());
        }
    }
}
