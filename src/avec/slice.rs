//! Slice-based decoder implementation.

use crate::sans::edge::Sample;

use super::{FrameDecoder, FromFrames};

/// Decode frames from a slice of samples, publishing to a receiver.
///
/// This method is also re-exported as `interposer::avec::decode_slice`.
///
/// A frame that fails classification is discarded with a warning and
/// decoding continues at the next transaction.
pub fn decode(samples: &[Sample], sample_period: f64, o: &mut impl FromFrames) {
    let mut decoder = FrameDecoder::new(sample_period);

    for sample in samples {
        if let Err(error) = decoder.process_sample(sample, o) {
            log::warn!("Discarding frame: {error}");
        }
    }

    decoder.finish(o);
}
