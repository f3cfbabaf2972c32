use candle_core::Tensor;

use crate::config::LengthPolicy;
use crate::decoding::greedy::decode_with;
use crate::decoding::tensor::{host_lengths, HostScores};
use crate::error::DecodeError;
use crate::pipeline::traits::{FrameSelector, OutputFilter};
use crate::types::{DecodeOutput, ScoreBatch, ScoreLayout, Symbol};

pub struct CtcDecoder {
    blank_id: usize,
    layout: ScoreLayout,
    length_policy: LengthPolicy,
    frame_selector: Box<dyn FrameSelector>,
    output_filter: Box<dyn OutputFilter>,
}

pub(crate) struct CtcDecoderParts {
    pub blank_id: usize,
    pub layout: ScoreLayout,
    pub length_policy: LengthPolicy,
    pub frame_selector: Box<dyn FrameSelector>,
    pub output_filter: Box<dyn OutputFilter>,
}

impl CtcDecoder {
    pub(crate) fn from_parts(parts: CtcDecoderParts) -> Self {
        Self {
            blank_id: parts.blank_id,
            layout: parts.layout,
            length_policy: parts.length_policy,
            frame_selector: parts.frame_selector,
            output_filter: parts.output_filter,
        }
    }

    pub fn blank_id(&self) -> usize {
        self.blank_id
    }

    /// Layout expected by [`CtcDecoder::decode_tensor`].
    pub fn layout(&self) -> ScoreLayout {
        self.layout
    }

    pub fn length_policy(&self) -> LengthPolicy {
        self.length_policy
    }

    pub fn decode_batch<S: Symbol>(
        &self,
        scores: &ScoreBatch<'_, f32>,
        relative_lengths: &[f32],
    ) -> Result<DecodeOutput<S>, DecodeError> {
        decode_with(
            scores,
            relative_lengths,
            self.blank_id,
            self.length_policy,
            |example, frames| self.frame_selector.select_path(scores, example, frames),
            |path| self.output_filter.filter(path, self.blank_id),
        )
    }

    /// Decode candle tensors; `scores` must be in this decoder's layout.
    pub fn decode_tensor<S: Symbol>(
        &self,
        scores: &Tensor,
        relative_lengths: &Tensor,
    ) -> Result<DecodeOutput<S>, DecodeError> {
        let host = HostScores::from_tensor(scores)?;
        let lengths = host_lengths(relative_lengths)?;
        self.decode_batch(&host.view(self.layout)?, &lengths)
    }
}
