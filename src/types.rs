use std::fmt;

use crate::error::DecodeError;

/// Memory order of a flat score buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLayout {
    /// `(batch, vocab, time)`, time last.
    #[default]
    VocabTime,
    /// `(batch, time, vocab)`, what a `log_softmax` over the last axis yields.
    TimeVocab,
}

impl ScoreLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VocabTime => "vocab_time",
            Self::TimeVocab => "time_vocab",
        }
    }
}

/// Borrowed, read-only view over a batch of per-frame scores.
///
/// Scores may be probabilities or log-probabilities; only their ordering
/// within one frame is ever inspected.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBatch<'a, F> {
    data: &'a [F],
    batch_size: usize,
    vocab_size: usize,
    max_time: usize,
    layout: ScoreLayout,
}

impl<'a, F: PartialOrd + Copy> ScoreBatch<'a, F> {
    /// View `data` as `(batch, vocab, time)`.
    pub fn new(data: &'a [F], dims: (usize, usize, usize)) -> Result<Self, DecodeError> {
        Self::from_layout(data, dims, ScoreLayout::VocabTime)
    }

    /// View `data` as `(batch, time, vocab)`.
    pub fn time_major(data: &'a [F], dims: (usize, usize, usize)) -> Result<Self, DecodeError> {
        Self::from_layout(data, dims, ScoreLayout::TimeVocab)
    }

    /// `dims` are the physical dimensions in the order given by `layout`.
    pub fn from_layout(
        data: &'a [F],
        dims: (usize, usize, usize),
        layout: ScoreLayout,
    ) -> Result<Self, DecodeError> {
        let (batch_size, vocab_size, max_time) = match layout {
            ScoreLayout::VocabTime => dims,
            ScoreLayout::TimeVocab => (dims.0, dims.2, dims.1),
        };
        let expected = batch_size
            .checked_mul(vocab_size)
            .and_then(|n| n.checked_mul(max_time))
            .ok_or_else(|| {
                DecodeError::shape_mismatch(format!("score dimensions {dims:?} overflow"))
            })?;
        if data.len() != expected {
            return Err(DecodeError::shape_mismatch(format!(
                "score buffer holds {} values but {} dimensions {dims:?} need {expected}",
                data.len(),
                layout.as_str()
            )));
        }
        if vocab_size == 0 && batch_size > 0 && max_time > 0 {
            return Err(DecodeError::shape_mismatch(
                "vocabulary dimension is empty but frames are present",
            ));
        }
        Ok(Self {
            data,
            batch_size,
            vocab_size,
            max_time,
            layout,
        })
    }

    /// Logical `(batch, vocab, time)` dimensions, independent of layout.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.batch_size, self.vocab_size, self.max_time)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn max_time(&self) -> usize {
        self.max_time
    }

    pub fn layout(&self) -> ScoreLayout {
        self.layout
    }

    /// Panics if any index is out of bounds.
    pub fn score(&self, example: usize, symbol: usize, frame: usize) -> F {
        assert!(
            example < self.batch_size && symbol < self.vocab_size && frame < self.max_time,
            "score index ({example}, {symbol}, {frame}) out of bounds for {:?}",
            self.dims()
        );
        self.data[self.offset(example, symbol, frame)]
    }

    /// Index of the highest score in one frame; the first maximum wins.
    ///
    /// A score that does not compare greater than the running best (NaN
    /// included) never displaces it. A NaN at index 0 is therefore never
    /// displaced either and index 0 is returned, unlike `torch.max`, which
    /// propagates NaN.
    ///
    /// Panics if `example` or `frame` is out of bounds.
    pub fn frame_argmax(&self, example: usize, frame: usize) -> usize {
        assert!(
            example < self.batch_size && frame < self.max_time,
            "frame index ({example}, {frame}) out of bounds for {:?}",
            self.dims()
        );
        let start = self.offset(example, 0, frame);
        let stride = match self.layout {
            ScoreLayout::VocabTime => self.max_time,
            ScoreLayout::TimeVocab => 1,
        };
        let mut best_index = 0usize;
        let mut best = self.data[start];
        for v in 1..self.vocab_size {
            let candidate = self.data[start + v * stride];
            if candidate > best {
                best = candidate;
                best_index = v;
            }
        }
        best_index
    }

    #[inline(always)]
    fn offset(&self, example: usize, symbol: usize, frame: usize) -> usize {
        match self.layout {
            ScoreLayout::VocabTime => {
                (example * self.vocab_size + symbol) * self.max_time + frame
            }
            ScoreLayout::TimeVocab => (example * self.max_time + frame) * self.vocab_size + symbol,
        }
    }
}

/// Symbol id type produced by greedy decoding.
///
/// Vocabulary indices are converted into the caller's id representation;
/// an index that does not fit is reported instead of wrapped.
pub trait Symbol: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn from_index(index: usize) -> Option<Self>;

    fn to_index(self) -> Option<usize>;
}

macro_rules! impl_symbol {
    ($($t:ty),* $(,)?) => {
        $(
            impl Symbol for $t {
                fn from_index(index: usize) -> Option<Self> {
                    <$t>::try_from(index).ok()
                }

                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

impl_symbol!(u8, u16, u32, u64, usize, i32, i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutput<S> {
    /// One collapsed sequence per example, in batch order.
    pub sequences: Vec<Vec<S>>,
    /// Number of frames kept for each example before arg-max.
    pub actual_lengths: Vec<usize>,
}

impl<S> DecodeOutput<S> {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // (B=1, V=3, T=2), time last.
    const VOCAB_TIME: [f32; 6] = [0.1, 0.6, 0.7, 0.3, 0.2, 0.1];

    #[test]
    fn score_batch_rejects_wrong_buffer_size() {
        let err = ScoreBatch::new(&VOCAB_TIME[..5], (1, 3, 2)).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { .. }));
    }

    #[test]
    fn score_batch_rejects_empty_vocab_with_frames() {
        let data: [f32; 0] = [];
        let err = ScoreBatch::new(&data, (2, 0, 3)).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch { .. }));
    }

    #[test]
    fn score_batch_allows_empty_batch() {
        let data: [f32; 0] = [];
        let batch = ScoreBatch::new(&data, (0, 4, 7)).unwrap();
        assert_eq!(batch.dims(), (0, 4, 7));
    }

    #[test]
    fn frame_argmax_vocab_time() {
        let batch = ScoreBatch::new(&VOCAB_TIME, (1, 3, 2)).unwrap();
        assert_eq!(batch.score(0, 1, 0), 0.7);
        assert_eq!(batch.frame_argmax(0, 0), 1);
        assert_eq!(batch.frame_argmax(0, 1), 0);
    }

    #[test]
    fn frame_argmax_time_vocab_matches_transposed_input() {
        // Same scores as VOCAB_TIME, stored (B=1, T=2, V=3).
        let data = [0.1f32, 0.7, 0.2, 0.6, 0.3, 0.1];
        let batch = ScoreBatch::time_major(&data, (1, 2, 3)).unwrap();
        assert_eq!(batch.dims(), (1, 3, 2));
        assert_eq!(batch.score(0, 1, 0), 0.7);
        assert_eq!(batch.frame_argmax(0, 0), 1);
        assert_eq!(batch.frame_argmax(0, 1), 0);
    }

    #[test]
    fn frame_argmax_ties_pick_lowest_index() {
        let data = [0.5f32, 0.5, 0.5];
        let batch = ScoreBatch::time_major(&data, (1, 1, 3)).unwrap();
        assert_eq!(batch.frame_argmax(0, 0), 0);
    }

    #[test]
    fn frame_argmax_skips_nan() {
        let data = [f32::NAN, 0.2, 0.9, f32::NAN];
        let batch = ScoreBatch::time_major(&data, (1, 1, 4)).unwrap();
        assert_eq!(batch.frame_argmax(0, 0), 0);
        let data = [0.1f32, f32::NAN, 0.9, 0.3];
        let batch = ScoreBatch::time_major(&data, (1, 1, 4)).unwrap();
        assert_eq!(batch.frame_argmax(0, 0), 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn frame_argmax_rejects_frame_past_max_time() {
        // Frame 2 would alias symbol 1 of frame 0 in this layout.
        let batch = ScoreBatch::new(&VOCAB_TIME, (1, 3, 2)).unwrap();
        batch.frame_argmax(0, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn frame_argmax_rejects_example_past_batch() {
        let batch = ScoreBatch::new(&VOCAB_TIME, (1, 3, 2)).unwrap();
        batch.frame_argmax(1, 0);
    }

    #[test]
    fn frame_argmax_nan_at_index_zero_is_kept() {
        let data = [f32::NAN, 0.9, 0.2];
        let batch = ScoreBatch::time_major(&data, (1, 1, 3)).unwrap();
        assert_eq!(batch.frame_argmax(0, 0), 0);
    }

    #[test]
    fn symbol_conversions() {
        assert_eq!(u8::from_index(255), Some(255u8));
        assert_eq!(u8::from_index(256), None);
        assert_eq!(i32::from_index(7), Some(7i32));
        assert_eq!((-1i64).to_index(), None);
        assert_eq!(3u16.to_index(), Some(3));
    }

    #[test]
    fn layout_deserializes_snake_case() {
        let layout: ScoreLayout = serde_json::from_str("\"time_vocab\"").unwrap();
        assert_eq!(layout, ScoreLayout::TimeVocab);
        assert_eq!(ScoreLayout::default(), ScoreLayout::VocabTime);
    }
}
