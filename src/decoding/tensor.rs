use candle_core::{DType, Tensor};

use crate::decoding::collapse::filter_ctc_output;
use crate::decoding::greedy::ctc_greedy_decode;
use crate::error::DecodeError;
use crate::types::{ScoreBatch, ScoreLayout, Symbol};

/// Host copy of a rank-3 score tensor, converted to `f32`.
#[derive(Debug, Clone)]
pub struct HostScores {
    pub data: Vec<f32>,
    /// Physical dimensions, in tensor order.
    pub dims: (usize, usize, usize),
}

impl HostScores {
    pub fn from_tensor(scores: &Tensor) -> Result<Self, DecodeError> {
        if scores.rank() != 3 {
            return Err(DecodeError::shape_mismatch(format!(
                "expected a rank-3 score tensor, got shape {:?}",
                scores.dims()
            )));
        }
        let dims = scores
            .dims3()
            .map_err(|e| DecodeError::tensor("score tensor dims3", e))?;
        let data = scores
            .to_dtype(DType::F32)
            .and_then(|t| t.flatten_all())
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| DecodeError::tensor("score tensor to host", e))?;
        Ok(Self { data, dims })
    }

    pub fn view(&self, layout: ScoreLayout) -> Result<ScoreBatch<'_, f32>, DecodeError> {
        ScoreBatch::from_layout(&self.data, self.dims, layout)
    }
}

/// Host copy of a rank-1 relative length tensor.
pub fn host_lengths(lengths: &Tensor) -> Result<Vec<f32>, DecodeError> {
    if lengths.rank() != 1 {
        return Err(DecodeError::shape_mismatch(format!(
            "expected a rank-1 length tensor, got shape {:?}",
            lengths.dims()
        )));
    }
    lengths
        .to_dtype(DType::F32)
        .and_then(|t| t.to_vec1::<f32>())
        .map_err(|e| DecodeError::tensor("length tensor to host", e))
}

/// [`ctc_greedy_decode`] over candle tensors laid out `(batch, vocab, time)`.
pub fn ctc_greedy_decode_tensor<S: Symbol>(
    scores: &Tensor,
    relative_lengths: &Tensor,
    blank_id: S,
) -> Result<Vec<Vec<S>>, DecodeError> {
    let host = HostScores::from_tensor(scores)?;
    let lengths = host_lengths(relative_lengths)?;
    ctc_greedy_decode(&host.view(ScoreLayout::VocabTime)?, &lengths, blank_id)
}

/// Collapse a rank-1 tensor of predicted ids, e.g. the result of
/// `Tensor::argmax` over the vocabulary axis.
pub fn filter_ctc_tensor<S: Symbol>(
    predictions: &Tensor,
    blank_id: S,
) -> Result<Vec<S>, DecodeError> {
    if predictions.rank() != 1 {
        return Err(DecodeError::invalid_argument(format!(
            "expected an ordered sequence, got a rank-{} tensor",
            predictions.rank()
        )));
    }
    let ids = prediction_ids(predictions)?;
    let symbols = ids
        .into_iter()
        .map(|id| {
            usize::try_from(id)
                .ok()
                .and_then(S::from_index)
                .ok_or_else(|| {
                    DecodeError::invalid_argument(format!(
                        "symbol id {id} is not a valid {}",
                        std::any::type_name::<S>()
                    ))
                })
        })
        .collect::<Result<Vec<S>, _>>()?;
    Ok(filter_ctc_output(&symbols, &blank_id))
}

fn prediction_ids(predictions: &Tensor) -> Result<Vec<i64>, DecodeError> {
    let ids = match predictions.dtype() {
        DType::U8 => predictions
            .to_vec1::<u8>()
            .map(|v| v.into_iter().map(i64::from).collect()),
        DType::U32 => predictions
            .to_vec1::<u32>()
            .map(|v| v.into_iter().map(i64::from).collect()),
        DType::I64 => predictions.to_vec1::<i64>(),
        other => {
            return Err(DecodeError::invalid_argument(format!(
                "expected integer symbol ids, got a {other:?} tensor"
            )));
        }
    };
    ids.map_err(|e| DecodeError::tensor("prediction tensor to host", e))
}
