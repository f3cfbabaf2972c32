use crate::config::LengthPolicy;
use crate::decoding::collapse::filter_ctc_output;
use crate::decoding::length::resolve_lengths;
use crate::error::DecodeError;
use crate::types::{DecodeOutput, ScoreBatch, Symbol};

/// Greedy-decode a padded batch and apply the CTC rules to every example.
///
/// `relative_lengths` holds one value in `(0, 1]` per example; the longest
/// example has 1.0. The result is ragged: padding has been removed and each
/// example keeps its own length.
pub fn ctc_greedy_decode<F, S>(
    scores: &ScoreBatch<'_, F>,
    relative_lengths: &[f32],
    blank_id: S,
) -> Result<Vec<Vec<S>>, DecodeError>
where
    F: PartialOrd + Copy,
    S: Symbol,
{
    // A blank with no vocabulary index (e.g. -1) can never be emitted.
    let blank_index = blank_id.to_index().unwrap_or(scores.vocab_size());
    let output = decode_with::<F, S>(
        scores,
        relative_lengths,
        blank_index,
        LengthPolicy::Reject,
        |example, frames| greedy_path(scores, example, frames),
        |path| filter_ctc_output(path, &blank_index),
    )?;
    Ok(output.sequences)
}

/// Arg-max index of each of the first `frames` frames of one example.
///
/// Panics if `example` is out of bounds or `frames` exceeds the time extent.
pub fn greedy_path<F: PartialOrd + Copy>(
    scores: &ScoreBatch<'_, F>,
    example: usize,
    frames: usize,
) -> Vec<usize> {
    assert!(
        frames <= scores.max_time(),
        "{frames} frames requested from a time extent of {}",
        scores.max_time()
    );
    (0..frames)
        .map(|frame| scores.frame_argmax(example, frame))
        .collect()
}

/// Shared batch loop: resolve lengths, select a path per example, check it,
/// collapse it, and convert the survivors to `S`.
pub(crate) fn decode_with<F, S>(
    scores: &ScoreBatch<'_, F>,
    relative_lengths: &[f32],
    blank_index: usize,
    policy: LengthPolicy,
    select: impl Fn(usize, usize) -> Vec<usize>,
    filter: impl Fn(&[usize]) -> Vec<usize>,
) -> Result<DecodeOutput<S>, DecodeError>
where
    F: PartialOrd + Copy,
    S: Symbol,
{
    let (batch_size, vocab_size, max_time) = scores.dims();
    tracing::debug!(
        batch_size,
        vocab_size,
        max_time,
        layout = scores.layout().as_str(),
        "ctc: decoding batch"
    );

    let actual_lengths = resolve_lengths(relative_lengths, batch_size, max_time, policy)?;
    check_symbol_range::<S>(vocab_size, blank_index)?;

    let mut sequences = Vec::with_capacity(batch_size);
    for (example, &frames) in actual_lengths.iter().enumerate() {
        let path = select(example, frames);
        check_path(&path, example, frames, vocab_size)?;
        let collapsed = filter(&path);
        tracing::debug!(
            example,
            relative_length = relative_lengths[example],
            frames,
            decoded_len = collapsed.len(),
            "ctc: example decoded"
        );
        sequences.push(to_symbols::<S>(&collapsed)?);
    }

    Ok(DecodeOutput {
        sequences,
        actual_lengths,
    })
}

fn check_path(
    path: &[usize],
    example: usize,
    frames: usize,
    vocab_size: usize,
) -> Result<(), DecodeError> {
    if path.len() != frames {
        return Err(DecodeError::shape_mismatch(format!(
            "frame selector returned {} indices for {frames} frames of example {example}",
            path.len()
        )));
    }
    if let Some(&index) = path.iter().find(|&&index| index >= vocab_size) {
        return Err(DecodeError::shape_mismatch(format!(
            "frame selector returned index {index} for example {example}, outside a vocabulary of {vocab_size}"
        )));
    }
    Ok(())
}

/// Every vocabulary index must be representable as `S`.
fn check_symbol_range<S: Symbol>(vocab_size: usize, blank_index: usize) -> Result<(), DecodeError> {
    if vocab_size > 0 && S::from_index(vocab_size - 1).is_none() {
        return Err(DecodeError::shape_mismatch(format!(
            "vocabulary of {vocab_size} symbols does not fit in {}",
            std::any::type_name::<S>()
        )));
    }
    if blank_index >= vocab_size {
        tracing::warn!(
            blank_index,
            vocab_size,
            "blank id is outside the vocabulary and will never be selected"
        );
    }
    Ok(())
}

fn to_symbols<S: Symbol>(path: &[usize]) -> Result<Vec<S>, DecodeError> {
    path.iter()
        .map(|&index| {
            S::from_index(index).ok_or_else(|| {
                DecodeError::shape_mismatch(format!(
                    "vocabulary index {index} does not fit in {}",
                    std::any::type_name::<S>()
                ))
            })
        })
        .collect()
}
