use crate::config::LengthPolicy;
use crate::error::DecodeError;

/// Number of real frames for one example.
///
/// `round(relative_length * max_time)` is evaluated in `f32` and rounds half
/// to even, so `0.25 * 2` keeps 0 frames and `0.75 * 2` keeps 2.
pub fn actual_length(
    example: usize,
    relative_length: f32,
    max_time: usize,
    policy: LengthPolicy,
) -> Result<usize, DecodeError> {
    if relative_length.is_nan() {
        return Err(DecodeError::out_of_range(example, relative_length));
    }
    let relative = if relative_length > 0.0 && relative_length <= 1.0 {
        relative_length
    } else {
        match policy {
            LengthPolicy::Reject => {
                return Err(DecodeError::out_of_range(example, relative_length));
            }
            LengthPolicy::Clamp => {
                let clamped = relative_length.clamp(0.0, 1.0);
                tracing::warn!(
                    example,
                    relative_length,
                    clamped,
                    "relative length outside (0, 1]; clamping"
                );
                clamped
            }
        }
    };
    let frames = (relative * max_time as f32).round_ties_even() as usize;
    Ok(frames.min(max_time))
}

/// Resolve every example's frame count before any decoding starts.
pub(crate) fn resolve_lengths(
    relative_lengths: &[f32],
    batch_size: usize,
    max_time: usize,
    policy: LengthPolicy,
) -> Result<Vec<usize>, DecodeError> {
    if relative_lengths.len() != batch_size {
        return Err(DecodeError::shape_mismatch(format!(
            "length vector has {} entries for a batch of {batch_size}",
            relative_lengths.len()
        )));
    }
    if batch_size > 0 && !relative_lengths.iter().any(|&l| l == 1.0) {
        tracing::warn!(
            batch_size,
            "no example has relative length 1.0; lengths may not be relative to this batch"
        );
    }
    relative_lengths
        .iter()
        .enumerate()
        .map(|(example, &relative)| actual_length(example, relative, max_time, policy))
        .collect()
}
