use crate::types::ScoreBatch;

pub trait FrameSelector: Send + Sync {
    /// One vocabulary index for each of the first `frames` frames of `example`.
    fn select_path(&self, scores: &ScoreBatch<'_, f32>, example: usize, frames: usize)
        -> Vec<usize>;
}

pub trait OutputFilter: Send + Sync {
    fn filter(&self, path: &[usize], blank_id: usize) -> Vec<usize>;
}
