use crate::decoding::collapse::filter_ctc_output;
use crate::decoding::greedy::greedy_path;
use crate::pipeline::traits::{FrameSelector, OutputFilter};
use crate::types::ScoreBatch;

pub struct ArgMaxSelector;

impl FrameSelector for ArgMaxSelector {
    fn select_path(
        &self,
        scores: &ScoreBatch<'_, f32>,
        example: usize,
        frames: usize,
    ) -> Vec<usize> {
        greedy_path(scores, example, frames)
    }
}

pub struct CtcCollapseFilter;

impl OutputFilter for CtcCollapseFilter {
    fn filter(&self, path: &[usize], blank_id: usize) -> Vec<usize> {
        filter_ctc_output(path, &blank_id)
    }
}
