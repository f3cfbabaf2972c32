pub mod config;
pub mod decoding;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::{DecoderConfig, LengthPolicy};
pub use decoding::{
    ctc_greedy_decode, ctc_greedy_decode_tensor, filter_ctc_output, filter_ctc_tensor,
};
pub use error::DecodeError;
pub use pipeline::builder::CtcDecoderBuilder;
pub use pipeline::runtime::CtcDecoder;
pub use pipeline::traits::{FrameSelector, OutputFilter};
pub use types::{DecodeOutput, ScoreBatch, ScoreLayout, Symbol};
