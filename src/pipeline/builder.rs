use std::path::Path;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::pipeline::defaults::{ArgMaxSelector, CtcCollapseFilter};
use crate::pipeline::runtime::{CtcDecoder, CtcDecoderParts};
use crate::pipeline::traits::{FrameSelector, OutputFilter};

pub struct CtcDecoderBuilder {
    config: DecoderConfig,
    frame_selector: Option<Box<dyn FrameSelector>>,
    output_filter: Option<Box<dyn OutputFilter>>,
}

impl CtcDecoderBuilder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            frame_selector: None,
            output_filter: None,
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, DecodeError> {
        Ok(Self::new(DecoderConfig::load(path)?))
    }

    pub fn with_frame_selector(mut self, frame_selector: Box<dyn FrameSelector>) -> Self {
        self.frame_selector = Some(frame_selector);
        self
    }

    pub fn with_output_filter(mut self, output_filter: Box<dyn OutputFilter>) -> Self {
        self.output_filter = Some(output_filter);
        self
    }

    pub fn build(self) -> CtcDecoder {
        tracing::info!(
            blank_id = self.config.blank_id,
            layout = self.config.layout.as_str(),
            length_policy = self.config.length_policy.as_str(),
            custom_selector = self.frame_selector.is_some(),
            custom_filter = self.output_filter.is_some(),
            "ctc greedy decoder ready"
        );

        CtcDecoder::from_parts(CtcDecoderParts {
            blank_id: self.config.blank_id,
            layout: self.config.layout,
            length_policy: self.config.length_policy,
            frame_selector: self
                .frame_selector
                .unwrap_or_else(|| Box::new(ArgMaxSelector)),
            output_filter: self
                .output_filter
                .unwrap_or_else(|| Box::new(CtcCollapseFilter)),
        })
    }
}
