pub mod collapse;
pub mod greedy;
pub mod length;
pub mod tensor;

pub use collapse::filter_ctc_output;
pub use greedy::{ctc_greedy_decode, greedy_path};
pub use length::actual_length;
pub use tensor::{ctc_greedy_decode_tensor, filter_ctc_tensor, host_lengths, HostScores};
