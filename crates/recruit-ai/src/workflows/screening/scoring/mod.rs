mod normalizer;
mod threshold;

pub use normalizer::normalize;
pub use threshold::{is_shortlisted, ShortlistThreshold, DEFAULT_SHORTLIST_THRESHOLD};
