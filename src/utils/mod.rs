pub mod logging;
pub mod speech_metrics;

pub use logging::truncate_text;
pub use speech_metrics::calculate_speaking_rate;
