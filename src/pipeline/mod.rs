pub mod orchestrator;
pub mod sink;

pub use orchestrator::ExtractionPipeline;
pub use sink::{CollectingSink, VariableSink};
