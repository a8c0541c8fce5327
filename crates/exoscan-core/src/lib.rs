pub mod broadcast;
pub mod cancel;
pub mod dataset;
pub mod pipeline;
pub mod scorer;

pub use broadcast::{ListenerId, ListenerRegistry};
pub use cancel::CancelToken;
pub use dataset::{DatasetOptions, DatasetSummary, build_dataset};
pub use pipeline::{BatchOutcome, Pipeline, PipelineOptions};
pub use scorer::{LinearScorer, Scorer};
