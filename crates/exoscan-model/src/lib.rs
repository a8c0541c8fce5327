pub mod candidate;
pub mod curve;
pub mod error;
pub mod features;
pub mod field;
pub mod record;

pub use candidate::Candidate;
pub use curve::LightCurve;
pub use error::{
    CurveError, IngestError, PredictError, Result, RowError, SchemaError, ScoreError,
    StrategyError,
};
pub use features::{FEATURE_LEN, catalog_features};
pub use field::{CanonicalField, NUMERIC_FIELDS, field_default};
pub use record::PredictionRecord;
