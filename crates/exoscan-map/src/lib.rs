pub mod normalize;
pub mod rules;
pub mod validate;

pub use normalize::{ColumnMap, map_columns, normalize};
pub use rules::{FIELD_RULES, match_field};
pub use validate::{Filtered, ValidateOptions, validate};
