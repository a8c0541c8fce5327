pub mod detrend;
pub mod fold;
pub mod savgol;
pub(crate) mod stats;

pub use detrend::{DetrendOptions, detrend};
pub use fold::{FoldOptions, fold};
pub use savgol::savgol_filter;
