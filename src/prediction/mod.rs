mod coerce;
mod pipeline;
pub mod validator;

pub use coerce::coerce;
pub use pipeline::{PredictionPipeline, round_price};
