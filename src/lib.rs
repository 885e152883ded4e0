pub mod error;
pub mod filters;
pub mod loader;
pub mod pipeline;
pub mod sampling;
pub mod types;
pub mod zero_phase;

pub use error::{BiosigError, Result};
pub use loader::{load_csv, load_csv_with, LoaderOptions};
pub use pipeline::condition;
pub use sampling::estimate_sampling_rate;
pub use types::*;
