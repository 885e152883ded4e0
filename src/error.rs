use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiosigError {
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("at least 2 timestamps are required to estimate a sampling rate, got {count}")]
    InsufficientData { count: usize },

    #[error("degenerate sample timing: {0}")]
    DegenerateTiming(String),

    #[error("unsupported signal type '{0}' (expected 'ecg' or 'eeg')")]
    UnsupportedSignalType(String),

    #[error("invalid filter range: fs={fs} Hz, lowcut={lowcut} Hz, highcut={highcut} Hz")]
    InvalidFilterRange { fs: f64, lowcut: f64, highcut: f64 },

    #[error("signal too short for zero-phase filtering: {actual} samples, need at least {required}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BiosigError>;
