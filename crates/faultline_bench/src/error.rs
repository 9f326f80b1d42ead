use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown gate type '{kind}' for net '{net}'")]
    UnknownGateType { net: String, kind: String },

    #[error("Circuit error: {0}")]
    Core(#[from] faultline_core::FaultlineError),
}

pub type Result<T> = std::result::Result<T, BenchError>;
