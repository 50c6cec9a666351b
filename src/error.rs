use std::io;

/// Errors surfaced by the engine.
///
/// A move that has no effect on the board is not an error: `Board::make_move`
/// reports it as `Ok(false)`.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no empty cell available for a random tile")]
    NoEmptyCell,
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self { EngineError::Config(e.to_string()) }
}
