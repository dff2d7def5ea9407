use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("label table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("training failed: {0}")]
    Training(String),

    #[error("nearest-neighbour search failed: {0}")]
    NeighbourSearch(String),

    #[error("empty {0} set")]
    EmptySet(&'static str),

    #[error("{predictions} predictions for {test} test records")]
    PredictionMismatch { predictions: usize, test: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
