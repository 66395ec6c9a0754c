use thiserror::Error;

#[derive(Error, Debug)]
pub enum MindMapError {
    #[error("关键词不能为空")]
    EmptyKeyword,

    #[error("Failed to read corpus file: {0}")]
    CorpusIo(#[from] std::io::Error),

    #[error("Failed to parse corpus file: {0}")]
    CorpusParse(#[from] serde_json::Error),

    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),
}

pub type Result<T> = std::result::Result<T, MindMapError>;
