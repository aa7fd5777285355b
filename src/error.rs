pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid frame range for '{name}': {start_frame} to {end_frame} with {num_frames} frames")]
    FrameRange {
        name: String,
        start_frame: i64,
        end_frame: i64,
        num_frames: usize,
    },

    #[error("stack underflow: pop without a matching push")]
    StackUnderflow,

    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("symbol '{name}' is not {expected}")]
    SymbolKind { name: String, expected: &'static str },

    #[error("{location} token not recognized: {token}")]
    Lex { location: String, token: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("display error: {0}")]
    Display(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl EngineError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn display(msg: impl ToString) -> Self {
        Self::Display(msg.to_string())
    }
}
