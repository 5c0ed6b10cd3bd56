use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("maze of {width}x{height} cells does not fit in memory")]
    TooLarge { width: usize, height: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("maze width and height must be non-zero")]
    ZeroMazeDimension,

    #[error("field of view must be between 0 and 180 degrees, got {0}")]
    FieldOfView(f32),

    #[error("render height must be at least {min}, got {actual}")]
    RenderHeight { min: usize, actual: usize },
}
