pub type GlitchResult<T> = Result<T, GlitchError>;

#[derive(thiserror::Error, Debug)]
pub enum GlitchError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Every pixel of the glitched raster is transparent black (R=G=B=A=0).
    #[error("glitched image is completely black")]
    AllBlack,

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlitchError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn unsupported_format(ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat(ext.into())
    }

    pub fn is_all_black(&self) -> bool {
        matches!(self, Self::AllBlack)
    }
}
