/// Convenience result type used across framestamp.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy.
///
/// `Config` and `Buffer` (and wrapped IO failures in `Other`) are fatal for a run.
/// `Color`, `Font` and `Draw` are scoped to a single overlay primitive: the renderer
/// records them and moves on to the next primitive.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// Malformed configuration document, missing field or invalid dimensions.
    #[error("config error: {0}")]
    Config(String),

    /// Unrecognized color specification.
    #[error("color error: {0}")]
    Color(String),

    /// Font file unreadable, unusable, or requested at an invalid size.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid drawing parameter for a single primitive.
    #[error("draw error: {0}")]
    Draw(String),

    /// Raw pixel buffer does not match the declared frame layout.
    #[error("buffer error: {0}")]
    Buffer(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StampError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`StampError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`StampError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`StampError::Buffer`] value.
    pub fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    /// Whether this error only invalidates the primitive being drawn.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Color(_) | Self::Font(_) | Self::Draw(_))
    }

    /// Process exit status for a fatal error.
    ///
    /// `Config` (malformed document, bad compact lists, zero dimensions) maps to 2, the
    /// same status clap uses for usage errors. Everything else maps to 1, including a raw
    /// frame whose length does not match the declared dimensions (`Buffer`).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
