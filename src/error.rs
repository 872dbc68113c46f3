/// All errors that the coordinate and camera core can produce.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A point, delta, or zoom level was NaN or infinite. The operation was not applied.
    #[error("invalid argument `{name}`: {value} is not finite")]
    InvalidArgument { name: &'static str, value: String },
    /// A tile kind outside of the tile sheet.
    #[error("invalid tile kind {0}, expected 0..=4")]
    InvalidTileKind(u8),
    /// Map dimensions that are zero, negative, or don't match the tile data.
    #[error("invalid map size: {0}")]
    MapSize(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Reject NaN and infinite values before they reach the camera state
pub(crate) fn ensure_finite(name: &'static str, values: &[f64]) -> CoreResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(CoreError::InvalidArgument { name, value: v.to_string() }),
        None => Ok(()),
    }
}
