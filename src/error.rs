/// Rejection reasons for a body handed to the registry.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidBodyError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("body radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("body state contains a non-finite value")]
    NonFinite,
}

pub type SimResult<T> = Result<T, InvalidBodyError>;
