/// Key derivation errors.
///
/// Variants fall into three groups. Parameter errors are detected before
/// any allocation and are never retried automatically. Resource errors mean
/// the derivation could not obtain the memory it needs; the caller may retry
/// with smaller parameters. Provider errors indicate a broken hash provider
/// or runtime and are fatal.
#[derive(Debug, thiserror::Error)]
pub enum KdfError {
    // Parameter errors (detected before any allocation)
    #[error("cost parameter must be a power of two greater than one")]
    InvalidCostParameter,
    #[error("block size and parallelization parameters must be nonzero")]
    InvalidBlockParameter,
    #[error("r * p must be less than 2^30")]
    ParameterProductTooLarge,
    #[error("iteration count must be at least one")]
    InvalidIterationCount,
    #[error("unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),
    #[error("derived key length too large")]
    DerivedKeyTooLong,

    // Resource errors (caller may retry with smaller parameters)
    #[error("memory requirement is not representable on this platform")]
    MemoryRequirementOverflow,
    #[error("memory allocation failed")]
    MemAllocFail,

    // Provider errors (broken hash provider or runtime, fatal)
    #[error("hash provider failure: {0}")]
    ProviderFailure(&'static str),
}

impl KdfError {
    /// Whether this error was raised during parameter validation,
    /// before any allocation took place.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCostParameter
                | Self::InvalidBlockParameter
                | Self::ParameterProductTooLarge
                | Self::InvalidIterationCount
                | Self::UnknownHashAlgorithm(_)
                | Self::DerivedKeyTooLong
        )
    }
}
