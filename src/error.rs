pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building a problem or manipulating solver state.
///
/// Structural errors (duplicate names, unknown variables, malformed
/// input) are fatal at build time. The remaining variants guard misuse
/// of reversible state and are converted into an `Error`-status result
/// if they ever escape a solve.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("constraint references variable index {index} but the problem has {num_variables} variables")]
    VariableOutOfRange { index: usize, num_variables: usize },

    #[error("{coefficients} coefficients for {variables} variables")]
    CoefficientMismatch {
        coefficients: usize,
        variables: usize,
    },

    #[error("value not in the domain universe")]
    ValueNotInUniverse,

    #[error("no checkpoint to roll back to")]
    NoCheckpoint,

    #[error("invalid problem input: {0}")]
    InvalidInput(String),
}
