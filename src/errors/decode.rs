use std::fmt;

/// Errors from the instruction/event decode path
/// All of these are caught at the transaction boundary and turned into
/// "no trade" rather than propagated.
#[derive(Debug, Clone)]
pub enum DecodeError {
    UnknownProgram,
    UnknownDiscriminator,
    MissingTokenAccountContext,
    DecodeFailure(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownProgram => write!(f, "unknown program"),
            DecodeError::UnknownDiscriminator => write!(f, "unknown instruction discriminator"),
            DecodeError::MissingTokenAccountContext => {
                write!(f, "missing token account context")
            }
            DecodeError::DecodeFailure(m) => write!(f, "decode failure: {}", m),
        }
    }
}

impl std::error::Error for DecodeError {}
