use std::fmt;

use floodpath_core::GridError;

use crate::session::SessionState;

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The session is not in a state that accepts this operation.
    EditRejected { state: SessionState },
    Grid(GridError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditRejected { state } => write!(f, "edit rejected: session is {state}"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::EditRejected { .. } => None,
        }
    }
}

impl From<GridError> for EngineError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodpath_core::Position;

    #[test]
    fn messages() {
        let e = EngineError::EditRejected {
            state: SessionState::Busy,
        };
        assert_eq!(e.to_string(), "edit rejected: session is busy");

        let e: EngineError = GridError::OutOfBounds {
            pos: Position::new(9, 9),
            width: 5,
            height: 5,
        }
        .into();
        assert!(e.to_string().starts_with("grid error: "));
        assert!(std::error::Error::source(&e).is_some());
    }
}
