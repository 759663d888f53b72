//! Errors raised while configuring a grid.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Dimensions out of range, malformed parameters or a missing inlet.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Carries the position of the inlet that is already placed.
    #[error("an inlet already exists at ({x}, {y})")]
    DuplicateInlet { x: i32, y: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = GridError::OutOfBounds {
            x: 7,
            y: -1,
            width: 5,
            height: 6,
        };
        assert_eq!(err.to_string(), "coordinate (7, -1) is outside the 5x6 grid");
        assert_eq!(
            GridError::DuplicateInlet { x: 2, y: 4 }.to_string(),
            "an inlet already exists at (2, 4)"
        );
        assert_eq!(
            GridError::Config("missing inlet".into()).to_string(),
            "invalid configuration: missing inlet"
        );
    }
}
