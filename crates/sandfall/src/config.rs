//! Board configuration and its line-oriented text form.
//!
//! ```text
//! 10 10        width height
//! r            wall, followed by its corners
//! 1 1 4 4
//! s            inlet, followed by its position; ends the configuration
//! 5 9
//! ```

use std::str::FromStr;

use crate::error::GridError;
use crate::Grid;

/// Inclusive wall rectangle; corners may be in any order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WallRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub walls: Vec<WallRect>,
    pub inlet: (i32, i32),
}

impl BoardConfig {
    /// Creates the grid, then places walls in order and finally the inlet.
    ///
    /// # Errors
    ///
    /// Whatever [`Grid::new`], [`Grid::set_wall_rect`] or [`Grid::set_inlet`]
    /// reports for these values.
    pub fn build(&self) -> Result<Grid, GridError> {
        let mut grid = Grid::new(self.width, self.height)?;
        for wall in &self.walls {
            grid.set_wall_rect(wall.x0, wall.y0, wall.x1, wall.y1)?;
        }
        grid.set_inlet(self.inlet.0, self.inlet.1)?;
        Ok(grid)
    }

    /// Reads the text form. Bounds are checked here so a bad coordinate is
    /// reported before any grid exists.
    ///
    /// # Errors
    ///
    /// [`GridError::Config`] for malformed text, unknown commands, wrong
    /// parameter counts, bad dimensions or a missing inlet;
    /// [`GridError::OutOfBounds`] for coordinates off the board.
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

        let dims = lines
            .next()
            .ok_or_else(|| GridError::Config("missing board dimensions".into()))?;
        let [width, height] = numbers::<2>(dims, "board dimensions")?;
        let (width, height) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(GridError::Config(format!(
                    "board dimensions must be positive, got {width} {height}"
                )))
            }
        };
        // Validates the size before any coordinate is checked against it.
        Grid::new(width, height)?;

        let check = |x: i32, y: i32| {
            if x >= 0 && (x as usize) < width && y >= 0 && (y as usize) < height {
                Ok(())
            } else {
                Err(GridError::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                })
            }
        };

        let mut walls = Vec::new();
        while let Some(command) = lines.next() {
            match command {
                "r" => {
                    let params = parameters(&mut lines, command)?;
                    let [x0, y0, x1, y1] = numbers::<4>(params, "wall parameters")?;
                    check(x0, y0)?;
                    check(x1, y1)?;
                    walls.push(WallRect { x0, y0, x1, y1 });
                }
                "s" => {
                    let params = parameters(&mut lines, command)?;
                    let [x, y] = numbers::<2>(params, "inlet parameters")?;
                    check(x, y)?;
                    log::debug!("read {width}x{height} board, {} walls", walls.len());
                    return Ok(Self {
                        width,
                        height,
                        walls,
                        inlet: (x, y),
                    });
                }
                other => return Err(GridError::Config(format!("unknown command {other:?}"))),
            }
        }
        Err(GridError::Config("missing inlet".into()))
    }
}

impl FromStr for BoardConfig {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The line following a command.
fn parameters<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    command: &str,
) -> Result<&'a str, GridError> {
    lines
        .next()
        .ok_or_else(|| GridError::Config(format!("command {command:?} has no parameters")))
}

/// Parses exactly `N` whitespace-separated integers.
fn numbers<const N: usize>(line: &str, what: &str) -> Result<[i32; N], GridError> {
    let values = line
        .split_whitespace()
        .map(str::parse::<i32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| GridError::Config(format!("{what}: {e} in {line:?}")))?;
    let count = values.len();
    values
        .try_into()
        .map_err(|_| GridError::Config(format!("{what} must consist of {N} integers, got {count}")))
}
