//! Granular sand settling on a bounded 2D grid.
//!
//! A [`Grid`] holds the board; a [`settler::Settler`] drops one particle at a
//! time from the inlet and lets it fall until it rests.

pub mod cell;
pub mod config;
pub mod error;
pub mod settler;

#[cfg(test)]
mod settling_scenarios;

use std::fmt;

use cell::Cell;
use error::GridError;
use wasm_bindgen::prelude::*;

/// Smallest allowed width or height.
pub const MIN_SIZE: usize = 5;
/// Largest allowed width or height.
pub const MAX_SIZE: usize = 100;

/// Grid coordinate. Origin is bottom-left, `y` grows upward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size board of cells, stored row by row from `y = 0` upward.
/// Every coordinate-taking operation reports out-of-range access as an error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    inlet: Option<Pos>,
}

impl Grid {
    /// Creates an all-Air grid. Both dimensions must lie in
    /// [`MIN_SIZE`]..=[`MAX_SIZE`].
    ///
    /// # Errors
    ///
    /// [`GridError::Config`] for dimensions outside that range.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let valid = MIN_SIZE..=MAX_SIZE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(GridError::Config(format!(
                "width and height must be between {MIN_SIZE} and {MAX_SIZE} (inclusive), got {width}x{height}"
            )));
        }
        log::debug!("created {width}x{height} grid");
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Air; width * height],
            inlet: None,
        })
    }

    /// Builds a grid from glyph rows, topmost row first. Inverse of [`Grid::render`].
    ///
    /// Sand is accepted only where it is already at rest, so a drawn board is
    /// always one the settler could have produced.
    ///
    /// # Errors
    ///
    /// [`GridError::Config`] for bad dimensions, ragged rows, unknown glyphs or
    /// sand that could still fall; [`GridError::DuplicateInlet`] for a second `+`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut grid = Self::new(width, height)?;
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(GridError::Config(format!(
                    "row {row_idx} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            let y = (height - 1 - row_idx) as i32;
            for (x, glyph) in row.chars().enumerate() {
                let x = x as i32;
                match Cell::from_glyph(glyph) {
                    Some(Cell::Inlet) => grid.set_inlet(x, y)?,
                    Some(cell) => {
                        let idx = grid.index(x, y)?;
                        grid.cells[idx] = cell;
                    }
                    None => {
                        return Err(GridError::Config(format!(
                            "unknown glyph {glyph:?} at ({x}, {y})"
                        )))
                    }
                }
            }
        }
        for (idx, cell) in grid.cells.iter().enumerate() {
            if *cell != Cell::Sand {
                continue;
            }
            let at = Pos::new((idx % width) as i32, (idx / width) as i32);
            if settler::find_landing(&grid, at)?.is_some() {
                return Err(GridError::Config(format!("sand at {at} is not at rest")));
            }
        }
        Ok(grid)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn inlet(&self) -> Option<Pos> {
        self.inlet
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `(x, y)` is not on the grid.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Marks the inclusive rectangle spanned by the two corners as Wall.
    ///
    /// Corners may be given in any order. The inlet cell is never overwritten.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either corner is off the grid; nothing is
    /// written in that case.
    pub fn set_wall_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), GridError> {
        self.index(x0, y0)?;
        self.index(x1, y1)?;
        let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
        let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));
        for y in lo_y..=hi_y {
            for x in lo_x..=hi_x {
                if self.inlet == Some(Pos::new(x, y)) {
                    continue;
                }
                let idx = self.index(x, y)?;
                self.cells[idx] = Cell::Wall;
            }
        }
        log::debug!("wall from ({lo_x}, {lo_y}) to ({hi_x}, {hi_y})");
        Ok(())
    }

    /// Places the single inlet.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] for an off-grid position,
    /// [`GridError::DuplicateInlet`] if an inlet already exists.
    pub fn set_inlet(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        if let Some(existing) = self.inlet {
            return Err(GridError::DuplicateInlet {
                x: existing.x,
                y: existing.y,
            });
        }
        self.cells[idx] = Cell::Inlet;
        self.inlet = Some(Pos::new(x, y));
        log::debug!("inlet at ({x}, {y})");
        Ok(())
    }

    /// Exchanges the contents of two cells in one operation.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either position is off the grid.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        let ia = self.index(a.x, a.y)?;
        let ib = self.index(b.x, b.y)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Writes sand into an Air cell. Used when a particle spawns.
    pub(crate) fn place_sand(&mut self, at: Pos) -> Result<(), GridError> {
        let idx = self.index(at.x, at.y)?;
        debug_assert!(self.cells[idx].is_air(), "sand placed over {:?}", self.cells[idx]);
        self.cells[idx] = Cell::Sand;
        Ok(())
    }

    /// Number of cells of the given kind.
    #[must_use]
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Glyph rows from the top (`y = height - 1`) down to `y = 0`.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .rev()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }

    /// [`Grid::render`] joined with newlines.
    #[must_use]
    pub fn render_string(&self) -> String {
        self.render().join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_string())
    }
}

/// JS-facing wrapper owning one grid and its placed-particle count.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: Grid,
    placed: u32,
}

#[wasm_bindgen]
impl Universe {
    /// # Errors
    ///
    /// Fails when either dimension is outside the allowed range.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> Result<Universe, JsError> {
        let grid = Grid::new(width, height).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { grid, placed: 0 })
    }

    /// # Errors
    ///
    /// Fails when a corner is off the grid.
    pub fn add_wall(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), JsError> {
        self.grid
            .set_wall_rect(x0, y0, x1, y1)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// # Errors
    ///
    /// Fails for an off-grid position or a second inlet.
    pub fn set_inlet(&mut self, x: i32, y: i32) -> Result<(), JsError> {
        self.grid
            .set_inlet(x, y)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Drops and settles one particle.
    pub fn step(&mut self) -> bool {
        let placed = settler::Settler::new(&mut self.grid).step();
        if placed {
            self.placed += 1;
        }
        placed
    }

    /// Steps until saturation or until `budget` steps have run. Returns the
    /// number of particles placed by this call.
    pub fn run(&mut self, budget: Option<u32>) -> u32 {
        let summary = settler::run(&mut self.grid, budget.map(|b| b as usize));
        let placed = summary.placed as u32;
        self.placed += placed;
        placed
    }

    #[must_use]
    pub fn placed(&self) -> u32 {
        self.placed
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.grid.render_string()
    }
}
