//! Regression tests: whole runs on hand-drawn boards.

#[cfg(test)]
mod tests {
    use crate::cell::Cell;
    use crate::config::BoardConfig;
    use crate::settler::tests::is_stable;
    use crate::settler::{run, Settler, StopReason};
    use crate::Grid;

    /// Helper: print the board for debugging a failed comparison.
    fn dump(grid: &Grid) {
        for (row_idx, row) in grid.render().iter().enumerate() {
            eprintln!("y={:2}: {}", grid.height() - 1 - row_idx, row);
        }
    }

    #[test]
    fn empty_5x5_fills_to_a_flat_topped_pile() {
        let mut grid = Grid::from_rows(&["..+..", ".....", ".....", ".....", "....."]).unwrap();

        let mut settler = Settler::new(&mut grid);
        assert!(settler.step());
        assert_eq!(settler.grid().cell_at(2, 0), Ok(Cell::Sand));
        assert_eq!(settler.grid().count(Cell::Sand), 1);

        let summary = run(&mut grid, None);
        dump(&grid);
        assert_eq!(summary.stop, StopReason::Saturated);
        assert_eq!(summary.placed, 17);
        assert_eq!(
            grid.render(),
            vec!["..+..", ".ooo.", "ooooo", "ooooo", "ooooo"]
        );
    }

    #[test]
    fn floor_fills_right_before_left() {
        let mut grid = Grid::from_rows(&["..+..", ".....", ".....", ".....", "....."]).unwrap();
        run(&mut grid, Some(3));
        dump(&grid);
        assert_eq!(grid.render()[4], ".ooo.");

        let mut grid = Grid::from_rows(&["..+..", ".....", ".....", ".....", "....."]).unwrap();
        run(&mut grid, Some(2));
        assert_eq!(grid.render()[4], "..oo.");
    }

    #[test]
    fn full_width_wall_holds_every_particle() {
        let config = BoardConfig::parse("8 8\nr\n0 3 7 3\ns\n4 7").unwrap();
        let mut grid = config.build().unwrap();
        let summary = run(&mut grid, None);
        dump(&grid);
        assert_eq!(summary.stop, StopReason::Saturated);
        for y in 0..=3 {
            for x in 0..8 {
                assert_ne!(grid.cell_at(x, y), Ok(Cell::Sand), "sand below wall at ({x}, {y})");
            }
        }
        assert_eq!(grid.count(Cell::Sand), summary.placed);
        assert!(is_stable(&grid));
    }

    #[test]
    fn sand_spills_off_a_ledge() {
        let mut grid = Grid::from_rows(&[
            "..+....", //
            ".......", //
            ".......", //
            ".###...", //
            ".......", //
            ".......", //
        ])
        .unwrap();
        let summary = run(&mut grid, None);
        dump(&grid);
        assert_eq!(summary.stop, StopReason::Saturated);
        assert!(is_stable(&grid));
        // Only ledge cells sit above the middle of the ledge.
        assert_eq!(grid.cell_at(2, 1), Ok(Cell::Air));
        assert_eq!(grid.cell_at(2, 3), Ok(Cell::Sand));
        // Spill-over from the right edge of the ledge reaches the floor.
        assert_eq!(grid.cell_at(4, 0), Ok(Cell::Sand));
    }

    #[test]
    fn inlet_in_a_cup_saturates_immediately() {
        let mut grid = Grid::from_rows(&[
            ".....", //
            ".....", //
            "..+..", //
            ".###.", //
            ".....", //
        ])
        .unwrap();
        let summary = run(&mut grid, Some(10));
        assert_eq!(summary.placed, 0);
        assert_eq!(summary.stop, StopReason::Saturated);
    }

    #[test]
    fn identical_configs_give_identical_boards() {
        let text = "12 9\nr\n2 2 5 2\nr\n9 0 9 4\ns\n6 8";
        let mut a = BoardConfig::parse(text).unwrap().build().unwrap();
        let mut b = BoardConfig::parse(text).unwrap().build().unwrap();
        assert_eq!(run(&mut a, None), run(&mut b, None));
        assert_eq!(a, b);
    }
}
