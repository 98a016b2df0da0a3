use rand::Rng;

use crate::coords::GridPos;
use crate::grid::Grid;

/// Samples random cells until one is a road cell other than `exclude`.
///
/// Returns `None` only when no such cell exists at all; otherwise the loop is
/// unbounded and terminates with probability one.
pub fn place_on_road<R: Rng + ?Sized>(
    grid: &Grid,
    exclude: Option<GridPos>,
    rng: &mut R,
) -> Option<GridPos> {
    let eligible = grid.road_cells().any(|p| Some(p) != exclude);
    if !eligible {
        return None;
    }
    loop {
        let p = grid.random_cell(rng);
        if grid.is_road(p) && Some(p) != exclude {
            return Some(p);
        }
    }
}

/// Index into `grid.places()` of a uniformly chosen destination.
pub fn pick_destination<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<usize> {
    match grid.places().len() {
        0 => None,
        n => Some(rng.gen_range(0..n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{PlaceKind, RoadStyle};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn lands_on_road() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = Grid::new(5, 5);
        g.pave(GridPos::new(2, 3), RoadStyle::Road);
        for _ in 0..10 {
            assert_eq!(place_on_road(&g, None, &mut rng), Some(GridPos::new(2, 3)));
        }
    }

    #[test]
    fn honours_exclusion() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut g = Grid::new(4, 1);
        g.pave(GridPos::new(0, 0), RoadStyle::Road);
        g.pave(GridPos::new(3, 0), RoadStyle::Road);
        for _ in 0..20 {
            let p = place_on_road(&g, Some(GridPos::new(0, 0)), &mut rng);
            assert_eq!(p, Some(GridPos::new(3, 0)));
        }
    }

    #[test]
    fn no_road_means_no_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = Grid::new(3, 3);
        assert_eq!(place_on_road(&g, None, &mut rng), None);
        g.pave(GridPos::new(1, 1), RoadStyle::Road);
        assert_eq!(place_on_road(&g, Some(GridPos::new(1, 1)), &mut rng), None);
    }

    #[test]
    fn destination_comes_from_places() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut g = Grid::new(3, 1);
        assert_eq!(pick_destination(&g, &mut rng), None);
        g.pave(GridPos::new(0, 0), RoadStyle::Road);
        g.pave(GridPos::new(2, 0), RoadStyle::Road);
        g.add_place(PlaceKind::Park, GridPos::new(0, 0));
        g.add_place(PlaceKind::Mall, GridPos::new(2, 0));
        for _ in 0..20 {
            let i = pick_destination(&g, &mut rng).unwrap();
            assert!(i < 2);
        }
    }
}
