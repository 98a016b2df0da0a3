//! Procedural town generation.
//!
//! A map is built in three passes: a lattice of main roads plus random
//! full-span connectors, buildings scattered over the remaining grass, and
//! the difficulty's places dropped onto road cells. Both scatter passes are
//! bounded by attempt caps and may place fewer items than requested.
use rand::Rng;

use crate::config::{
    BUILDING_ATTEMPTS, Difficulty, DifficultySettings, GRID_SIZE, MAX_GENERATION_ROUNDS,
    PLACE_ATTEMPTS,
};
use crate::coords::GridPos;
use crate::grid::Grid;
use crate::tile::{BuildingKind, PlaceKind, RoadStyle};

/// Builds a standard-size map for `difficulty`.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Grid {
    generate_sized(GRID_SIZE, GRID_SIZE, difficulty, rng)
}

pub fn generate_sized<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    difficulty: Difficulty,
    rng: &mut R,
) -> Grid {
    let settings = difficulty.settings();
    let mut grid = Grid::new(width.max(1), height.max(1));
    lay_main_roads(&mut grid, settings.road_spacing, rng);
    lay_extra_roads(&mut grid, settings.extra_roads, rng);
    let buildings = scatter_buildings(&mut grid, settings.buildings, rng);
    let places = scatter_places(&mut grid, &settings, rng);
    log::debug!(
        "generated {:?} map: {} road cells, {}/{} buildings, {}/{} places",
        difficulty,
        grid.road_cells().count(),
        buildings,
        settings.buildings,
        places,
        settings.places
    );
    grid
}

/// Like [`generate`], but re-rolls until the road network is a single
/// component. After `MAX_GENERATION_ROUNDS` failures the last map is kept.
pub fn generate_connected<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Grid {
    let mut grid = generate(difficulty, rng);
    for round in 1..MAX_GENERATION_ROUNDS {
        if grid.is_road_network_connected() {
            log::debug!("connected road network after {} round(s)", round);
            return grid;
        }
        grid = generate(difficulty, rng);
    }
    if !grid.is_road_network_connected() {
        log::warn!(
            "road network still split after {} rounds, keeping last map",
            MAX_GENERATION_ROUNDS
        );
    }
    grid
}

fn lay_main_roads<R: Rng + ?Sized>(grid: &mut Grid, spacing: i32, rng: &mut R) {
    let spacing = spacing.max(1);
    let (w, h) = (grid.width(), grid.height());
    for x in (1..w).step_by(spacing as usize) {
        for y in 0..h {
            grid.pave(GridPos::new(x, y), RoadStyle::random(rng));
        }
    }
    for y in (1..h).step_by(spacing as usize) {
        for x in 0..w {
            grid.pave(GridPos::new(x, y), RoadStyle::random(rng));
        }
    }
}

fn lay_extra_roads<R: Rng + ?Sized>(grid: &mut Grid, count: u32, rng: &mut R) {
    let (w, h) = (grid.width(), grid.height());
    for _ in 0..count {
        if rng.gen_bool(0.5) {
            let y = rng.gen_range(0..h);
            for x in 0..w {
                grid.pave(GridPos::new(x, y), RoadStyle::DEFAULT);
            }
        } else {
            let x = rng.gen_range(0..w);
            for y in 0..h {
                grid.pave(GridPos::new(x, y), RoadStyle::DEFAULT);
            }
        }
    }
}

/// Returns how many buildings were placed.
fn scatter_buildings<R: Rng + ?Sized>(grid: &mut Grid, target: u32, rng: &mut R) -> u32 {
    let mut placed = 0;
    let mut attempts = 0;
    while placed < target && attempts < BUILDING_ATTEMPTS {
        let p = grid.random_cell(rng);
        let kind = BuildingKind::random(rng);
        if grid.add_building(kind, p) {
            placed += 1;
        }
        attempts += 1;
    }
    placed
}

/// Returns how many places were placed.
fn scatter_places<R: Rng + ?Sized>(
    grid: &mut Grid,
    settings: &DifficultySettings,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for kind in PlaceKind::CATALOG.iter().take(settings.places) {
        for _ in 0..PLACE_ATTEMPTS {
            let p = grid.random_cell(rng);
            if grid.add_place(*kind, p) {
                placed += 1;
                break;
            }
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn main_lattice_follows_spacing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = Grid::new(10, 10);
        lay_main_roads(&mut g, 3, &mut rng);
        for x in [1, 4, 7] {
            assert!((0..10).all(|y| g.is_road(GridPos::new(x, y))));
        }
        for y in [1, 4, 7] {
            assert!((0..10).all(|x| g.is_road(GridPos::new(x, y))));
        }
        assert!(!g.is_road(GridPos::new(0, 0)));
        assert!(!g.is_road(GridPos::new(2, 3)));
        assert!(g.road_cells().all(|p| g.cell(p).unwrap().road_style.is_some()));
    }

    #[test]
    fn extra_roads_use_default_style_on_new_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = Grid::new(10, 10);
        lay_extra_roads(&mut g, 1, &mut rng);
        assert_eq!(g.road_cells().count(), 10);
        assert!(
            g.road_cells()
                .all(|p| g.cell(p).unwrap().road_style == Some(RoadStyle::DEFAULT))
        );
    }

    #[test]
    fn building_scatter_stops_at_attempt_cap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = Grid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                g.pave(GridPos::new(x, y), RoadStyle::Road);
            }
        }
        assert_eq!(scatter_buildings(&mut g, 5, &mut rng), 0);
        assert!(g.buildings().is_empty());
    }

    #[test]
    fn place_scatter_tolerates_too_few_roads() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Grid::new(10, 10);
        g.pave(GridPos::new(5, 5), RoadStyle::Road);
        g.pave(GridPos::new(5, 6), RoadStyle::Road);
        let placed = scatter_places(&mut g, &Difficulty::Hard.settings(), &mut rng);
        assert!(placed <= 2);
        assert!(g.places().iter().all(|p| g.is_road(p.pos)));
    }

    #[test]
    fn generated_maps_respect_invariants() {
        for difficulty in Difficulty::ALL {
            for seed in 0..25 {
                let mut rng = StdRng::seed_from_u64(seed);
                let g = generate(difficulty, &mut rng);
                let s = difficulty.settings();
                assert_eq!(g.iter_cells().count(), (GRID_SIZE * GRID_SIZE) as usize);
                assert!(g.buildings().len() as u32 <= s.buildings);
                assert_eq!(g.buildings().len(), g.count(TileKind::Building));
                assert!(g.places().len() <= s.places);
                for (i, b) in g.buildings().iter().enumerate() {
                    assert_eq!(g.tile(b.pos), Some(TileKind::Building));
                    assert!(g.buildings()[i + 1..].iter().all(|o| o.pos != b.pos));
                }
                for (i, p) in g.places().iter().enumerate() {
                    assert!(g.is_road(p.pos));
                    assert!(g.places()[i + 1..].iter().all(|o| o.pos != p.pos));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_map() {
        let a = generate(Difficulty::Hard, &mut StdRng::seed_from_u64(99));
        let b = generate(Difficulty::Hard, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.places(), b.places());
        assert_eq!(a.buildings(), b.buildings());
    }

    #[test]
    fn connected_generation_yields_single_network() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let g = generate_connected(Difficulty::Easy, &mut rng);
            assert!(g.is_road_network_connected());
        }
    }
}
