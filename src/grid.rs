use std::collections::{HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coords::GridPos;
use crate::tile::{BuildingKind, PlaceKind, RoadStyle, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: TileKind,
    pub road_style: Option<RoadStyle>,
}

impl Cell {
    pub const GRASS: Cell = Cell {
        kind: TileKind::Grass,
        road_style: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub pos: GridPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub kind: PlaceKind,
    pub pos: GridPos,
}

impl Place {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// What the pointer is over, resolved building first, then place, then road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTarget {
    Building(BuildingKind),
    Place(PlaceKind),
    Road(RoadStyle),
}

impl HoverTarget {
    pub fn label(&self) -> String {
        match self {
            HoverTarget::Building(b) => format!("{} {}", b.emoji(), b.name()),
            HoverTarget::Place(p) => format!("{} {}", p.emoji(), p.name()),
            HoverTarget::Road(r) => r.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    buildings: Vec<Building>,
    places: Vec<Place>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![Cell::GRASS; size],
            buildings: Vec::new(),
            places: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn contains(&self, p: GridPos) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn index(&self, p: GridPos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Uniformly random cell. The grid must not be empty.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        GridPos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    pub fn cell(&self, p: GridPos) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    pub fn tile(&self, p: GridPos) -> Option<TileKind> {
        self.cell(p).map(|c| c.kind)
    }

    pub fn is_road(&self, p: GridPos) -> bool {
        self.tile(p) == Some(TileKind::Road)
    }

    /// Paves `p`. An existing road keeps its style.
    pub fn pave(&mut self, p: GridPos, style: RoadStyle) {
        if let Some(i) = self.index(p) {
            let cell = &mut self.cells[i];
            cell.kind = TileKind::Road;
            if cell.road_style.is_none() {
                cell.road_style = Some(style);
            }
        }
    }

    /// Puts a building on a grass cell. Returns false for any other cell.
    pub fn add_building(&mut self, kind: BuildingKind, p: GridPos) -> bool {
        match self.index(p) {
            Some(i) if self.cells[i].kind == TileKind::Grass => {
                self.cells[i].kind = TileKind::Building;
                self.buildings.push(Building { kind, pos: p });
                true
            }
            _ => false,
        }
    }

    /// Puts a place on a free road cell. Returns false if the cell is not
    /// road or already holds a place.
    pub fn add_place(&mut self, kind: PlaceKind, p: GridPos) -> bool {
        if !self.is_road(p) || self.place_at(p).is_some() {
            return false;
        }
        self.places.push(Place { kind, pos: p });
        true
    }

    pub fn building_at(&self, p: GridPos) -> Option<&Building> {
        self.buildings.iter().find(|b| b.pos == p)
    }

    pub fn place_at(&self, p: GridPos) -> Option<&Place> {
        self.places.iter().find(|pl| pl.pos == p)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (GridPos, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (GridPos::new(i as i32 % w, i as i32 / w), *c))
    }

    pub fn road_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.iter_cells()
            .filter(|(_, c)| c.kind == TileKind::Road)
            .map(|(p, _)| p)
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// True when every road cell can reach every other one.
    /// A grid without roads counts as connected.
    pub fn is_road_network_connected(&self) -> bool {
        let Some(start) = self.road_cells().next() else {
            return true;
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            for n in p.neighbours() {
                if self.is_road(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len() == self.count(TileKind::Road)
    }

    pub fn hover_target(&self, p: GridPos) -> Option<HoverTarget> {
        if let Some(b) = self.building_at(p) {
            return Some(HoverTarget::Building(b.kind));
        }
        if let Some(pl) = self.place_at(p) {
            return Some(HoverTarget::Place(pl.kind));
        }
        let cell = self.cell(p)?;
        match (cell.kind, cell.road_style) {
            (TileKind::Road, Some(style)) => Some(HoverTarget::Road(style)),
            _ => None,
        }
    }
}
