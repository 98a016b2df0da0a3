use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TileKind {
	Grass,
	Road,
	Building,
}

impl TileKind {
	pub fn is_traversable(self) -> bool {
		matches!(self, TileKind::Road)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoadStyle {
	Road,
	Street,
	Avenue,
}

impl RoadStyle {
	pub const ALL: [RoadStyle; 3] = [RoadStyle::Road, RoadStyle::Street, RoadStyle::Avenue];

	/// Style given to cells paved by the extra connecting roads.
	pub const DEFAULT: RoadStyle = RoadStyle::Road;

	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		*Self::ALL.choose(rng).unwrap_or(&Self::DEFAULT)
	}

	pub fn name(self) -> &'static str {
		match self {
			RoadStyle::Road => "Road",
			RoadStyle::Street => "Street",
			RoadStyle::Avenue => "Avenue",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BuildingKind {
	Office,
	Apartment,
	House,
	Hotel,
	Bank,
	Tower,
	Factory,
	Station,
}

impl BuildingKind {
	pub const ALL: [BuildingKind; 8] = [
		BuildingKind::Office,
		BuildingKind::Apartment,
		BuildingKind::House,
		BuildingKind::Hotel,
		BuildingKind::Bank,
		BuildingKind::Tower,
		BuildingKind::Factory,
		BuildingKind::Station,
	];

	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		*Self::ALL.choose(rng).unwrap_or(&BuildingKind::House)
	}

	pub fn name(self) -> &'static str {
		match self {
			BuildingKind::Office => "Office",
			BuildingKind::Apartment => "Apartment",
			BuildingKind::House => "House",
			BuildingKind::Hotel => "Hotel",
			BuildingKind::Bank => "Bank",
			BuildingKind::Tower => "Tower",
			BuildingKind::Factory => "Factory",
			BuildingKind::Station => "Station",
		}
	}

	pub fn emoji(self) -> &'static str {
		match self {
			BuildingKind::Office => "🏢",
			BuildingKind::Apartment => "🏘️",
			BuildingKind::House => "🏠",
			BuildingKind::Hotel => "🏨",
			BuildingKind::Bank => "🏦",
			BuildingKind::Tower => "🗼",
			BuildingKind::Factory => "🏭",
			BuildingKind::Station => "🚉",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PlaceKind {
	Hospital,
	School,
	Park,
	Shop,
	Museum,
	Library,
	Mall,
	Restaurant,
}

impl PlaceKind {
	/// Catalogue order; each difficulty takes a prefix of it.
	pub const CATALOG: [PlaceKind; 8] = [
		PlaceKind::Hospital,
		PlaceKind::School,
		PlaceKind::Park,
		PlaceKind::Shop,
		PlaceKind::Museum,
		PlaceKind::Library,
		PlaceKind::Mall,
		PlaceKind::Restaurant,
	];

	pub fn name(self) -> &'static str {
		match self {
			PlaceKind::Hospital => "Hospital",
			PlaceKind::School => "School",
			PlaceKind::Park => "Park",
			PlaceKind::Shop => "Shop",
			PlaceKind::Museum => "Museum",
			PlaceKind::Library => "Library",
			PlaceKind::Mall => "Mall",
			PlaceKind::Restaurant => "Restaurant",
		}
	}

	pub fn emoji(self) -> &'static str {
		match self {
			PlaceKind::Hospital => "🏥",
			PlaceKind::School => "🏫",
			PlaceKind::Park => "🌳",
			PlaceKind::Shop => "🏪",
			PlaceKind::Museum => "🏛️",
			PlaceKind::Library => "📚",
			PlaceKind::Mall => "🏬",
			PlaceKind::Restaurant => "🍽️",
		}
	}

	/// Marker colour as RGB.
	pub fn color(self) -> (u8, u8, u8) {
		match self {
			PlaceKind::Hospital => (0xff, 0x6b, 0x6b),
			PlaceKind::School => (0x4e, 0xcd, 0xc4),
			PlaceKind::Park => (0x95, 0xe1, 0xd3),
			PlaceKind::Shop => (0xf9, 0xca, 0x24),
			PlaceKind::Museum => (0xa2, 0x9b, 0xfe),
			PlaceKind::Library => (0xfd, 0x79, 0xa8),
			PlaceKind::Mall => (0xff, 0xea, 0xa7),
			PlaceKind::Restaurant => (0xfa, 0xb1, 0xa0),
		}
	}
}
