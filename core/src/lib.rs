#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the harbor engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. The traits at the bottom of the crate describe the engine
//! collaborators the world consumes: spatial layers, distance metrics, the
//! highlight overlay and the screen/map coordinate converter.

use std::{collections::BTreeSet, fmt};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes the active interaction mode of the game controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Standard mode where clicks select entities.
    #[default]
    Command,
    /// A build candidate follows the pointer until confirmed or cancelled.
    Build,
}

/// Fixed set of spatial planes that entities are placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Ocean tiles surrounding the islands.
    Water,
    /// Island ground tiles. Buildings require ground beneath every cell.
    Land,
    /// Buildings and units.
    Units,
}

impl LayerKind {
    /// Every layer in bottom-to-top order.
    pub const ALL: [LayerKind; 3] = [LayerKind::Water, LayerKind::Land, LayerKind::Units];
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places the ground tiles of an island, translated by `offset`.
    AddIsland {
        /// Translation applied to every tile of the island.
        offset: CellCoord,
        /// Island-local cells covered by ground.
        tiles: Vec<CellCoord>,
    },
    /// Surrounds the land with water extending `margin` cells past its bounds.
    FloodWater {
        /// Number of water cells added on every side of the land bounds.
        margin: u32,
    },
    /// Places a single terrain tile on the provided layer.
    PlaceTerrain {
        /// Layer receiving the tile.
        layer: LayerKind,
        /// Cell covered by the tile.
        cell: CellCoord,
        /// Ground type of the tile.
        ground: GroundId,
    },
    /// Places a map-defined building without validating the site.
    PlaceBuilding {
        /// Type of building to construct.
        kind: BuildingKind,
        /// Upper-left cell of the building footprint.
        origin: CellCoord,
    },
    /// Places a unit on the units layer.
    SpawnUnit {
        /// Type of unit to create.
        kind: UnitKind,
        /// Display name of the unit.
        name: String,
        /// Initial position of the unit.
        location: Location,
    },
    /// Requests removal of an entity from its layer and the registry.
    RemoveEntity {
        /// Identifier of the entity targeted for removal.
        entity: EntityId,
    },
    /// Enters build mode with a new candidate building.
    StartBuild {
        /// Type of building proposed for construction.
        kind: BuildingKind,
        /// Initial position of the candidate.
        origin: Location,
        /// Optional set of ground cells the candidate is restricted to.
        whitelist: Option<TileWhitelist>,
    },
    /// Relocates the build candidate without validating the new site.
    MoveCandidate {
        /// New position of the candidate.
        location: Location,
    },
    /// Attempts to commit the build candidate at the provided location.
    ConfirmBuild {
        /// Position the candidate should be committed at.
        location: Location,
    },
    /// Abandons the build candidate and returns to command mode.
    CancelBuild,
    /// Selects the first selectable entity at the provided location.
    Select {
        /// Position that was clicked.
        location: Location,
    },
    /// Clears the current selection.
    Deselect,
    /// Orders a unit to a new position.
    MoveUnit {
        /// Unit receiving the order.
        unit: EntityId,
        /// Destination of the unit.
        location: Location,
    },
    /// Highlights every entity on a layer within a radius of a location.
    HighlightRadius {
        /// Layer to search.
        layer: LayerKind,
        /// Centre of the search.
        origin: Location,
        /// Maximum distance, inclusive.
        radius: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the controller entered a new mode.
    ModeChanged {
        /// Mode that became active.
        mode: PlayMode,
    },
    /// Confirms that an island was added to the map.
    IslandAdded {
        /// Identifier allocated to the island.
        island: IslandId,
        /// Number of ground tiles placed for the island.
        tiles: usize,
    },
    /// Confirms that water was placed around the land.
    WaterFilled {
        /// Number of water tiles placed.
        tiles: usize,
    },
    /// Confirms that a single terrain tile was placed.
    TerrainPlaced {
        /// Identifier allocated to the tile.
        entity: EntityId,
        /// Layer the tile was placed on.
        layer: LayerKind,
        /// Cell covered by the tile.
        cell: CellCoord,
    },
    /// Confirms that a map-defined building was placed.
    BuildingPlaced {
        /// Identifier allocated to the building.
        entity: EntityId,
        /// Type of building that was placed.
        kind: BuildingKind,
        /// Cells covered by the building.
        region: CellRect,
    },
    /// Confirms that a unit was spawned.
    UnitSpawned {
        /// Identifier allocated to the unit.
        entity: EntityId,
        /// Type of unit that was spawned.
        kind: UnitKind,
        /// Position of the unit.
        location: Location,
    },
    /// Confirms that an entity was removed.
    EntityRemoved {
        /// Identifier of the removed entity.
        entity: EntityId,
        /// Layer the entity was removed from.
        layer: LayerKind,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Identifier provided in the request.
        entity: EntityId,
        /// Reason the removal failed.
        reason: RemovalError,
    },
    /// Confirms that a build candidate was created.
    BuildStarted {
        /// Identifier allocated to the candidate.
        entity: EntityId,
        /// Type of building proposed.
        kind: BuildingKind,
        /// Initial position of the candidate.
        location: Location,
    },
    /// Confirms that the build candidate followed the pointer.
    CandidateMoved {
        /// Identifier of the candidate.
        entity: EntityId,
        /// New position of the candidate.
        location: Location,
    },
    /// Confirms that the build candidate became a permanent building.
    BuildConfirmed {
        /// Identifier of the building.
        entity: EntityId,
        /// Type of building that was constructed.
        kind: BuildingKind,
        /// Cells covered by the building.
        region: CellRect,
    },
    /// Reports that a confirm attempt failed validation.
    PlacementRejected {
        /// Identifier of the candidate.
        entity: EntityId,
        /// Position the confirm attempt targeted.
        location: Location,
        /// First violated placement rule.
        reason: PlacementError,
    },
    /// Confirms that the build candidate was discarded.
    BuildCancelled {
        /// Identifier the candidate held before removal.
        entity: EntityId,
    },
    /// Reports that a mode transition was not permitted.
    TransitionRejected {
        /// Reason the transition failed.
        reason: TransitionError,
    },
    /// Announces a change of the selected entity.
    SelectionChanged {
        /// Newly selected entity, if any.
        entity: Option<EntityId>,
    },
    /// Confirms that a unit followed a move order.
    UnitMoved {
        /// Identifier of the unit.
        entity: EntityId,
        /// New position of the unit.
        location: Location,
    },
    /// Reports that a move order was refused.
    MoveRejected {
        /// Entity the order targeted.
        entity: EntityId,
        /// Reason the order failed.
        reason: MoveError,
    },
    /// Reports the entities found and highlighted by a radius query.
    RadiusHighlighted {
        /// Layer that was searched.
        layer: LayerKind,
        /// Entities within the radius in layer iteration order.
        entities: Vec<PlacedEntity>,
    },
}

/// Unique identifier assigned to every placed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier assigned to an island when its tiles are loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IslandId(u32);

impl IslandId {
    /// Creates a new island identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Content identifier of a ground tile type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroundId(u32);

impl GroundId {
    /// Ground type used for flooded map borders.
    pub const WATER: GroundId = GroundId(13);
    /// Ground type used for plain island tiles.
    pub const GRASS: GroundId = GroundId(1);

    /// Creates a new ground identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed: the map is not bounded at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Translates the cell by a signed offset, returning `None` on overflow.
    #[must_use]
    pub fn translated(self, columns: i32, rows: i32) -> Option<CellCoord> {
        Some(CellCoord::new(
            self.column.checked_add(columns)?,
            self.row.checked_add(rows)?,
        ))
    }

    /// Translates the cell by a footprint offset, returning `None` on overflow.
    #[must_use]
    pub fn offset_by(self, dx: u32, dy: u32) -> Option<CellCoord> {
        let dx = i32::try_from(dx).ok()?;
        let dy = i32::try_from(dy).ok()?;
        self.translated(dx, dy)
    }

    /// Continuous map point at the upper-left corner of the cell.
    #[must_use]
    pub fn map_point(self) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Rectangular extent of a placeable entity measured in whole cells.
///
/// A footprint always covers at least one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFootprint")]
pub struct Footprint {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawFootprint {
    width: u32,
    height: u32,
}

impl TryFrom<RawFootprint> for Footprint {
    type Error = FootprintError;

    fn try_from(raw: RawFootprint) -> Result<Self, Self::Error> {
        Footprint::new(raw.width, raw.height)
    }
}

impl Footprint {
    /// Footprint covering a single cell.
    pub const SINGLE: Footprint = Footprint {
        width: 1,
        height: 1,
    };

    /// Creates a footprint, rejecting extents that cover no cells.
    pub fn new(width: u32, height: u32) -> Result<Self, FootprintError> {
        if width == 0 || height == 0 {
            return Err(FootprintError::Empty { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width of the footprint in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the footprint in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells covered by the footprint.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Enumerates the covered `(dx, dy)` offsets, x-extent outer and y-extent inner.
    pub fn offsets(&self) -> impl Iterator<Item = (u32, u32)> {
        let height = self.height;
        (0..self.width).flat_map(move |dx| (0..height).map(move |dy| (dx, dy)))
    }
}

/// Axis-aligned rectangle of cells anchored at its upper-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    footprint: Footprint,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and footprint.
    #[must_use]
    pub const fn new(origin: CellCoord, footprint: Footprint) -> Self {
        Self { origin, footprint }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Extent of the rectangle.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Enumerates the covered cells in footprint order, skipping cells that overflow.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        self.footprint
            .offsets()
            .filter_map(move |(dx, dy)| origin.offset_by(dx, dy))
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let column = i64::from(cell.column()) - i64::from(self.origin.column());
        let row = i64::from(cell.row()) - i64::from(self.origin.row());
        (0..i64::from(self.footprint.width())).contains(&column)
            && (0..i64::from(self.footprint.height())).contains(&row)
    }
}

/// Position on a layer expressed as a continuous map point.
///
/// The discrete grid cell is derived by flooring the map point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    layer: LayerKind,
    point: Vec2,
}

impl Location {
    /// Creates a location from a continuous map point.
    #[must_use]
    pub const fn new(layer: LayerKind, point: Vec2) -> Self {
        Self { layer, point }
    }

    /// Creates a location at the upper-left corner of a cell.
    #[must_use]
    pub fn at_cell(layer: LayerKind, cell: CellCoord) -> Self {
        Self::new(layer, cell.map_point())
    }

    /// Layer the location refers to.
    #[must_use]
    pub const fn layer(&self) -> LayerKind {
        self.layer
    }

    /// Continuous map coordinates of the location.
    #[must_use]
    pub const fn point(&self) -> Vec2 {
        self.point
    }

    /// Same map point expressed on a different layer.
    #[must_use]
    pub const fn on_layer(self, layer: LayerKind) -> Self {
        Self {
            layer,
            point: self.point,
        }
    }

    /// Grid cell containing the map point.
    ///
    /// Returns `None` for non-finite points and points outside the signed
    /// cell range.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        Some(CellCoord::new(
            floor_to_cell(self.point.x)?,
            floor_to_cell(self.point.y)?,
        ))
    }
}

fn floor_to_cell(value: f32) -> Option<i32> {
    const LOWER: f32 = -2_147_483_648.0;
    const UPPER: f32 = 2_147_483_648.0;

    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < LOWER || floored >= UPPER {
        return None;
    }
    Some(floored as i32)
}

/// Reference to an entity placed on exactly one layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntity {
    /// Identifier allocated to the entity.
    pub id: EntityId,
    /// Continuous position of the entity.
    pub location: Location,
    /// Cells covered by the entity.
    pub region: CellRect,
}

/// Restricted set of ground cells considered legal during a build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWhitelist {
    cells: BTreeSet<CellCoord>,
}

impl TileWhitelist {
    /// Creates a whitelist from the provided cells.
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = CellCoord>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Collects every cell covered by the provided entities.
    ///
    /// Used to turn the result of a radius query into a construction area.
    #[must_use]
    pub fn covering(entities: &[PlacedEntity]) -> Self {
        entities
            .iter()
            .flat_map(|placed| placed.region.cells())
            .collect()
    }

    /// Reports whether the cell is a member of the whitelist.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of whitelisted cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is whitelisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the whitelisted cells in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<CellCoord> for TileWhitelist {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

/// Outline colour used by the highlight overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HighlightColor {
    /// Black outline.
    pub const BLACK: HighlightColor = HighlightColor::from_rgb(0, 0, 0);
    /// White outline.
    pub const WHITE: HighlightColor = HighlightColor::from_rgb(255, 255, 255);

    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Colour and outline width applied to a highlighted entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// Outline colour.
    pub color: HighlightColor,
    /// Outline width in pixels.
    pub width: u32,
}

impl HighlightStyle {
    /// Creates a new highlight style.
    #[must_use]
    pub const fn new(color: HighlightColor, width: u32) -> Self {
        Self { color, width }
    }
}

/// Types of buildings that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Collects crops grown on nearby fields.
    Farm,
    /// Collects timber from nearby trees.
    Lumberjack,
    /// Collects wool and weaves cloth.
    Weaver,
    /// Collects game from nearby animals.
    Hunter,
    /// Catches fish; must be built on the coast.
    Fisher,
    /// Produces faith with running costs only.
    Church,
}

impl BuildingKind {
    /// Every building kind.
    pub const ALL: [BuildingKind; 6] = [
        BuildingKind::Farm,
        BuildingKind::Lumberjack,
        BuildingKind::Weaver,
        BuildingKind::Hunter,
        BuildingKind::Fisher,
        BuildingKind::Church,
    ];
}

/// Types of mobile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Trading ship.
    Ship,
}

/// Game-domain object associated with a placed entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEntity {
    /// Terrain tile.
    Tile {
        /// Layer holding the tile.
        layer: LayerKind,
        /// Ground type of the tile.
        ground: GroundId,
    },
    /// Building, either permanent or a build candidate.
    Building {
        /// Type of the building.
        kind: BuildingKind,
    },
    /// Mobile unit.
    Unit {
        /// Type of the unit.
        kind: UnitKind,
        /// Display name of the unit.
        name: String,
    },
}

/// Rejected footprint dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum FootprintError {
    /// The footprint has a zero extent and covers no cells.
    #[error("footprint {width}x{height} covers no cells")]
    Empty {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Registry contract violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RegistryError {
    /// The identifier already has a registered entity.
    #[error("entity {0} is already registered")]
    DuplicateId(EntityId),
}

/// Reasons a mode transition may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum TransitionError {
    /// A build is already in progress.
    #[error("build candidate {candidate} is still pending")]
    AlreadyBuilding {
        /// Candidate of the pending build.
        candidate: EntityId,
    },
    /// The candidate's initial position does not resolve to a grid cell.
    #[error("build origin does not resolve to a cell")]
    UnresolvedOrigin,
}

/// Reasons a placement check may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The origin does not resolve to a grid cell.
    #[error("placement origin does not resolve to a cell")]
    UnresolvedOrigin,
    /// A covered cell has no ground beneath it.
    #[error("no ground at {cell}")]
    MissingTerrain {
        /// Offending cell.
        cell: CellCoord,
    },
    /// A covered cell lies outside the active construction area.
    #[error("{cell} lies outside the construction area")]
    OutsideWhitelist {
        /// Offending cell.
        cell: CellCoord,
    },
    /// A covered cell is occupied by another building or unit.
    #[error("{cell} is occupied by {by}")]
    Occupied {
        /// Offending cell.
        cell: CellCoord,
        /// Entity occupying the cell.
        by: EntityId,
    },
    /// The building must touch open water but does not.
    #[error("building must be placed next to open water")]
    NotOnCoast,
}

/// Reasons an entity removal may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum RemovalError {
    /// No entity with the provided identifier exists.
    #[error("entity is not registered")]
    UnresolvedId,
}

/// Reasons a move order may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MoveError {
    /// No entity with the provided identifier exists.
    #[error("entity is not registered")]
    UnresolvedId,
    /// Only units can be moved.
    #[error("entity is not a unit")]
    NotMovable,
    /// The destination does not resolve to a grid cell.
    #[error("destination does not resolve to a cell")]
    UnresolvedLocation,
}

/// Queryable plane of placed entities.
pub trait SpatialLayer {
    /// Entities whose region covers the provided cell.
    fn entities_at(&self, cell: CellCoord) -> Vec<PlacedEntity>;

    /// Every entity on the layer in the layer's iteration order.
    fn entities(&self) -> Vec<PlacedEntity>;

    /// Distance between two locations under the layer's native metric.
    fn distance(&self, a: &Location, b: &Location) -> f32;
}

/// Distance strategy applied to continuous map points.
pub trait DistanceMetric {
    /// Distance between two map points.
    fn distance(&self, a: Vec2, b: Vec2) -> f32;
}

/// Visual marking of entities. Purely presentational.
pub trait HighlightOverlay {
    /// Removes every highlight.
    fn clear_highlights(&mut self);

    /// Outlines the entity with the provided colour and width.
    fn add_highlight(&mut self, entity: EntityId, color: HighlightColor, width: u32);
}

/// Stateless conversion between screen pixels and map coordinates.
pub trait CoordinateConverter {
    /// Converts a screen-space point into continuous map coordinates.
    fn to_map(&self, screen: Vec2) -> Vec2;

    /// Converts continuous map coordinates into a screen-space point.
    fn to_screen(&self, map: Vec2) -> Vec2;
}
