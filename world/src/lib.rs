#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the harbor island builder.
//!
//! The world owns the three typed layers, the entity registry, the highlight
//! overlay and the build/command mode machine. Every mutation goes through
//! [`apply`]; read access goes through the [`query`] module.

pub mod blueprints;
pub mod layers;
pub mod overlay;
pub mod placement;
pub mod projection;
pub mod proximity;
pub mod registry;

use std::collections::BTreeMap;

use harbor_core::{
    BuildingKind, CellCoord, CellRect, Command, DomainEntity, EntityId, Event, Footprint,
    GroundId, HighlightColor, HighlightOverlay, HighlightStyle, IslandId, LayerKind, Location,
    MoveError, PlacedEntity, PlacementError, PlayMode, RemovalError, SpatialLayer, TileWhitelist,
    TransitionError, UnitKind,
};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::{
    blueprints::{blueprint, PlacementRule},
    layers::{Layers, MetricKind},
    overlay::HighlightSet,
    placement::check_placement,
    proximity::query_radius,
    registry::EntityRegistry,
};

/// Largest margin honoured by [`Command::FloodWater`]; larger requests are clamped.
pub const MAX_WATER_MARGIN: u32 = 256;

/// Tunable parameters applied when a world is initialised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Distance metric shared by every layer.
    pub metric: MetricKind,
    /// Outline applied to entities found by a radius query.
    pub radius_highlight: HighlightStyle,
    /// Outline applied to the selected entity.
    pub selection_highlight: HighlightStyle,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::Euclidean,
            radius_highlight: HighlightStyle::new(HighlightColor::BLACK, 2),
            selection_highlight: HighlightStyle::new(HighlightColor::WHITE, 1),
        }
    }
}

#[derive(Clone, Debug)]
struct BuildSession {
    candidate: EntityId,
    kind: BuildingKind,
    whitelist: Option<TileWhitelist>,
}

/// Represents the authoritative game state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    layers: Layers,
    registry: EntityRegistry<DomainEntity>,
    islands: BTreeMap<IslandId, Vec<EntityId>>,
    next_island: u32,
    mode: PlayMode,
    build: Option<BuildSession>,
    selection: Option<EntityId>,
    overlay: HighlightSet,
}

/// Counts of the entities released by [`World::shutdown`], in release order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Whether a pending build candidate was discarded.
    pub candidate_released: bool,
    /// Entities removed from the units layer.
    pub units: usize,
    /// Entities removed from the land layer.
    pub land: usize,
    /// Entities removed from the water layer.
    pub water: usize,
    /// Registry associations dropped after the layers were emptied.
    pub registrations: usize,
}

impl ShutdownReport {
    /// Total number of placed entities that were released.
    #[must_use]
    pub fn released_entities(&self) -> usize {
        usize::from(self.candidate_released) + self.units + self.land + self.water
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::init(WorldConfig::default())
    }

    /// Creates an empty world: three empty layers, a fresh registry and
    /// overlay, and command mode.
    #[must_use]
    pub fn init(config: WorldConfig) -> Self {
        debug!(metric = ?config.metric, "world initialised");
        Self {
            config,
            layers: Layers::new(config.metric),
            registry: EntityRegistry::new(),
            islands: BTreeMap::new(),
            next_island: 0,
            mode: PlayMode::Command,
            build: None,
            selection: None,
            overlay: HighlightSet::new(),
        }
    }

    /// Tears the world down in a fixed order.
    ///
    /// The pending build candidate goes first, then the units, land and
    /// water layers, and finally the registry and the overlay.
    pub fn shutdown(mut self) -> ShutdownReport {
        let mut report = ShutdownReport::default();

        if let Some(session) = self.build.take() {
            report.candidate_released = self
                .layers
                .layer_mut(LayerKind::Units)
                .remove(session.candidate)
                .is_some();
            let _ = self.registry.unregister(session.candidate);
        }
        report.units = self.layers.layer_mut(LayerKind::Units).clear();
        report.land = self.layers.layer_mut(LayerKind::Land).clear();
        report.water = self.layers.layer_mut(LayerKind::Water).clear();
        report.registrations = self.registry.clear();
        self.islands.clear();
        self.selection = None;
        self.overlay.clear_highlights();

        debug!(
            released = report.released_entities(),
            registrations = report.registrations,
            "world shut down"
        );
        report
    }

    fn place(
        &mut self,
        layer: LayerKind,
        location: Location,
        footprint: Footprint,
        entity: DomainEntity,
    ) -> Option<PlacedEntity> {
        let id = self.registry.allocate_id();
        let placed = match self.layers.layer_mut(layer).insert(id, location, footprint) {
            Ok(placed) => placed,
            Err(error) => {
                warn!(%error, ?layer, "entity not placed");
                return None;
            }
        };

        if let Err(error) = self.registry.register(id, entity) {
            error!(%error, "entity registry out of sync with layers");
            if cfg!(debug_assertions) {
                panic!("{error}");
            }
        }
        Some(placed)
    }

    fn set_mode(&mut self, mode: PlayMode, out_events: &mut Vec<Event>) {
        if self.mode != mode {
            self.mode = mode;
            debug!(?mode, "mode changed");
            out_events.push(Event::ModeChanged { mode });
        }
    }

    fn clear_selection(&mut self, out_events: &mut Vec<Event>) {
        if self.selection.take().is_some() {
            self.overlay.clear_highlights();
            out_events.push(Event::SelectionChanged { entity: None });
        }
    }

    fn cancel_build(&mut self, out_events: &mut Vec<Event>) {
        let Some(session) = self.build.take() else {
            debug!("cancel ignored outside build mode");
            return;
        };

        let _ = self
            .layers
            .layer_mut(LayerKind::Units)
            .remove(session.candidate);
        let _ = self.registry.unregister(session.candidate);
        if self.selection == Some(session.candidate) {
            self.clear_selection(out_events);
        }

        debug!(candidate = %session.candidate, "build cancelled");
        out_events.push(Event::BuildCancelled {
            entity: session.candidate,
        });
        self.set_mode(PlayMode::Command, out_events);
    }

    fn selectable_at(&self, cell: CellCoord) -> Option<EntityId> {
        let candidate = self.build.as_ref().map(|session| session.candidate);
        [LayerKind::Units, LayerKind::Land]
            .into_iter()
            .flat_map(|kind| self.layers.layer(kind).entities_at(cell))
            .map(|placed| placed.id)
            .filter(|id| Some(*id) != candidate)
            .find(|id| {
                matches!(
                    self.registry.resolve(*id),
                    Some(DomainEntity::Building { .. } | DomainEntity::Unit { .. })
                )
            })
    }
}

/// Validates a build of `kind` at `location` against the common placement
/// check and the building's own placement rule.
fn validate_build(
    world: &World,
    kind: BuildingKind,
    location: &Location,
    candidate: Option<EntityId>,
    whitelist: Option<&TileWhitelist>,
) -> Result<CellRect, PlacementError> {
    let blueprint = blueprint(kind);
    let land = world.layers.layer(LayerKind::Land);
    let units = world.layers.layer(LayerKind::Units);
    check_placement(
        blueprint.footprint(),
        location,
        candidate,
        land,
        units,
        whitelist,
    )?;

    let anchor = location.cell().ok_or(PlacementError::UnresolvedOrigin)?;
    let region = CellRect::new(anchor, blueprint.footprint());
    blueprint
        .placement()
        .check(region, land, world.layers.layer(LayerKind::Water))?;
    Ok(region)
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AddIsland { offset, tiles } => {
            let island = IslandId::new(world.next_island);
            world.next_island = world.next_island.saturating_add(1);

            let mut placed_tiles = Vec::with_capacity(tiles.len());
            for tile in tiles {
                let Some(cell) = tile.translated(offset.column(), offset.row()) else {
                    warn!(%tile, %offset, "island tile outside the map range");
                    continue;
                };
                let entity = DomainEntity::Tile {
                    layer: LayerKind::Land,
                    ground: GroundId::GRASS,
                };
                if let Some(placed) = world.place(
                    LayerKind::Land,
                    Location::at_cell(LayerKind::Land, cell),
                    Footprint::SINGLE,
                    entity,
                ) {
                    placed_tiles.push(placed.id);
                }
            }

            let count = placed_tiles.len();
            let _ = world.islands.insert(island, placed_tiles);
            debug!(island = island.get(), tiles = count, "island added");
            out_events.push(Event::IslandAdded {
                island,
                tiles: count,
            });
        }
        Command::FloodWater { margin } => {
            let Some((min, max)) = world.layers.layer(LayerKind::Land).bounds() else {
                debug!("no land to surround with water");
                return;
            };
            if margin > MAX_WATER_MARGIN {
                warn!(margin, max = MAX_WATER_MARGIN, "water margin clamped");
            }
            let margin = i32::try_from(margin.min(MAX_WATER_MARGIN)).unwrap_or_default();

            let mut filled = 0;
            for column in min.column().saturating_sub(margin)..=max.column().saturating_add(margin) {
                for row in min.row().saturating_sub(margin)..=max.row().saturating_add(margin) {
                    let cell = CellCoord::new(column, row);
                    if !world.layers.layer(LayerKind::Water).entities_at(cell).is_empty() {
                        continue;
                    }
                    let entity = DomainEntity::Tile {
                        layer: LayerKind::Water,
                        ground: GroundId::WATER,
                    };
                    if world
                        .place(
                            LayerKind::Water,
                            Location::at_cell(LayerKind::Water, cell),
                            Footprint::SINGLE,
                            entity,
                        )
                        .is_some()
                    {
                        filled += 1;
                    }
                }
            }

            debug!(tiles = filled, "water filled");
            out_events.push(Event::WaterFilled { tiles: filled });
        }
        Command::PlaceTerrain {
            layer,
            cell,
            ground,
        } => {
            let entity = DomainEntity::Tile { layer, ground };
            if let Some(placed) = world.place(
                layer,
                Location::at_cell(layer, cell),
                Footprint::SINGLE,
                entity,
            ) {
                out_events.push(Event::TerrainPlaced {
                    entity: placed.id,
                    layer,
                    cell,
                });
            }
        }
        Command::PlaceBuilding { kind, origin } => {
            let footprint = blueprint(kind).footprint();
            if let Some(placed) = world.place(
                LayerKind::Units,
                Location::at_cell(LayerKind::Units, origin),
                footprint,
                DomainEntity::Building { kind },
            ) {
                debug!(entity = %placed.id, ?kind, %origin, "building placed");
                out_events.push(Event::BuildingPlaced {
                    entity: placed.id,
                    kind,
                    region: placed.region,
                });
            }
        }
        Command::SpawnUnit {
            kind,
            name,
            location,
        } => spawn_unit(world, kind, name, location, out_events),
        Command::RemoveEntity { entity } => {
            if world.build.as_ref().map(|session| session.candidate) == Some(entity) {
                world.cancel_build(out_events);
                return;
            }

            let removed = world.layers.remove(entity);
            let _ = world.registry.unregister(entity);
            for tiles in world.islands.values_mut() {
                tiles.retain(|tile| *tile != entity);
            }

            match removed {
                Some((layer, _)) => {
                    debug!(%entity, ?layer, "entity removed");
                    if world.selection == Some(entity) {
                        world.clear_selection(out_events);
                    }
                    out_events.push(Event::EntityRemoved { entity, layer });
                }
                None => out_events.push(Event::RemovalRejected {
                    entity,
                    reason: RemovalError::UnresolvedId,
                }),
            }
        }
        Command::StartBuild {
            kind,
            origin,
            whitelist,
        } => {
            if let Some(session) = &world.build {
                out_events.push(Event::TransitionRejected {
                    reason: TransitionError::AlreadyBuilding {
                        candidate: session.candidate,
                    },
                });
                return;
            }
            if origin.cell().is_none() {
                out_events.push(Event::TransitionRejected {
                    reason: TransitionError::UnresolvedOrigin,
                });
                return;
            }

            let Some(placed) = world.place(
                LayerKind::Units,
                origin,
                blueprint(kind).footprint(),
                DomainEntity::Building { kind },
            ) else {
                return;
            };

            debug!(
                candidate = %placed.id,
                ?kind,
                whitelist = ?whitelist.as_ref().map(TileWhitelist::len),
                "build started"
            );
            world.build = Some(BuildSession {
                candidate: placed.id,
                kind,
                whitelist,
            });
            out_events.push(Event::BuildStarted {
                entity: placed.id,
                kind,
                location: placed.location,
            });
            world.set_mode(PlayMode::Build, out_events);
        }
        Command::MoveCandidate { location } => {
            let Some(candidate) = world.build.as_ref().map(|session| session.candidate) else {
                return;
            };
            match world
                .layers
                .layer_mut(LayerKind::Units)
                .relocate(candidate, location)
            {
                Ok(placed) => out_events.push(Event::CandidateMoved {
                    entity: candidate,
                    location: placed.location,
                }),
                Err(error) => debug!(%error, "candidate stays in place"),
            }
        }
        Command::ConfirmBuild { location } => confirm_build(world, location, out_events),
        Command::CancelBuild => world.cancel_build(out_events),
        Command::Select { location } => {
            if world.mode != PlayMode::Command {
                debug!("selection ignored in build mode");
                return;
            }

            match location.cell().and_then(|cell| world.selectable_at(cell)) {
                Some(entity) => {
                    world.overlay.clear_highlights();
                    let style = world.config.selection_highlight;
                    world.overlay.add_highlight(entity, style.color, style.width);
                    if world.selection != Some(entity) {
                        world.selection = Some(entity);
                        out_events.push(Event::SelectionChanged {
                            entity: Some(entity),
                        });
                    }
                }
                None => world.clear_selection(out_events),
            }
        }
        Command::Deselect => world.clear_selection(out_events),
        Command::MoveUnit { unit, location } => move_unit(world, unit, location, out_events),
        Command::HighlightRadius {
            layer,
            origin,
            radius,
        } => {
            let entities = query_radius(
                world.layers.layer(layer),
                &origin,
                radius,
                &mut world.overlay,
                world.config.radius_highlight,
            );
            out_events.push(Event::RadiusHighlighted { layer, entities });
        }
    }
}

fn spawn_unit(
    world: &mut World,
    kind: UnitKind,
    name: String,
    location: Location,
    out_events: &mut Vec<Event>,
) {
    debug!(?kind, %name, "spawning unit");
    if let Some(placed) = world.place(
        LayerKind::Units,
        location,
        Footprint::SINGLE,
        DomainEntity::Unit { kind, name },
    ) {
        out_events.push(Event::UnitSpawned {
            entity: placed.id,
            kind,
            location: placed.location,
        });
    }
}

fn move_unit(world: &mut World, unit: EntityId, location: Location, out_events: &mut Vec<Event>) {
    let verdict = match world.registry.resolve(unit) {
        None => Err(MoveError::UnresolvedId),
        Some(DomainEntity::Unit { .. }) => world
            .layers
            .layer_mut(LayerKind::Units)
            .relocate(unit, location)
            .map_err(|_| MoveError::UnresolvedLocation),
        Some(_) => Err(MoveError::NotMovable),
    };

    match verdict {
        Ok(placed) => {
            debug!(entity = %unit, cell = ?placed.location.cell(), "unit moved");
            out_events.push(Event::UnitMoved {
                entity: unit,
                location: placed.location,
            });
        }
        Err(reason) => {
            debug!(entity = %unit, %reason, "move order refused");
            out_events.push(Event::MoveRejected {
                entity: unit,
                reason,
            });
        }
    }
}

fn confirm_build(world: &mut World, location: Location, out_events: &mut Vec<Event>) {
    let Some(session) = world.build.as_ref() else {
        debug!("confirm ignored outside build mode");
        return;
    };
    let candidate = session.candidate;
    let kind = session.kind;

    let verdict = validate_build(
        world,
        kind,
        &location,
        Some(candidate),
        session.whitelist.as_ref(),
    );
    let region = match verdict {
        Ok(region) => region,
        Err(reason) => {
            debug!(%candidate, %reason, "placement rejected");
            out_events.push(Event::PlacementRejected {
                entity: candidate,
                location,
                reason,
            });
            return;
        }
    };

    if let Err(error) = world
        .layers
        .layer_mut(LayerKind::Units)
        .relocate(candidate, location)
    {
        warn!(%error, %candidate, "candidate could not be committed");
        return;
    }

    world.build = None;
    debug!(entity = %candidate, ?kind, origin = %region.origin(), "build confirmed");
    out_events.push(Event::BuildConfirmed {
        entity: candidate,
        kind,
        region,
    });
    world.set_mode(PlayMode::Command, out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use harbor_core::{
        BuildingKind, DomainEntity, EntityId, IslandId, LayerKind, Location, PlacedEntity,
        PlacementError, PlayMode, TileWhitelist,
    };

    use super::{validate_build, World, WorldConfig};
    use crate::{layers::GridLayer, overlay::HighlightSet, proximity};

    /// Configuration the world was initialised with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(world: &World) -> PlayMode {
        world.mode
    }

    /// Currently selected entity, if any.
    #[must_use]
    pub fn selection(world: &World) -> Option<EntityId> {
        world.selection
    }

    /// Candidate of the pending build together with its building kind.
    #[must_use]
    pub fn build_candidate(world: &World) -> Option<(EntityId, BuildingKind)> {
        world
            .build
            .as_ref()
            .map(|session| (session.candidate, session.kind))
    }

    /// Construction area restricting the pending build, if any.
    #[must_use]
    pub fn whitelist(world: &World) -> Option<&TileWhitelist> {
        world
            .build
            .as_ref()
            .and_then(|session| session.whitelist.as_ref())
    }

    /// Resolves an entity id to its domain object.
    #[must_use]
    pub fn resolve(world: &World, entity: EntityId) -> Option<&DomainEntity> {
        world.registry.resolve(entity)
    }

    /// Number of registered entities, including a pending build candidate.
    #[must_use]
    pub fn entity_count(world: &World) -> usize {
        world.registry.len()
    }

    /// Layer and placement of an entity.
    #[must_use]
    pub fn placed(world: &World, entity: EntityId) -> Option<(LayerKind, PlacedEntity)> {
        world.layers.locate(entity)
    }

    /// Read access to a layer.
    #[must_use]
    pub fn layer(world: &World, kind: LayerKind) -> &GridLayer {
        world.layers.layer(kind)
    }

    /// Entities currently outlined by the overlay.
    #[must_use]
    pub fn highlights(world: &World) -> &HighlightSet {
        &world.overlay
    }

    /// Tile entities placed for an island. Removed tiles are omitted.
    #[must_use]
    pub fn island_tiles(world: &World, island: IslandId) -> &[EntityId] {
        world
            .islands
            .get(&island)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Reports whether `b` lies within `radius` of `a` under the world's metric.
    #[must_use]
    pub fn in_radius(world: &World, a: &Location, b: &Location, radius: f32) -> bool {
        proximity::in_radius(&world.config.metric, a, b, radius)
    }

    /// Validates a build of `kind` at `location` without changing any state.
    ///
    /// While a build is pending its candidate is ignored and its construction
    /// area applies, so adapters can call this on every pointer move to
    /// show live feedback.
    pub fn check_build(
        world: &World,
        kind: BuildingKind,
        location: &Location,
    ) -> Result<(), PlacementError> {
        let session = world.build.as_ref();
        validate_build(
            world,
            kind,
            location,
            session.map(|session| session.candidate),
            session.and_then(|session| session.whitelist.as_ref()),
        )
        .map(|_| ())
    }

    /// Reports whether a build of `kind` at `location` would be accepted.
    #[must_use]
    pub fn can_place(world: &World, kind: BuildingKind, location: &Location) -> bool {
        check_build(world, kind, location).is_ok()
    }
}
