//! Drives the world through the builder system for a scripted scenario.

use glam::Vec2;
use harbor_core::{
    BuildingKind, CellCoord, Command, CoordinateConverter, DomainEntity, Event, LayerKind,
    Location, TileWhitelist,
};
use harbor_system_builder::{Builder, BuilderInput};
use harbor_world::{
    apply,
    blueprints::{blueprint, ProductionBehavior, Selectable},
    projection::IsometricProjection,
    query, ShutdownReport, World,
};
use tracing::{debug, info, warn};

use crate::config::{AreaSpec, Scenario, Step};

/// Tally of the notable events observed during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionReport {
    pub(crate) islands: usize,
    pub(crate) water_tiles: usize,
    pub(crate) buildings_confirmed: usize,
    pub(crate) placements_rejected: usize,
    pub(crate) builds_cancelled: usize,
    pub(crate) transitions_rejected: usize,
    pub(crate) selections: usize,
    pub(crate) units_moved: usize,
    pub(crate) moves_rejected: usize,
}

/// World, input system and camera wired together for one scenario run.
pub(crate) struct Session {
    world: World,
    builder: Builder,
    projection: IsometricProjection,
    cursor: Option<Location>,
    pending: Vec<Event>,
    report: SessionReport,
}

impl Session {
    /// Initialises the world and applies the scenario's map setup.
    pub(crate) fn new(scenario: &Scenario) -> anyhow::Result<Self> {
        let mut session = Self {
            world: World::init(scenario.world),
            builder: Builder::new(),
            projection: scenario.camera.projection(),
            cursor: None,
            pending: Vec::new(),
            report: SessionReport::default(),
        };

        for island in &scenario.islands {
            let _ = session.submit(Command::AddIsland {
                offset: island.offset(),
                tiles: island.tiles()?,
            });
        }
        let _ = session.submit(Command::FloodWater {
            margin: scenario.water_margin,
        });
        for building in &scenario.buildings {
            let _ = session.submit(Command::PlaceBuilding {
                kind: building.kind,
                origin: building.origin(),
            });
        }
        for unit in &scenario.units {
            let _ = session.submit(Command::SpawnUnit {
                kind: unit.kind,
                name: unit.name.clone(),
                location: Location::new(LayerKind::Units, unit.position()),
            });
        }

        info!(
            entities = query::entity_count(&session.world),
            "scenario loaded"
        );
        Ok(session)
    }

    /// Plays the scripted steps in order.
    pub(crate) fn run(&mut self, steps: &[Step]) {
        for step in steps {
            self.step(step);
        }
    }

    fn step(&mut self, step: &Step) {
        match step {
            Step::StartBuild { kind, origin, area } => {
                let whitelist = area
                    .as_ref()
                    .and_then(|area| self.highlight_area(*kind, area));
                let _ = self.submit(Command::StartBuild {
                    kind: *kind,
                    origin: Location::new(LayerKind::Units, (*origin).into()),
                    whitelist,
                });
            }
            Step::Pointer { map, screen } => {
                let point = match (map, screen) {
                    (Some(map), _) => Vec2::from(*map),
                    (None, Some(screen)) => self.projection.to_map((*screen).into()),
                    (None, None) => return,
                };
                self.cursor = Some(Location::new(LayerKind::Units, point));
                self.dispatch(BuilderInput::new(false, false, self.cursor));
            }
            Step::Primary => self.dispatch(BuilderInput::new(true, false, self.cursor)),
            Step::Secondary => self.dispatch(BuilderInput::new(false, true, self.cursor)),
            Step::Highlight {
                layer,
                center,
                radius,
            } => {
                let _ = self.submit(Command::HighlightRadius {
                    layer: *layer,
                    origin: Location::new(*layer, (*center).into()),
                    radius: *radius,
                });
            }
        }
    }

    /// Highlights the construction area and collects the cells it covers.
    ///
    /// Returns `None` when neither the area nor the building names a radius.
    fn highlight_area(&mut self, kind: BuildingKind, area: &AreaSpec) -> Option<TileWhitelist> {
        let Some(radius) = area
            .radius
            .or_else(|| blueprint(kind).production().collection_radius())
        else {
            warn!(?kind, "building does not collect; construction area ignored");
            return None;
        };

        let events = self.submit(Command::HighlightRadius {
            layer: area.layer,
            origin: Location::new(area.layer, area.center()),
            radius,
        });
        Some(construction_area(&events))
    }

    fn dispatch(&mut self, input: BuilderInput) {
        let mut commands = Vec::new();
        self.builder.handle(&self.pending, input, &mut commands);
        self.pending.clear();
        for command in commands {
            let _ = self.submit(command);
        }
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        debug!(?command, "applying command");
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        for event in &events {
            self.record(event);
        }
        self.pending.extend(events.iter().cloned());
        events
    }

    fn record(&mut self, event: &Event) {
        match event {
            Event::IslandAdded { island, tiles } => {
                self.report.islands += 1;
                info!(island = island.get(), tiles, "island added");
            }
            Event::WaterFilled { tiles } => {
                self.report.water_tiles += tiles;
                info!(tiles, "water filled");
            }
            Event::BuildConfirmed {
                entity,
                kind,
                region,
            } => {
                self.report.buildings_confirmed += 1;
                let collects_within = blueprint(*kind).production().collection_radius();
                info!(
                    %entity,
                    ?kind,
                    origin = %region.origin(),
                    ?collects_within,
                    "building constructed"
                );
            }
            Event::PlacementRejected {
                entity,
                location,
                reason,
            } => {
                self.report.placements_rejected += 1;
                warn!(%entity, cell = %describe_cell(location), %reason, "placement rejected");
            }
            Event::BuildCancelled { entity } => {
                self.report.builds_cancelled += 1;
                info!(%entity, "build cancelled");
            }
            Event::TransitionRejected { reason } => {
                self.report.transitions_rejected += 1;
                warn!(%reason, "mode transition rejected");
            }
            Event::SelectionChanged { entity: Some(entity) } => {
                self.report.selections += 1;
                match query::resolve(&self.world, *entity) {
                    Some(DomainEntity::Building { kind }) => {
                        let panels = blueprint(*kind).selection().info_panels();
                        info!(%entity, ?kind, ?panels, "building selected");
                    }
                    selected => info!(%entity, ?selected, "selected"),
                }
            }
            Event::UnitMoved { entity, location } => {
                self.report.units_moved += 1;
                info!(%entity, cell = %describe_cell(location), "unit moved");
            }
            Event::MoveRejected { entity, reason } => {
                self.report.moves_rejected += 1;
                warn!(%entity, %reason, "move order refused");
            }
            Event::RadiusHighlighted { layer, entities } => {
                info!(?layer, found = entities.len(), "radius highlighted");
            }
            other => debug!(event = ?other, "event"),
        }
    }

    /// Shuts the world down in its fixed release order.
    pub(crate) fn finish(self) -> (SessionReport, ShutdownReport) {
        (self.report, self.world.shutdown())
    }
}

fn construction_area(events: &[Event]) -> TileWhitelist {
    events
        .iter()
        .find_map(|event| match event {
            Event::RadiusHighlighted { entities, .. } => Some(TileWhitelist::covering(entities)),
            _ => None,
        })
        .unwrap_or_default()
}

fn describe_cell(location: &Location) -> String {
    location
        .cell()
        .map_or_else(|| "unresolved".to_owned(), |cell: CellCoord| cell.to_string())
}
