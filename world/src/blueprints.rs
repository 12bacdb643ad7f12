//! Building blueprints composed from independent capability components.
//!
//! Every building kind is described by the same three components: how it
//! presents itself when selected, how it produces, and which extra rule its
//! site must satisfy. Each component answers one narrow question through its
//! own trait, so a new building is a new combination rather than a new type.

use harbor_core::{BuildingKind, CellRect, Footprint, PlacementError, SpatialLayer};

use crate::placement::touches_open_water;

/// Information panel shown for a selected building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfoPanel {
    /// Stored goods.
    Inventory,
    /// Production chain and running costs.
    ProductionOverview,
}

/// Answers which panels a selected building presents.
pub trait Selectable {
    /// Panels shown when the building is selected.
    fn info_panels(&self) -> &'static [InfoPanel];
}

/// Answers how a building gathers its inputs.
pub trait ProductionBehavior {
    /// Radius within which the building collects, if it collects at all.
    fn collection_radius(&self) -> Option<f32>;
}

/// Answers whether a site satisfies a building's extra placement rule.
///
/// Checked after the common ground and occupancy check has passed.
pub trait PlacementRule {
    /// Validates the region the building would cover.
    fn check(
        &self,
        region: CellRect,
        land: &dyn SpatialLayer,
        water: &dyn SpatialLayer,
    ) -> Result<(), PlacementError>;
}

/// Selection presentation of a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectability {
    panels: &'static [InfoPanel],
}

impl Selectability {
    const STANDARD: Self = Self {
        panels: &[InfoPanel::Inventory, InfoPanel::ProductionOverview],
    };
    const PRODUCTION_ONLY: Self = Self {
        panels: &[InfoPanel::ProductionOverview],
    };
}

impl Selectable for Selectability {
    fn info_panels(&self) -> &'static [InfoPanel] {
        self.panels
    }
}

/// Production behaviour of a building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Production {
    /// Produces from its own inventory.
    Simple,
    /// Sends collectors to entities within `radius`.
    Collecting {
        /// Collection radius in map units.
        radius: f32,
    },
}

impl ProductionBehavior for Production {
    fn collection_radius(&self) -> Option<f32> {
        match self {
            Self::Simple => None,
            Self::Collecting { radius } => Some(*radius),
        }
    }
}

/// Site rule applied on top of the common placement check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Any buildable site.
    Single,
    /// A buildable site touching open water.
    SingleOnCoast,
}

impl PlacementRule for PlacementPolicy {
    fn check(
        &self,
        region: CellRect,
        land: &dyn SpatialLayer,
        water: &dyn SpatialLayer,
    ) -> Result<(), PlacementError> {
        match self {
            Self::Single => Ok(()),
            Self::SingleOnCoast if touches_open_water(region, land, water) => Ok(()),
            Self::SingleOnCoast => Err(PlacementError::NotOnCoast),
        }
    }
}

/// Complete description of a building kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blueprint {
    kind: BuildingKind,
    footprint: Footprint,
    selection: Selectability,
    production: Production,
    placement: PlacementPolicy,
}

impl Blueprint {
    /// Building kind described by the blueprint.
    #[must_use]
    pub const fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// Cells covered by the building.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Selection component.
    #[must_use]
    pub const fn selection(&self) -> &Selectability {
        &self.selection
    }

    /// Production component.
    #[must_use]
    pub const fn production(&self) -> &Production {
        &self.production
    }

    /// Placement component.
    #[must_use]
    pub const fn placement(&self) -> &PlacementPolicy {
        &self.placement
    }
}

/// Looks up the blueprint of a building kind.
#[must_use]
pub fn blueprint(kind: BuildingKind) -> Blueprint {
    let (width, height, selection, production, placement) = match kind {
        BuildingKind::Farm => (
            3,
            3,
            Selectability::STANDARD,
            Production::Collecting { radius: 4.0 },
            PlacementPolicy::Single,
        ),
        BuildingKind::Lumberjack => (
            2,
            2,
            Selectability::STANDARD,
            Production::Collecting { radius: 4.0 },
            PlacementPolicy::Single,
        ),
        BuildingKind::Weaver => (
            2,
            2,
            Selectability::STANDARD,
            Production::Collecting { radius: 3.0 },
            PlacementPolicy::Single,
        ),
        BuildingKind::Hunter => (
            2,
            2,
            Selectability::STANDARD,
            Production::Collecting { radius: 5.0 },
            PlacementPolicy::Single,
        ),
        BuildingKind::Fisher => (
            1,
            1,
            Selectability::STANDARD,
            Production::Simple,
            PlacementPolicy::SingleOnCoast,
        ),
        BuildingKind::Church => (
            3,
            3,
            Selectability::PRODUCTION_ONLY,
            Production::Simple,
            PlacementPolicy::Single,
        ),
    };

    Blueprint {
        kind,
        footprint: Footprint::new(width, height).unwrap_or(Footprint::SINGLE),
        selection,
        production,
        placement,
    }
}
