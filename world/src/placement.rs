//! Footprint-based placement legality checks against the terrain and unit layers.
//!
//! A cell is buildable when the terrain layer holds some entity there (ground
//! must exist), that ground lies inside the optional whitelist, and the unit
//! layer holds nothing there. The candidate being placed is ignored on both
//! layers so that a candidate already sitting on the map does not block
//! itself.
//!
//! The terrain check only asks whether *any* ground exists. It does not look
//! at the ground type, so a cell covered by an impassable ground tile is
//! still reported as buildable.
//
// TODO: decide with content authors whether ground types need a buildable flag;
// the check above mirrors the shipped behaviour until then.

use harbor_core::{
    CellCoord, CellRect, EntityId, Footprint, Location, PlacedEntity, PlacementError,
    SpatialLayer, TileWhitelist,
};
use tracing::trace;

/// Reports whether the footprint can be placed at `origin`.
#[must_use]
pub fn can_place<T, U>(
    footprint: Footprint,
    origin: &Location,
    candidate: Option<EntityId>,
    terrain: &T,
    units: &U,
    whitelist: Option<&TileWhitelist>,
) -> bool
where
    T: SpatialLayer + ?Sized,
    U: SpatialLayer + ?Sized,
{
    check_placement(footprint, origin, candidate, terrain, units, whitelist).is_ok()
}

/// Validates every covered cell, stopping at the first illegal one.
///
/// Cells are visited x-extent outer, y-extent inner. Neither layer is
/// mutated.
pub fn check_placement<T, U>(
    footprint: Footprint,
    origin: &Location,
    candidate: Option<EntityId>,
    terrain: &T,
    units: &U,
    whitelist: Option<&TileWhitelist>,
) -> Result<(), PlacementError>
where
    T: SpatialLayer + ?Sized,
    U: SpatialLayer + ?Sized,
{
    let anchor = origin.cell().ok_or(PlacementError::UnresolvedOrigin)?;
    trace!(%anchor, width = footprint.width(), height = footprint.height(), "checking placement");

    for (dx, dy) in footprint.offsets() {
        let cell = anchor
            .offset_by(dx, dy)
            .ok_or(PlacementError::UnresolvedOrigin)?;
        check_cell(cell, candidate, terrain, units, whitelist)?;
    }
    Ok(())
}

fn check_cell<T, U>(
    cell: CellCoord,
    candidate: Option<EntityId>,
    terrain: &T,
    units: &U,
    whitelist: Option<&TileWhitelist>,
) -> Result<(), PlacementError>
where
    T: SpatialLayer + ?Sized,
    U: SpatialLayer + ?Sized,
{
    let Some(ground) = first_other(terrain.entities_at(cell), candidate) else {
        trace!(%cell, "no ground");
        return Err(PlacementError::MissingTerrain { cell });
    };

    if let Some(whitelist) = whitelist {
        if !whitelist.contains(ground.region.origin()) {
            trace!(%cell, "ground outside whitelist");
            return Err(PlacementError::OutsideWhitelist { cell });
        }
    }

    if let Some(occupant) = first_other(units.entities_at(cell), candidate) {
        trace!(%cell, by = %occupant.id, "occupied");
        return Err(PlacementError::Occupied {
            cell,
            by: occupant.id,
        });
    }

    trace!(%cell, "buildable");
    Ok(())
}

fn first_other(found: Vec<PlacedEntity>, candidate: Option<EntityId>) -> Option<PlacedEntity> {
    found
        .into_iter()
        .find(|placed| Some(placed.id) != candidate)
}

/// Reports whether some cell orthogonally adjacent to `region` is open water.
///
/// Open water is a cell with an entity on the water layer and none on the
/// land layer.
#[must_use]
pub fn touches_open_water<L, W>(region: CellRect, land: &L, water: &W) -> bool
where
    L: SpatialLayer + ?Sized,
    W: SpatialLayer + ?Sized,
{
    region
        .cells()
        .flat_map(|cell| {
            [(1, 0), (-1, 0), (0, 1), (0, -1)]
                .into_iter()
                .filter_map(move |(columns, rows)| cell.translated(columns, rows))
        })
        .filter(|neighbour| !region.contains(*neighbour))
        .any(|neighbour| {
            !water.entities_at(neighbour).is_empty() && land.entities_at(neighbour).is_empty()
        })
}
