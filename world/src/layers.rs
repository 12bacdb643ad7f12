//! Typed spatial layers backed by an ordered cell index.

use std::collections::BTreeMap;

use glam::Vec2;
use harbor_core::{
    CellCoord, CellRect, DistanceMetric, EntityId, Footprint, LayerKind, Location, PlacedEntity,
    SpatialLayer,
};
use serde::Deserialize;
use thiserror::Error;

/// Distance metrics available to grid layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Straight-line distance between map points.
    #[default]
    Euclidean,
    /// Sum of the axis distances.
    Manhattan,
    /// Largest axis distance.
    Chebyshev,
}

impl DistanceMetric for MetricKind {
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        let delta = (a - b).abs();
        match self {
            Self::Euclidean => delta.length(),
            Self::Manhattan => delta.x + delta.y,
            Self::Chebyshev => delta.max_element(),
        }
    }
}

/// Reasons a layer refuses to place or move an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayerError {
    /// The entity already has a placement on the layer.
    #[error("entity {0} is already placed on this layer")]
    AlreadyPlaced(EntityId),
    /// The entity has no placement on the layer.
    #[error("entity {0} is not placed on this layer")]
    NotPlaced(EntityId),
    /// The location does not resolve to a grid cell.
    #[error("location does not resolve to a grid cell")]
    UnresolvedLocation,
}

/// Spatial plane holding placed entities indexed by the cells they cover.
///
/// Iteration order is ascending entity id.
#[derive(Clone, Debug)]
pub struct GridLayer<M = MetricKind> {
    kind: LayerKind,
    metric: M,
    entries: BTreeMap<EntityId, PlacedEntity>,
    cells: BTreeMap<CellCoord, Vec<EntityId>>,
}

impl<M: DistanceMetric> GridLayer<M> {
    /// Creates an empty layer measuring distances with `metric`.
    #[must_use]
    pub fn new(kind: LayerKind, metric: M) -> Self {
        Self {
            kind,
            metric,
            entries: BTreeMap::new(),
            cells: BTreeMap::new(),
        }
    }

    /// Places an entity covering `footprint` cells anchored at `location`.
    pub fn insert(
        &mut self,
        id: EntityId,
        location: Location,
        footprint: Footprint,
    ) -> Result<PlacedEntity, LayerError> {
        if self.entries.contains_key(&id) {
            return Err(LayerError::AlreadyPlaced(id));
        }
        let location = location.on_layer(self.kind);
        let anchor = location.cell().ok_or(LayerError::UnresolvedLocation)?;
        let placed = PlacedEntity {
            id,
            location,
            region: CellRect::new(anchor, footprint),
        };
        self.index(&placed);
        let _ = self.entries.insert(id, placed);
        Ok(placed)
    }

    /// Removes an entity, returning its last placement.
    pub fn remove(&mut self, id: EntityId) -> Option<PlacedEntity> {
        let placed = self.entries.remove(&id)?;
        self.unindex(&placed);
        Some(placed)
    }

    /// Moves an entity to a new location, keeping its footprint.
    ///
    /// The entity keeps its previous placement when the new location does
    /// not resolve to a cell.
    pub fn relocate(&mut self, id: EntityId, location: Location) -> Result<PlacedEntity, LayerError> {
        let location = location.on_layer(self.kind);
        let anchor = location.cell().ok_or(LayerError::UnresolvedLocation)?;
        let previous = self.remove(id).ok_or(LayerError::NotPlaced(id))?;
        let placed = PlacedEntity {
            id,
            location,
            region: CellRect::new(anchor, previous.region.footprint()),
        };
        self.index(&placed);
        let _ = self.entries.insert(id, placed);
        Ok(placed)
    }

    /// Returns the placement of an entity, if present.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.entries.get(&id)
    }

    /// Number of entities on the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the layer holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest and largest covered cells, or `None` when the layer is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(CellCoord, CellCoord)> {
        let mut cells = self.cells.keys();
        let first = *cells.next()?;
        let (mut min_column, mut min_row) = (first.column(), first.row());
        let (mut max_column, mut max_row) = (min_column, min_row);
        for cell in cells {
            min_column = min_column.min(cell.column());
            min_row = min_row.min(cell.row());
            max_column = max_column.max(cell.column());
            max_row = max_row.max(cell.row());
        }
        Some((
            CellCoord::new(min_column, min_row),
            CellCoord::new(max_column, max_row),
        ))
    }

    /// Drops every entity, returning how many were released.
    pub fn clear(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        self.cells.clear();
        released
    }

    fn index(&mut self, placed: &PlacedEntity) {
        for cell in placed.region.cells() {
            self.cells.entry(cell).or_default().push(placed.id);
        }
    }

    fn unindex(&mut self, placed: &PlacedEntity) {
        for cell in placed.region.cells() {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|id| *id != placed.id);
                if ids.is_empty() {
                    let _ = self.cells.remove(&cell);
                }
            }
        }
    }
}

impl<M: DistanceMetric> SpatialLayer for GridLayer<M> {
    fn entities_at(&self, cell: CellCoord) -> Vec<PlacedEntity> {
        self.cells
            .get(&cell)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.entries.get(id).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entities(&self) -> Vec<PlacedEntity> {
        self.entries.values().copied().collect()
    }

    fn distance(&self, a: &Location, b: &Location) -> f32 {
        self.metric.distance(a.point(), b.point())
    }
}

/// The three fixed layers of the map, addressed by [`LayerKind`].
#[derive(Clone, Debug)]
pub struct Layers {
    water: GridLayer,
    land: GridLayer,
    units: GridLayer,
}

impl Layers {
    /// Creates empty layers sharing one distance metric.
    #[must_use]
    pub fn new(metric: MetricKind) -> Self {
        Self {
            water: GridLayer::new(LayerKind::Water, metric),
            land: GridLayer::new(LayerKind::Land, metric),
            units: GridLayer::new(LayerKind::Units, metric),
        }
    }

    /// Read access to a layer.
    #[must_use]
    pub const fn layer(&self, kind: LayerKind) -> &GridLayer {
        match kind {
            LayerKind::Water => &self.water,
            LayerKind::Land => &self.land,
            LayerKind::Units => &self.units,
        }
    }

    /// Write access to a layer.
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut GridLayer {
        match kind {
            LayerKind::Water => &mut self.water,
            LayerKind::Land => &mut self.land,
            LayerKind::Units => &mut self.units,
        }
    }

    /// Finds the layer holding the entity together with its placement.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<(LayerKind, PlacedEntity)> {
        LayerKind::ALL.into_iter().find_map(|kind| {
            self.layer(kind)
                .get(id)
                .map(|placed| (kind, *placed))
        })
    }

    /// Removes the entity from whichever layer holds it.
    pub fn remove(&mut self, id: EntityId) -> Option<(LayerKind, PlacedEntity)> {
        LayerKind::ALL
            .into_iter()
            .find_map(|kind| self.layer_mut(kind).remove(id).map(|placed| (kind, placed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footprint(width: u32, height: u32) -> Footprint {
        Footprint::new(width, height).expect("valid footprint")
    }

    #[test]
    fn insert_indexes_every_covered_cell() {
        let mut layer = GridLayer::new(LayerKind::Units, MetricKind::Euclidean);
        let placed = layer
            .insert(
                EntityId::new(4),
                Location::at_cell(LayerKind::Units, CellCoord::new(2, 3)),
                footprint(2, 2),
            )
            .expect("placement succeeds");

        assert_eq!(placed.region.origin(), CellCoord::new(2, 3));
        for cell in [(2, 3), (3, 3), (2, 4), (3, 4)] {
            let found = layer.entities_at(CellCoord::new(cell.0, cell.1));
            assert_eq!(found.len(), 1, "cell {cell:?} should be covered");
        }
        assert!(layer.entities_at(CellCoord::new(4, 3)).is_empty());
    }

    #[test]
    fn insert_rejects_duplicate_ids_and_unresolved_locations() {
        let mut layer = GridLayer::new(LayerKind::Land, MetricKind::Euclidean);
        let id = EntityId::new(1);
        let location = Location::at_cell(LayerKind::Land, CellCoord::new(0, 0));
        assert!(layer.insert(id, location, Footprint::SINGLE).is_ok());
        assert_eq!(
            layer.insert(id, location, Footprint::SINGLE),
            Err(LayerError::AlreadyPlaced(id))
        );

        let nowhere = Location::new(LayerKind::Land, Vec2::new(f32::NAN, 1.0));
        assert_eq!(
            layer.insert(EntityId::new(2), nowhere, Footprint::SINGLE),
            Err(LayerError::UnresolvedLocation)
        );
    }

    #[test]
    fn relocate_moves_the_whole_footprint() {
        let mut layer = GridLayer::new(LayerKind::Units, MetricKind::Euclidean);
        let id = EntityId::new(9);
        let _ = layer
            .insert(
                id,
                Location::at_cell(LayerKind::Units, CellCoord::new(0, 0)),
                footprint(2, 1),
            )
            .expect("placement succeeds");

        let moved = layer
            .relocate(id, Location::new(LayerKind::Units, Vec2::new(5.7, 1.2)))
            .expect("relocation succeeds");

        assert_eq!(moved.region.origin(), CellCoord::new(5, 1));
        assert!(layer.entities_at(CellCoord::new(0, 0)).is_empty());
        assert!(layer.entities_at(CellCoord::new(1, 0)).is_empty());
        assert_eq!(layer.entities_at(CellCoord::new(6, 1)).len(), 1);
    }

    #[test]
    fn relocate_to_unresolved_location_keeps_previous_placement() {
        let mut layer = GridLayer::new(LayerKind::Units, MetricKind::Euclidean);
        let id = EntityId::new(3);
        let start = Location::at_cell(LayerKind::Units, CellCoord::new(1, 1));
        let _ = layer
            .insert(id, start, Footprint::SINGLE)
            .expect("placement succeeds");

        let nowhere = Location::new(LayerKind::Units, Vec2::new(f32::INFINITY, 0.0));
        assert_eq!(layer.relocate(id, nowhere), Err(LayerError::UnresolvedLocation));
        assert_eq!(layer.get(id).map(|placed| placed.location), Some(start));
    }

    #[test]
    fn bounds_span_all_covered_cells() {
        let mut layer = GridLayer::new(LayerKind::Land, MetricKind::Euclidean);
        assert_eq!(layer.bounds(), None);
        let _ = layer
            .insert(
                EntityId::new(0),
                Location::at_cell(LayerKind::Land, CellCoord::new(-2, 5)),
                Footprint::SINGLE,
            )
            .expect("placement succeeds");
        let _ = layer
            .insert(
                EntityId::new(1),
                Location::at_cell(LayerKind::Land, CellCoord::new(3, 1)),
                footprint(2, 2),
            )
            .expect("placement succeeds");

        assert_eq!(
            layer.bounds(),
            Some((CellCoord::new(-2, 1), CellCoord::new(4, 5)))
        );
    }

    #[test]
    fn metrics_measure_the_same_offset_differently() {
        let a = Vec2::ZERO;
        let b = Vec2::new(3.0, 4.0);
        assert!((MetricKind::Euclidean.distance(a, b) - 5.0).abs() < f32::EPSILON);
        assert!((MetricKind::Manhattan.distance(a, b) - 7.0).abs() < f32::EPSILON);
        assert!((MetricKind::Chebyshev.distance(a, b) - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn layers_locate_and_remove_by_id() {
        let mut layers = Layers::new(MetricKind::Euclidean);
        let id = EntityId::new(11);
        let _ = layers
            .layer_mut(LayerKind::Land)
            .insert(
                id,
                Location::at_cell(LayerKind::Land, CellCoord::new(0, 0)),
                Footprint::SINGLE,
            )
            .expect("placement succeeds");

        assert_eq!(layers.locate(id).map(|(kind, _)| kind), Some(LayerKind::Land));
        assert_eq!(layers.remove(id).map(|(kind, _)| kind), Some(LayerKind::Land));
        assert_eq!(layers.locate(id), None);
    }
}
