//! Radius-based spatial queries.

use harbor_core::{
    DistanceMetric, HighlightOverlay, HighlightStyle, Location, PlacedEntity, SpatialLayer,
};
use tracing::debug;

/// Returns every entity on `layer` within `radius` of `origin`.
///
/// Distances use the layer's own metric and the bound is inclusive. The
/// overlay is cleared and then every returned entity is outlined with
/// `style`, so repeated calls never leave stale highlights behind. Results
/// follow the layer's iteration order.
pub fn query_radius<L, O>(
    layer: &L,
    origin: &Location,
    radius: f32,
    overlay: &mut O,
    style: HighlightStyle,
) -> Vec<PlacedEntity>
where
    L: SpatialLayer + ?Sized,
    O: HighlightOverlay + ?Sized,
{
    let found: Vec<PlacedEntity> = layer
        .entities()
        .into_iter()
        .filter(|placed| layer.distance(&placed.location, origin) <= radius)
        .collect();

    overlay.clear_highlights();
    for placed in &found {
        overlay.add_highlight(placed.id, style.color, style.width);
    }
    debug!(radius, found = found.len(), "radius query");
    found
}

/// Reports whether `b` lies within `radius` of `a` under `metric`.
#[must_use]
pub fn in_radius<M>(metric: &M, a: &Location, b: &Location, radius: f32) -> bool
where
    M: DistanceMetric + ?Sized,
{
    metric.distance(a.point(), b.point()) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layers::{GridLayer, MetricKind},
        overlay::HighlightSet,
    };
    use glam::Vec2;
    use harbor_core::{CellCoord, EntityId, Footprint, HighlightColor, LayerKind};

    const STYLE: HighlightStyle = HighlightStyle::new(HighlightColor::BLACK, 2);

    fn land_with(cells: &[(i32, i32)]) -> GridLayer {
        let mut layer = GridLayer::new(LayerKind::Land, MetricKind::Euclidean);
        for (index, (column, row)) in cells.iter().enumerate() {
            let _ = layer
                .insert(
                    EntityId::new(index as u64),
                    Location::at_cell(LayerKind::Land, CellCoord::new(*column, *row)),
                    Footprint::SINGLE,
                )
                .expect("placement succeeds");
        }
        layer
    }

    #[test]
    fn zero_radius_returns_entities_at_origin_only() {
        let layer = land_with(&[(0, 0), (0, 1), (1, 0)]);
        let mut overlay = HighlightSet::new();
        let origin = Location::at_cell(LayerKind::Land, CellCoord::new(0, 0));

        let found = query_radius(&layer, &origin, 0.0, &mut overlay, STYLE);

        assert_eq!(
            found.iter().map(|placed| placed.id).collect::<Vec<_>>(),
            vec![EntityId::new(0)]
        );
    }

    #[test]
    fn query_replaces_previous_highlights() {
        let layer = land_with(&[(0, 0), (5, 5)]);
        let mut overlay = HighlightSet::new();

        let _ = query_radius(
            &layer,
            &Location::at_cell(LayerKind::Land, CellCoord::new(5, 5)),
            1.0,
            &mut overlay,
            STYLE,
        );
        assert!(overlay.get(EntityId::new(1)).is_some());

        let _ = query_radius(
            &layer,
            &Location::at_cell(LayerKind::Land, CellCoord::new(0, 0)),
            1.0,
            &mut overlay,
            STYLE,
        );
        assert_eq!(overlay.len(), 1);
        assert!(overlay.get(EntityId::new(0)).is_some());
        assert!(overlay.get(EntityId::new(1)).is_none());
    }

    #[test]
    fn empty_result_still_clears_highlights() {
        let layer = land_with(&[(0, 0)]);
        let mut overlay = HighlightSet::new();
        overlay.add_highlight(EntityId::new(42), HighlightColor::WHITE, 1);

        let found = query_radius(
            &layer,
            &Location::new(LayerKind::Land, Vec2::new(50.0, 50.0)),
            3.0,
            &mut overlay,
            STYLE,
        );

        assert!(found.is_empty());
        assert!(overlay.is_empty());
    }

    #[test]
    fn in_radius_bound_is_inclusive() {
        let origin = Location::new(LayerKind::Land, Vec2::ZERO);
        let point = Location::new(LayerKind::Land, Vec2::new(3.0, 4.0));

        assert!(in_radius(&MetricKind::Euclidean, &origin, &point, 5.0));
        assert!(!in_radius(&MetricKind::Euclidean, &origin, &point, 4.0));
    }
}
