//! Isometric screen/map coordinate conversion.

use std::f32::consts::SQRT_2;

use glam::{Mat2, Vec2};
use harbor_core::CoordinateConverter;

const DEFAULT_CELL_WIDTH: f32 = 32.0;
const DEFAULT_CELL_HEIGHT: f32 = 16.0;
const DEFAULT_ROTATION_DEGREES: f32 = 45.0;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 1.0;

/// Affine isometric projection centred on a camera position.
///
/// `screen = viewport_center + zoom * S * R(rotation) * (map - camera)`, where
/// `S` scales the rotated axes so that one cell spans `cell_width` by
/// `cell_height` pixels at a 45 degree rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsometricProjection {
    camera: Vec2,
    viewport_center: Vec2,
    cell_size: Vec2,
    rotation_degrees: f32,
    zoom: f32,
}

impl Default for IsometricProjection {
    fn default() -> Self {
        Self {
            camera: Vec2::ZERO,
            viewport_center: Vec2::ZERO,
            cell_size: Vec2::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT),
            rotation_degrees: DEFAULT_ROTATION_DEGREES,
            zoom: MAX_ZOOM,
        }
    }
}

impl IsometricProjection {
    /// Centres the projection on a map position.
    #[must_use]
    pub fn with_camera(mut self, camera: Vec2) -> Self {
        self.camera = camera;
        self
    }

    /// Sets the viewport size; the camera is drawn at its centre.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_center = Vec2::new(width, height) * 0.5;
        self
    }

    /// Sets the map rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = degrees.rem_euclid(360.0);
        self
    }

    /// Sets the zoom factor, clamped to `0.25..=1.0`.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    fn transform(&self) -> Mat2 {
        let scale = Mat2::from_diagonal(self.cell_size / SQRT_2);
        let rotation = Mat2::from_angle(self.rotation_degrees.to_radians());
        scale * rotation * self.zoom
    }
}

impl CoordinateConverter for IsometricProjection {
    fn to_map(&self, screen: Vec2) -> Vec2 {
        self.camera + self.transform().inverse() * (screen - self.viewport_center)
    }

    fn to_screen(&self, map: Vec2) -> Vec2 {
        self.viewport_center + self.transform() * (map - self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_is_drawn_at_viewport_centre() {
        let projection = IsometricProjection::default()
            .with_camera(Vec2::new(12.0, 12.0))
            .with_viewport(800.0, 600.0);

        let screen = projection.to_screen(Vec2::new(12.0, 12.0));
        assert!((screen - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn default_rotation_draws_map_x_axis_down_and_right() {
        let projection = IsometricProjection::default();
        let screen = projection.to_screen(Vec2::new(1.0, 0.0));

        assert!((screen - Vec2::new(16.0, 8.0)).length() < 1e-3, "{screen:?}");
    }

    #[test]
    fn to_map_inverts_to_screen() {
        let projection = IsometricProjection::default()
            .with_camera(Vec2::new(-3.0, 7.5))
            .with_viewport(1024.0, 768.0)
            .with_rotation(135.0)
            .with_zoom(0.5);
        let map = Vec2::new(10.25, -4.0);

        let restored = projection.to_map(projection.to_screen(map));
        assert!((restored - map).length() < 1e-3, "{restored:?}");
    }

    #[test]
    fn zoom_is_clamped() {
        assert!((IsometricProjection::default().with_zoom(4.0).zoom() - 1.0).abs() < f32::EPSILON);
        assert!((IsometricProjection::default().with_zoom(0.0).zoom() - 0.25).abs() < f32::EPSILON);
    }
}
