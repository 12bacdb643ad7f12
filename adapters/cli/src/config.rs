//! TOML scenario files describing an island map and a scripted input sequence.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use harbor_core::{BuildingKind, CellCoord, LayerKind, UnitKind};
use harbor_world::{projection::IsometricProjection, WorldConfig, MAX_WATER_MARGIN};
use serde::Deserialize;

const BUNDLED_SCENARIO: &str = include_str!("../scenarios/default.toml");
const DEFAULT_WATER_MARGIN: u32 = 10;

/// Complete scenario: map setup followed by scripted input steps.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    #[serde(default)]
    pub(crate) world: WorldConfig,
    #[serde(default = "default_water_margin")]
    pub(crate) water_margin: u32,
    #[serde(default)]
    pub(crate) islands: Vec<IslandSpec>,
    #[serde(default)]
    pub(crate) buildings: Vec<BuildingSpec>,
    #[serde(default)]
    pub(crate) units: Vec<UnitSpec>,
    #[serde(default)]
    pub(crate) camera: CameraSpec,
    #[serde(default)]
    pub(crate) steps: Vec<Step>,
}

fn default_water_margin() -> u32 {
    DEFAULT_WATER_MARGIN
}

/// Island placed at `offset`, given either as a rectangle or as explicit cells.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IslandSpec {
    offset: [i32; 2],
    size: Option<[u32; 2]>,
    tiles: Option<Vec<[i32; 2]>>,
}

impl IslandSpec {
    pub(crate) fn offset(&self) -> CellCoord {
        CellCoord::new(self.offset[0], self.offset[1])
    }

    /// Island-local cells covered by ground.
    pub(crate) fn tiles(&self) -> Result<Vec<CellCoord>> {
        match (&self.size, &self.tiles) {
            (Some([width, height]), None) => {
                if *width == 0 || *height == 0 {
                    bail!("island size {width}x{height} covers no cells");
                }
                let width = i32::try_from(*width).context("island width exceeds the map range")?;
                let height =
                    i32::try_from(*height).context("island height exceeds the map range")?;
                Ok((0..width)
                    .flat_map(|column| (0..height).map(move |row| CellCoord::new(column, row)))
                    .collect())
            }
            (None, Some(tiles)) => Ok(tiles
                .iter()
                .map(|[column, row]| CellCoord::new(*column, *row))
                .collect()),
            (Some(_), Some(_)) => bail!("island sets both `size` and `tiles`"),
            (None, None) => bail!("island needs either `size` or `tiles`"),
        }
    }
}

/// Map-defined building placed without validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BuildingSpec {
    pub(crate) kind: BuildingKind,
    origin: [i32; 2],
}

impl BuildingSpec {
    pub(crate) fn origin(&self) -> CellCoord {
        CellCoord::new(self.origin[0], self.origin[1])
    }
}

/// Unit spawned at a map position.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct UnitSpec {
    pub(crate) kind: UnitKind,
    pub(crate) name: String,
    position: [f32; 2],
}

impl UnitSpec {
    pub(crate) fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}

/// Camera used to convert scripted screen positions into map positions.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CameraSpec {
    position: [f32; 2],
    viewport: [f32; 2],
    rotation: f32,
    zoom: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            viewport: [800.0, 600.0],
            rotation: 45.0,
            zoom: 1.0,
        }
    }
}

impl CameraSpec {
    pub(crate) fn projection(&self) -> IsometricProjection {
        IsometricProjection::default()
            .with_camera(Vec2::from(self.position))
            .with_viewport(self.viewport[0], self.viewport[1])
            .with_rotation(self.rotation)
            .with_zoom(self.zoom)
    }
}

/// Circular construction area restricting a build.
///
/// Without a radius the building's own collection radius applies.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AreaSpec {
    #[serde(default = "default_area_layer")]
    pub(crate) layer: LayerKind,
    center: [f32; 2],
    pub(crate) radius: Option<f32>,
}

fn default_area_layer() -> LayerKind {
    LayerKind::Land
}

impl AreaSpec {
    pub(crate) fn center(&self) -> Vec2 {
        Vec2::from(self.center)
    }
}

/// Scripted input step.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Step {
    /// Enters build mode, optionally restricted to a construction area.
    StartBuild {
        kind: BuildingKind,
        origin: [f32; 2],
        area: Option<AreaSpec>,
    },
    /// Moves the pointer to a map or screen position.
    Pointer {
        map: Option<[f32; 2]>,
        screen: Option<[f32; 2]>,
    },
    /// Presses the primary button at the pointer.
    Primary,
    /// Presses the secondary button.
    Secondary,
    /// Highlights every entity on a layer within a radius.
    Highlight {
        layer: LayerKind,
        center: [f32; 2],
        radius: f32,
    },
}

impl Scenario {
    /// Loads and validates a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Scenario shipped with the binary.
    pub(crate) fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_SCENARIO).context("invalid bundled scenario")
    }

    /// Parses and validates scenario contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Scenario =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for (index, island) in self.islands.iter().enumerate() {
            let _ = island
                .tiles()
                .with_context(|| format!("island {index} is malformed"))?;
        }

        if self.water_margin > MAX_WATER_MARGIN {
            bail!(
                "water margin {} exceeds the maximum of {MAX_WATER_MARGIN}",
                self.water_margin
            );
        }

        if !(self.camera.zoom.is_finite() && self.camera.zoom > 0.0) {
            bail!("camera zoom must be a positive number, got {}", self.camera.zoom);
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::StartBuild { area, .. } => {
                    if let Some(radius) = area.as_ref().and_then(|area| area.radius) {
                        ensure_radius(radius).with_context(|| {
                            format!("step {index} has an invalid construction area")
                        })?;
                    }
                }
                Step::Pointer { map, screen } => {
                    if map.is_some() == screen.is_some() {
                        bail!("step {index} must give exactly one of `map` or `screen`");
                    }
                }
                Step::Highlight { radius, .. } => {
                    ensure_radius(*radius).with_context(|| format!("step {index} is malformed"))?
                }
                Step::Primary | Step::Secondary => {}
            }
        }
        Ok(())
    }
}

fn ensure_radius(radius: f32) -> Result<()> {
    if !(radius.is_finite() && radius >= 0.0) {
        bail!("radius must be a non-negative number, got {radius}");
    }
    Ok(())
}
