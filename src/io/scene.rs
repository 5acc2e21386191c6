// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! TOML scene descriptions
//!
//! A scene holds at most one box and one swept solid:
//!
//! ```toml
//! [cylinder]
//! height = 20.0
//! voxel_size = 1.0
//! bottom = { kind = "circle", radius = 10.0 }
//! top = { kind = "ellipse", a = 20.0, b = 10.0 }
//! modulation = { kind = "sine", repeat_u = 30, repeat_v = 2, amplitude = 1.0 }
//!
//! [box]
//! size = [10.0, 10.0, 10.0]
//! subdiv_u = 20
//! modulation = { kind = "gauss", sigma_u = 0.2, sigma_v = 0.2, amplitude = 2.0 }
//! ```

use super::load_raster;
use crate::error::{Error, Result};
use crate::geometry::{
    BaseBox, BaseCylinder, BoxConfig, BoxModulations, Circle, CylinderConfig, Ellipse,
    GaussModulation, ImageModulation, LocalFrame, Mesh, NoopModulation, NormalizedContour2d,
    RandomModulation, SineWaveModulation, SurfaceModulation, TransformModulation,
};
use log::debug;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cross-section of a swept solid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContourSpec {
    Circle {
        radius: f64,
    },
    Ellipse {
        a: f64,
        b: f64,
        /// Rotation in degrees
        #[serde(default)]
        angle: f64,
    },
}

impl ContourSpec {
    pub fn build(&self) -> Box<dyn NormalizedContour2d> {
        match *self {
            ContourSpec::Circle { radius } => Box::new(Circle::new(radius)),
            ContourSpec::Ellipse { a, b, angle } => Box::new(Ellipse::new(a, b, angle.to_radians())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModulationKind {
    None,
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    Gauss {
        #[serde(default = "default_sigma")]
        sigma_u: f64,
        #[serde(default = "default_sigma")]
        sigma_v: f64,
    },
    Sine {
        #[serde(default = "default_repeat")]
        repeat_u: u32,
        #[serde(default = "default_repeat")]
        repeat_v: u32,
    },
    Image {
        /// Resolved against the scene file's directory
        path: PathBuf,
        #[serde(default)]
        flip_u: bool,
        #[serde(default)]
        flip_v: bool,
    },
}

fn default_sigma() -> f64 {
    GaussModulation::default().sigma_u
}

fn default_repeat() -> u32 {
    1
}

fn default_amplitude() -> f64 {
    1.0
}

/// Modulation function plus the height it is scaled to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationSpec {
    #[serde(flatten)]
    pub kind: ModulationKind,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
}

impl ModulationSpec {
    /// Unscaled modulation function
    pub fn build(&self, base_dir: &Path) -> Result<Box<dyn SurfaceModulation>> {
        if self.amplitude < 0.0 {
            return Err(Error::NegativeAmplitude(self.amplitude));
        }

        let modulation: Box<dyn SurfaceModulation> = match &self.kind {
            ModulationKind::None => Box::new(NoopModulation),
            ModulationKind::Random { seed } => Box::new(RandomModulation::with_seed(
                1.0,
                seed.unwrap_or(RandomModulation::DEFAULT_SEED),
            )),
            ModulationKind::Gauss { sigma_u, sigma_v } => {
                Box::new(GaussModulation::new(*sigma_u, *sigma_v))
            }
            ModulationKind::Sine { repeat_u, repeat_v } => {
                Box::new(SineWaveModulation::new(*repeat_u, *repeat_v))
            }
            ModulationKind::Image {
                path,
                flip_u,
                flip_v,
            } => {
                let raster = load_raster(base_dir.join(path))?;
                Box::new(
                    TransformModulation::new(ImageModulation::new(raster))
                        .flip_u(*flip_u)
                        .flip_v(*flip_v),
                )
            }
        };
        Ok(modulation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScene {
    #[serde(flatten)]
    pub config: BoxConfig,
    #[serde(default)]
    pub modulation: Option<ModulationSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderScene {
    pub height: f64,
    #[serde(default)]
    pub center: Option<Point3<f64>>,
    #[serde(flatten)]
    pub config: CylinderConfig,
    pub bottom: ContourSpec,
    /// Defaults to the bottom contour
    #[serde(default)]
    pub top: Option<ContourSpec>,
    #[serde(default)]
    pub modulation: Option<ModulationSpec>,
}

/// Objects to build, merged into a single mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, rename = "box")]
    pub base_box: Option<BoxScene>,
    #[serde(default)]
    pub cylinder: Option<CylinderScene>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Scene {
    /// Parse a scene; relative image paths resolve against the working directory
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let mut scene = Self::from_toml_str(&source)?;
        scene.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(scene)
    }

    pub fn build(&self) -> Result<Mesh> {
        if self.base_box.is_none() && self.cylinder.is_none() {
            return Err(Error::Config("scene defines no objects".to_string()));
        }

        let mut mesh = Mesh::new();

        if let Some(spec) = &self.base_box {
            let modulation = match &spec.modulation {
                Some(m) => Box::new(TransformModulation::new(m.build(&self.base_dir)?).scale(m.amplitude))
                    as Box<dyn SurfaceModulation>,
                None => Box::new(NoopModulation),
            };
            let part = BaseBox::new(spec.config).construct(&BoxModulations::uniform(modulation.as_ref()))?;
            debug!("box: {} triangles", part.triangle_count());
            mesh.merge(&part);
        }

        if let Some(spec) = &self.cylinder {
            if spec.height <= 0.0 {
                return Err(Error::Config(format!(
                    "cylinder height must be positive (got {})",
                    spec.height
                )));
            }

            let frame = LocalFrame::at(spec.center.unwrap_or_else(Point3::origin));
            let bottom = spec.bottom.build();
            let top = spec.top.as_ref().unwrap_or(&spec.bottom).build();

            let mut cylinder =
                BaseCylinder::new(frame, bottom, top, spec.height).with_config(spec.config)?;
            if let Some(m) = &spec.modulation {
                cylinder.set_surface_modulation(m.build(&self.base_dir)?, m.amplitude)?;
            }

            let part = cylinder.construct();
            debug!("cylinder: {} triangles", part.triangle_count());
            mesh.merge(&part);
        }

        Ok(mesh)
    }
}
