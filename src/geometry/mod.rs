// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - parametric surfaces, swept solids and implicit fields

mod bbox;
mod base_box;
mod base_cylinder;
mod contour;
mod face;
mod frame;
mod grid;
mod mesh;

pub mod analytics;
pub mod implicit;
pub mod mesh_utils;
pub mod modulation;

pub use base_box::{BaseBox, BoxConfig, BoxModulations};
pub use base_cylinder::{BaseCylinder, CylinderConfig};
pub use bbox::BoundingBox;
pub use contour::{Circle, Ellipse, NormalizedContour2d, OrientedContour};
pub use face::Face;
pub use frame::LocalFrame;
pub use grid::{EdgeSequence, EdgeSide, Grid, Winding};
pub use implicit::{
    sample_grid, Bounded, BoundedImplicit, Implicit, ImplicitGyroid, ImplicitSphere, SampleGrid,
};
pub use mesh::{Mesh, MeshSink, Triangle, Vertex};
pub use modulation::{
    GaussModulation, ImageModulation, NoopModulation, RandomModulation, Raster, ScalarRaster,
    SineWaveModulation, SurfaceModulation, TransformModulation,
};
