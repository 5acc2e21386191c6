// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh export/import, height maps and scene files

mod compare;
mod raster;
mod scene;
mod stl;

pub use compare::{compare_meshes, compare_triangle_count_with_tolerance, MeshComparison};
pub use raster::load_raster;
pub use scene::{BoxScene, ContourSpec, CylinderScene, ModulationKind, ModulationSpec, Scene};
pub use stl::{export_stl, import_stl};
