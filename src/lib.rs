// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Paramesh
//!
//! Procedural construction of meshes from parametric faces and swept
//! contours, with scalar surface modulation and implicit signed-distance
//! primitives for voxel pipelines.
//!
//! ```no_run
//! use paramesh::geometry::{BaseCylinder, Circle, Ellipse, LocalFrame, SineWaveModulation};
//!
//! let mut cylinder = BaseCylinder::new(
//!     LocalFrame::world(),
//!     Circle::new(10.0),
//!     Ellipse::new(20.0, 10.0, 0.0),
//!     20.0,
//! );
//! cylinder.set_surface_modulation(SineWaveModulation::new(30, 2), 1.0)?;
//! let mesh = cylinder.construct();
//! paramesh::io::export_stl(&mesh, "loft.stl")?;
//! # Ok::<(), paramesh::Error>(())
//! ```

pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use error::{Error, Result};
pub use geometry::{BaseBox, BaseCylinder, Mesh};
pub use io::{export_stl, import_stl, Scene};
