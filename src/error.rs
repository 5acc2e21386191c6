// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error type for surface and solid construction

use crate::geometry::EdgeSide;
use thiserror::Error;

/// Errors raised while configuring or constructing geometry
#[derive(Error, Debug)]
pub enum Error {
    #[error("{side} edge expects {expected} vertex indices, got {actual}")]
    EdgeLengthMismatch {
        side: EdgeSide,
        expected: usize,
        actual: usize,
    },
    #[error("{side} edge replacement must be traversed clockwise in its source face")]
    WindingMismatch { side: EdgeSide },
    #[error("modulation amplitude cannot be negative (got {0})")]
    NegativeAmplitude(f64),
    #[error("ellipse axis cannot have zero length")]
    DegenerateAxis,
    #[error("voxel size must be positive (got {0})")]
    InvalidVoxelSize(f64),
    #[error("sample spacing must be positive (got {0})")]
    InvalidSpacing(f64),
    #[error("sample spacing {spacing} needs more than {limit} lattice points")]
    LatticeTooLarge { spacing: f64, limit: usize },
    #[error("invalid scene: {0}")]
    Config(String),
    #[error("error occurred during i/o operation: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
