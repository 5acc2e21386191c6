// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Height-map loading for image modulation

use crate::error::Result;
use image::GrayImage;
use log::debug;
use std::path::Path;

/// Load any image format supported by `image` as 8-bit grayscale
pub fn load_raster(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_luma8();
    debug!(
        "loaded {}x{} raster from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}
