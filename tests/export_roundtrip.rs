// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Round-trip export/import tests

use anyhow::Result;
use paramesh::geometry::{
    BaseBox, BaseCylinder, BoxConfig, BoxModulations, Circle, CylinderConfig, Ellipse,
    LocalFrame, SineWaveModulation,
};
use paramesh::io::{self, compare_meshes};
use tempfile::NamedTempFile;

fn loft() -> Result<paramesh::Mesh> {
    let mut cylinder = BaseCylinder::new(
        LocalFrame::world(),
        Circle::new(10.0),
        Ellipse::new(20.0, 10.0, 0.0),
        20.0,
    )
    .with_config(CylinderConfig { voxel_size: 2.0 })?;
    cylinder.set_surface_modulation(SineWaveModulation::new(6, 2), 1.0)?;
    Ok(cylinder.construct())
}

#[test]
fn test_roundtrip_binary_stl() -> Result<()> {
    let original = loft()?;

    let file = NamedTempFile::with_suffix(".stl")?;
    io::export_stl(&original, file.path())?;

    let metadata = std::fs::metadata(file.path())?;
    // 80 byte header, 4 byte count, 50 bytes per facet
    assert_eq!(metadata.len(), 84 + 50 * original.triangle_count() as u64);

    let loaded = io::import_stl(file.path())?;
    let comparison = compare_meshes(&original, &loaded, 1e-4);

    println!(
        "Round-trip: {} -> {} vertices, volume diff {:.2e}",
        original.vertex_count(),
        loaded.vertex_count(),
        comparison.volume_diff
    );

    assert!(comparison.passed);
    assert!(comparison.vertex_count_match);

    Ok(())
}

#[test]
fn test_roundtrip_ascii_stl() -> Result<()> {
    let config = BoxConfig {
        subdiv_u: 5,
        subdiv_v: 4,
        ..Default::default()
    };
    let original = BaseBox::new(config).construct(&BoxModulations::default())?;

    let file = NamedTempFile::with_suffix(".ascii")?;
    io::export_stl(&original, file.path())?;

    let loaded = io::import_stl(file.path())?;
    let comparison = compare_meshes(&original, &loaded, 1e-4);

    assert!(comparison.passed);
    assert!(comparison.triangle_count_match);

    Ok(())
}
