// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL export and import

use crate::error::Result;
use crate::geometry::{Mesh, Triangle, Vertex};
use log::debug;
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

/// Export mesh to STL.
///
/// Paths ending in `.stl` are written as binary STL, anything else as ASCII.
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let binary = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));

    if binary {
        export_stl_binary(mesh, path)?;
    } else {
        export_stl_ascii(mesh, path)?;
    }

    debug!(
        "wrote {} triangles to {} ({})",
        mesh.triangle_count(),
        path.display(),
        if binary { "binary" } else { "ascii" }
    );
    Ok(())
}

/// Facet normal from the winding, zero for degenerate triangles
fn facet_normal(mesh: &Mesh, triangle: &Triangle) -> Vector3<f64> {
    mesh.triangle_normal(triangle).unwrap_or_else(Vector3::zeros)
}

fn to_stl_vertex(point: &Point3<f64>) -> StlVertex {
    StlVertex::new([point.x as f32, point.y as f32, point.z as f32])
}

fn export_stl_binary(mesh: &Mesh, path: &Path) -> Result<()> {
    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|triangle| {
            let normal = facet_normal(mesh, triangle);
            let [v0, v1, v2] = triangle.indices.map(|i| to_stl_vertex(&mesh.position(i)));

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [v0, v1, v2],
            }
        })
        .collect();

    let mut file = BufWriter::new(File::create(path)?);
    stl_io::write_stl(&mut file, triangles.iter())?;
    file.flush()?;

    Ok(())
}

fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "solid paramesh")?;

    for triangle in &mesh.triangles {
        let normal = facet_normal(mesh, triangle);
        writeln!(file, "  facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(file, "    outer loop")?;
        for &index in &triangle.indices {
            let p = mesh.position(index);
            writeln!(file, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }

    writeln!(file, "endsolid paramesh")?;
    file.flush()?;

    Ok(())
}

/// Load an STL file (binary or ASCII).
///
/// Coincident vertices are merged by the reader, so a closed solid comes
/// back as a closed indexed mesh.
pub fn import_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let mut file = File::open(path.as_ref())?;
    let stl = stl_io::read_stl(&mut file)?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for v in &stl.vertices {
        mesh.push_vertex(Vertex::new(
            Point3::new(v[0] as f64, v[1] as f64, v[2] as f64),
            Vector3::zeros(),
        ));
    }
    for face in &stl.faces {
        mesh.push_triangle(Triangle::new(face.vertices));
    }
    mesh.recompute_normals();

    debug!(
        "read {} vertices, {} triangles from {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.as_ref().display()
    );
    Ok(mesh)
}
