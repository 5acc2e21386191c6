// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Paramesh CLI

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use env_logger::Env;
use log::info;
use nalgebra::{Point3, Vector3};
use paramesh::geometry::analytics::analyze;
use paramesh::geometry::{
    sample_grid, BaseBox, BaseCylinder, Bounded, BoundingBox, BoxConfig, BoxModulations, Circle,
    CylinderConfig, Ellipse, GaussModulation, ImageModulation, ImplicitGyroid, ImplicitSphere,
    LocalFrame, Mesh, NoopModulation, RandomModulation, SineWaveModulation, SurfaceModulation,
    TransformModulation,
};
use paramesh::io::{export_stl, load_raster, Scene};
use paramesh::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "paramesh")]
#[command(version, about = "Parametric surfaces, lofted solids and implicit fields", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print geometry analytics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print analytics as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a box from six stitched, modulated grids
    Box {
        /// Edge lengths along X, Y and Z
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [2.0, 2.0, 2.0])]
        size: Vec<f64>,

        /// Grid samples along U on every face
        #[arg(long, default_value_t = 10)]
        subdiv_u: usize,

        /// Grid samples along V on the side faces
        #[arg(long, default_value_t = 10)]
        subdiv_v: usize,

        #[command(flatten)]
        modulation: ModulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Loft a solid from a circular bottom to a circular or elliptic top
    Cylinder {
        /// Bottom radius
        #[arg(long, default_value_t = 10.0)]
        radius: f64,

        /// Top ellipse semi-axis A (circle of `radius` when omitted)
        #[arg(long, requires = "top_b")]
        top_a: Option<f64>,

        /// Top ellipse semi-axis B
        #[arg(long, requires = "top_a")]
        top_b: Option<f64>,

        /// Top ellipse rotation in degrees
        #[arg(long, default_value_t = 0.0)]
        top_angle: f64,

        #[arg(long, default_value_t = 20.0)]
        height: f64,

        /// Target edge length
        #[arg(long, default_value_t = CylinderConfig::default().voxel_size)]
        voxel_size: f64,

        #[command(flatten)]
        modulation: ModulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build every object of a TOML scene file
    Scene {
        /// Scene file
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Sample an implicit field and report inside/outside counts
    Implicit {
        #[arg(value_enum)]
        shape: ImplicitShape,

        /// Sphere radius
        #[arg(long, default_value_t = 3.0)]
        radius: f64,

        /// Gyroid period
        #[arg(long, default_value_t = 2.0)]
        unit_size: f64,

        /// Gyroid wall thickness
        #[arg(long, default_value_t = 0.5)]
        thickness: f64,

        /// Half-extent of the cube the gyroid is sampled in
        #[arg(long, default_value_t = 4.0)]
        extent: f64,

        /// Lattice spacing
        #[arg(long, default_value_t = 0.25)]
        spacing: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum ModulationKind {
    None,
    Random,
    Gauss,
    Sine,
    Image,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ImplicitShape {
    Sphere,
    Gyroid,
}

#[derive(Args)]
struct ModulationArgs {
    /// Surface modulation
    #[arg(long, value_enum, default_value_t = ModulationKind::None)]
    modulation: ModulationKind,

    /// Height the modulation is scaled to
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,

    /// Sine repeats along U and V
    #[arg(long, num_args = 2, value_names = ["RU", "RV"], default_values_t = [1, 1])]
    repeat: Vec<u32>,

    /// Seed for random modulation (process entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Height map for image modulation
    #[arg(long, required_if_eq("modulation", "image"))]
    image: Option<PathBuf>,
}

impl ModulationArgs {
    /// Unscaled modulation function
    fn build(&self) -> Result<Box<dyn SurfaceModulation>> {
        if self.amplitude < 0.0 {
            return Err(Error::NegativeAmplitude(self.amplitude).into());
        }

        let modulation: Box<dyn SurfaceModulation> = match self.modulation {
            ModulationKind::None => Box::new(NoopModulation),
            ModulationKind::Random => Box::new(match self.seed {
                Some(seed) => RandomModulation::with_seed(1.0, seed),
                None => RandomModulation::from_entropy(1.0),
            }),
            ModulationKind::Gauss => Box::new(GaussModulation::default()),
            ModulationKind::Sine => Box::new(SineWaveModulation::new(self.repeat[0], self.repeat[1])),
            ModulationKind::Image => {
                let Some(path) = &self.image else {
                    bail!("--image is required for image modulation");
                };
                let raster = load_raster(path)
                    .with_context(|| format!("Failed to load height map: {}", path.display()))?;
                Box::new(ImageModulation::new(raster))
            }
        };
        Ok(modulation)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (binary STL for `.stl`, ASCII otherwise)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Box {
            size,
            subdiv_u,
            subdiv_v,
            modulation,
            output,
        } => {
            let config = BoxConfig {
                size: Vector3::new(size[0], size[1], size[2]),
                center: Point3::origin(),
                subdiv_u: *subdiv_u,
                subdiv_v: *subdiv_v,
            };
            let scaled = TransformModulation::new(modulation.build()?).scale(modulation.amplitude);

            let start = Instant::now();
            let mesh = BaseBox::new(config)
                .construct(&BoxModulations::uniform(&scaled))
                .context("Failed to build box")?;
            info!("Built box in {:.2?}", start.elapsed());

            finish(&cli, &mesh, &output.output)?;
        }
        Commands::Cylinder {
            radius,
            top_a,
            top_b,
            top_angle,
            height,
            voxel_size,
            modulation,
            output,
        } => {
            let frame = LocalFrame::world();
            let base = match (top_a, top_b) {
                (Some(a), Some(b)) => BaseCylinder::new(
                    frame,
                    Circle::new(*radius),
                    Ellipse::new(*a, *b, top_angle.to_radians()),
                    *height,
                ),
                _ => BaseCylinder::circular(frame, *radius, *height),
            };
            let mut cylinder = base
                .with_config(CylinderConfig {
                    voxel_size: *voxel_size,
                })
                .context("Invalid cylinder configuration")?;
            cylinder
                .set_surface_modulation(modulation.build()?, modulation.amplitude)
                .context("Invalid modulation")?;

            let (n_sub_u, n_sub_v) = cylinder.subdivisions();
            let start = Instant::now();
            let mesh = cylinder.construct();
            info!(
                "Built {}x{} cylinder in {:.2?}",
                n_sub_u,
                n_sub_v,
                start.elapsed()
            );

            finish(&cli, &mesh, &output.output)?;
        }
        Commands::Scene { input, output } => {
            if !input.exists() {
                eprintln!("{} Input file not found: {}", "Error:".red(), input.display());
                std::process::exit(1);
            }

            let scene = Scene::load(input)
                .with_context(|| format!("Failed to read scene: {}", input.display()))?;
            let start = Instant::now();
            let mesh = scene
                .build()
                .with_context(|| format!("Failed to build scene: {}", input.display()))?;
            info!("Built scene in {:.2?}", start.elapsed());

            finish(&cli, &mesh, &output.output)?;
        }
        Commands::Implicit {
            shape,
            radius,
            unit_size,
            thickness,
            extent,
            spacing,
        } => {
            let start = Instant::now();
            let grid = match shape {
                ImplicitShape::Sphere => sample_grid(&ImplicitSphere::new(*radius), *spacing)?,
                ImplicitShape::Gyroid => {
                    let field = Bounded::new(
                        ImplicitGyroid::new(*unit_size, *thickness),
                        BoundingBox::centered_cube(*extent),
                    );
                    sample_grid(&field, *spacing)?
                }
            };
            info!("Sampled {:?} in {:.2?}", shape, start.elapsed());

            let inside = grid.inside_count();
            println!(
                "{} {}x{}x{} samples, {} inside, {} outside ({:.1}% filled)",
                "✓".green(),
                grid.dims[0],
                grid.dims[1],
                grid.dims[2],
                inside.to_string().bold(),
                grid.len() - inside,
                100.0 * inside as f64 / grid.len() as f64
            );
        }
    }

    Ok(())
}

/// Export the mesh and report what was written
fn finish(cli: &Cli, mesh: &Mesh, output: &Path) -> Result<()> {
    if mesh.triangle_count() == 0 {
        bail!("Nothing to export: mesh is empty");
    }

    export_stl(mesh, output)
        .with_context(|| format!("Failed to export mesh: {}", output.display()))?;

    println!(
        "{} {} vertices, {} triangles -> {}",
        "✓".green(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        output.display().to_string().bold()
    );

    if cli.verbose || cli.json {
        let stats = analyze(mesh);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            stats.print();
        }
        if !stats.is_watertight {
            println!("{} mesh is not watertight", "⚠".yellow());
        }
    }

    Ok(())
}
