use aemview_assets::{ModelBatch, load_models};
use aemview_render::{DrawSequence, UniformLayout};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aemview-cli", about = "CLI tool for AEM model files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print headers, meshes, materials, textures and the draw sequence
    Inspect {
        /// Model files, merged in the order given
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Uniform offset alignment used to lay out world slots
        #[arg(short, long, default_value = "256")]
        alignment: u64,
    },
    /// Check that each file decodes; fails on the first bad file
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the uniform buffer layout for a device alignment
    Layout {
        /// Minimum uniform buffer offset alignment (power of two)
        #[arg(short, long, default_value = "256")]
        alignment: u64,
        /// Number of objects with their own world matrix slot
        #[arg(short, long, default_value = "1")]
        objects: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Inspect { paths, alignment } => {
            let batch = load_models(&paths).context("failed to load models")?;
            tracing::info!(
                models = batch.models.len(),
                vertices = batch.vertex_count(),
                indices = batch.indices.len(),
                "batch loaded"
            );
            print!("{}", inspect_report(&batch, alignment)?);
        }
        Commands::Validate { paths } => {
            tracing::info!(files = paths.len(), "validating");
            for path in &paths {
                let batch = load_models(&[path])
                    .with_context(|| format!("{} is not a valid AEM file", path.display()))?;
                println!(
                    "{}: ok ({} vertices, {} indices, {} meshes)",
                    path.display(),
                    batch.vertex_count(),
                    batch.indices.len(),
                    batch.models.iter().map(|m| m.meshes.len()).sum::<usize>()
                );
            }
        }
        Commands::Layout { alignment, objects } => {
            let layout = UniformLayout::scene(objects, alignment)?;
            tracing::debug!(alignment, objects, "computed uniform layout");
            print!("{}", layout_report(&layout));
        }
    }

    Ok(())
}

fn inspect_report(batch: &ModelBatch, alignment: u64) -> anyhow::Result<String> {
    let layout = UniformLayout::scene(batch.models.len() as u32, alignment)?;
    let sequence = DrawSequence::assemble(
        batch
            .mesh_lists()
            .enumerate()
            .map(|(i, meshes)| (meshes, layout.slot_offset(i as u32))),
    )?;
    tracing::debug!(draws = sequence.len(), "assembled draw sequence");

    let mut out = String::new();
    for (i, model) in batch.models.iter().enumerate() {
        let h = &model.header;
        writeln!(out, "model {i}: {}", model.path.display())?;
        writeln!(
            out,
            "  version={} vertices={} indices={} meshes={} materials={} textures={}",
            h.version,
            h.vertex_count,
            h.index_count,
            h.mesh_count,
            h.material_count,
            h.texture_count
        )?;
        for (m, mesh) in model.meshes.iter().enumerate() {
            writeln!(
                out,
                "  mesh {m}: indices={} first_index={} first_vertex={} material={}",
                mesh.index_count, mesh.first_index, mesh.first_vertex, mesh.material
            )?;
        }
    }
    for (i, material) in batch.materials.iter().enumerate() {
        writeln!(
            out,
            "material {i}: diffuse={} normal={}",
            material.diffuse, material.normal
        )?;
    }
    for (i, name) in batch.textures.iter().enumerate() {
        writeln!(out, "texture {i}: {name}")?;
    }
    write!(out, "{sequence}")?;
    Ok(out)
}

fn layout_report(layout: &UniformLayout) -> String {
    let mut out = format!(
        "alignment={}\nstatic_size={}\ndynamic_offset={}\nslot_size={}\n",
        layout.alignment(),
        layout.static_size(),
        layout.dynamic_offset(),
        layout.slot_size()
    );
    for slot in 0..layout.slots() {
        out.push_str(&format!("slot {slot}: offset={}\n", layout.slot_offset(slot)));
    }
    out.push_str(&format!("total_size={}\n", layout.total_size()));
    out
}
