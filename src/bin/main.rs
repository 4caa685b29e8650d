//! Block Colors CLI
//!
//! Generate the block color lookup table for a map renderer.

use block_colors::{
    count_assets, open_source, BlockReport, ColorTableGenerator, GeneratorConfig, OverrideTable,
    TagMembership,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "block-colors")]
#[command(author, version, about = "Generate block color tables from Minecraft assets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a color table
    Generate {
        /// Client JAR, resource pack ZIP or directory containing `assets/`
        #[arg(short, long)]
        assets: PathBuf,

        /// Block report from the data generator (reports/blocks.json)
        #[arg(short, long)]
        report: PathBuf,

        /// Tag membership JSON ({"tag": ["minecraft:block", ...]})
        #[arg(short, long)]
        tags: Option<PathBuf>,

        /// Semicolon-separated color overrides (texture;r;g;b;a;noise)
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Draw grass blocks with grass on their sides
        #[arg(long)]
        connected_grass: bool,

        /// Write tags as {min, max} ranges
        #[arg(long)]
        compress_tags: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Output file path
        #[arg(short, long, default_value = "colors.json")]
        output: PathBuf,
    },

    /// Show information about an asset source
    Info {
        /// Client JAR, resource pack ZIP or directory containing `assets/`
        #[arg(short, long)]
        assets: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            assets,
            report,
            tags,
            overrides,
            connected_grass,
            compress_tags,
            pretty,
            output,
        } => {
            let config = GeneratorConfig::default()
                .with_connected_grass(connected_grass)
                .with_compressed_tags(compress_tags);
            generate(
                &assets,
                &report,
                tags.as_deref(),
                overrides.as_deref(),
                config,
                pretty,
                &output,
            )?;
        }
        Commands::Info { assets } => {
            show_asset_info(&assets)?;
        }
    }

    Ok(())
}

fn generate(
    assets_path: &Path,
    report_path: &Path,
    tags_path: Option<&Path>,
    overrides_path: Option<&Path>,
    mut config: GeneratorConfig,
    pretty: bool,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading block report from {:?}...", report_path);
    let report = BlockReport::load(report_path)?;
    println!("  Found {} blocks, {} states", report.len(), report.state_count());

    let tags = match tags_path {
        Some(path) => TagMembership::load(path)?,
        None => TagMembership::new(),
    }
    .with_defaults();

    if let Some(path) = overrides_path {
        config = config.with_overrides(OverrideTable::load(path)?);
        println!("  Loaded {} color overrides", config.overrides.len());
    }

    println!("Opening assets from {:?}...", assets_path);
    let source = open_source(assets_path)?;

    let generator = ColorTableGenerator::with_config(&source, config);
    let table = generator.generate(&report, &tags)?;

    println!(
        "  Generated {} models, {} blocks, {} tags",
        table.models.len(),
        table.blocks.len(),
        table.tags.len()
    );

    table.write(output_path, pretty)?;
    println!("Wrote color table to {:?}", output_path);

    Ok(())
}

fn show_asset_info(assets_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Opening assets from {:?}...", assets_path);
    let source = open_source(assets_path)?;
    let counts = count_assets(&source)?;

    println!("\nAsset Info:");
    println!("  Blockstates: {}", counts.blockstates);
    println!("  Models: {}", counts.models);
    println!("  Textures: {}", counts.textures);

    Ok(())
}
