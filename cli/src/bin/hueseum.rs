use clap::{Parser, Subcommand};
use cli::{ConfigFile, resolve_config};
use color_eyre::eyre::{Result, eyre};
use hueseum::{Artifact, ImageCommand, ServerConfig};
use outline::OutlineParams;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Colour palettes and coloring-book outlines from images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to a .toml or .json configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Interface to bind
        #[arg(long, env = "HUESEUM_HOST")]
        host: Option<String>,
        /// Port to bind
        #[arg(short, long, env = "HUESEUM_PORT")]
        port: Option<u16>,
    },
    /// Print the dominant colours of an image
    Palette {
        image: PathBuf,
        /// Number of colours (1-24)
        #[arg(short, long, default_value = "12")]
        size: usize,
        /// Print only the hex codes, one per line
        #[arg(long)]
        hex: bool,
        /// Configuration file with clustering options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the colour of one pixel
    Pixel {
        image: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },
    /// Print the width and height of an image
    Dimensions {
        image: PathBuf,
    },
    /// Render the coloring-book outline as a PNG
    Outline {
        image: PathBuf,
        #[arg(short, long, default_value = "outline.png")]
        output: PathBuf,
    },
    /// Trace the outline into an SVG with tunable edge detection
    Trace {
        image: PathBuf,
        #[arg(short, long, default_value = "custom-outline.svg")]
        output: PathBuf,
        /// Gaussian blur kernel size; even values are bumped to odd
        #[arg(long, default_value = "3")]
        blur_kernel: i32,
        #[arg(long, default_value = "50")]
        canny_low: f32,
        #[arg(long, default_value = "150")]
        canny_high: f32,
        /// Dilation passes, also the stroke width; 0 disables dilation
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        dilate_iterations: i32,
    },
    /// Write a default configuration file (.toml or .json)
    InitConfig {
        path: PathBuf,
    },
    /// Print the JSON schema of the command set
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, host, port } => {
            let config = resolve_config(config.as_deref(), host, port)?;
            info!(?config, "Starting Hueseum API");
            hueseum::server::serve(config).await?;
        }
        Commands::Palette { image, size, hex, config } => {
            let config = resolve_config(config.as_deref(), None, None)?;
            let artifact = run(&image, ImageCommand::ExtractPalette { size }, &config).await?;
            let palette = match artifact {
                Artifact::Palette(palette) => palette,
                other => return Err(eyre!("palette command produced a {} artifact", other.kind())),
            };
            if hex {
                for code in palette.hex_codes() {
                    println!("{code}");
                }
            } else {
                for entry in &palette.entries {
                    let [r, g, b] = entry.rgb;
                    println!("{}  {:>6.2}%  rgb({r}, {g}, {b})", entry.hex, entry.percentage);
                }
            }
        }
        Commands::Pixel { image, x, y } => {
            let artifact = run(&image, ImageCommand::PixelColor { x, y }, &ServerConfig::default()).await?;
            print_json(&artifact)?;
        }
        Commands::Dimensions { image } => {
            let artifact = run(&image, ImageCommand::Dimensions, &ServerConfig::default()).await?;
            print_json(&artifact)?;
        }
        Commands::Outline { image, output } => {
            let artifact = run(&image, ImageCommand::ColoringBookOutline, &ServerConfig::default()).await?;
            write_artifact(&artifact, &output)?;
        }
        Commands::Trace {
            image,
            output,
            blur_kernel,
            canny_low,
            canny_high,
            dilate_iterations,
        } => {
            let params = OutlineParams {
                blur_kernel,
                canny_low,
                canny_high,
                dilate_iterations,
            };
            let artifact = run(&image, ImageCommand::VectorOutline(params), &ServerConfig::default()).await?;
            write_artifact(&artifact, &output)?;
        }
        Commands::InitConfig { path } => {
            ServerConfig::default().to_file(&path)?;
            info!("Wrote default configuration to {:?}", path);
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ImageCommand::schema())?);
        }
    }

    Ok(())
}

/// Read the image and execute one command off the async runtime
async fn run(image: &Path, command: ImageCommand, config: &ServerConfig) -> Result<Artifact> {
    let bytes = tokio::fs::read(image)
        .await
        .map_err(|e| eyre!("Failed to read {:?}: {}", image, e))?;
    let options = config.palette.clone();

    let artifact = tokio::task::spawn_blocking(move || command.execute(&bytes, &options)).await??;
    Ok(artifact)
}

fn print_json(artifact: &Artifact) -> Result<()> {
    let json = match artifact {
        Artifact::Pixel(sample) => serde_json::to_string_pretty(sample)?,
        Artifact::Dimensions(dims) => serde_json::to_string_pretty(dims)?,
        Artifact::Palette(palette) => serde_json::to_string_pretty(palette)?,
        other => return Err(eyre!("{} artifacts are not printable", other.kind())),
    };
    println!("{json}");
    Ok(())
}

fn write_artifact(artifact: &Artifact, output: &Path) -> Result<()> {
    match artifact {
        Artifact::Png(bytes) => std::fs::write(output, bytes)?,
        Artifact::Svg(svg) => std::fs::write(output, svg)?,
        other => return Err(eyre!("{} artifacts are not files", other.kind())),
    }
    info!("✅ Wrote {} to {:?}", artifact.content_type(), output);
    Ok(())
}
