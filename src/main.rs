use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use shade_engine::{Growth, PixelSource, Point};
use shadematch::api;
use shadematch::models::{AppConfig, Selection, Session};
use shadematch::server;
use shadematch::services::MatchService;

#[derive(Parser)]
#[command(name = "shadematch")]
#[command(about = "Shadematch - perceptual tooth shade matching")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Match a session's teeth against its shades
    Match {
        /// PNG photograph
        #[arg(short, long)]
        image: PathBuf,

        /// Session file (YAML or JSON) with `teeth` and `shades` rectangles
        #[arg(short, long)]
        session: PathBuf,
    },
    /// Grow a region from a pixel
    Region {
        /// PNG photograph
        #[arg(short, long)]
        image: PathBuf,

        /// Seed column
        #[arg(short, long)]
        x: u32,

        /// Seed row
        #[arg(short, long)]
        y: u32,

        /// ΔE2000 tolerance (default from config, 2.8)
        #[arg(short, long)]
        tolerance: Option<f64>,
    },
    /// Write the image with the session outlined and the winner marked
    Annotate {
        /// PNG photograph
        #[arg(short, long)]
        image: PathBuf,

        /// Session file (YAML or JSON)
        #[arg(short, long)]
        session: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shadematch API",
        description = "Perceptual tooth shade matching",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload,
        api::handle_get_image,
        api::handle_match,
        api::handle_region,
        api::handle_annotate,
    ),
    components(schemas(
        api::UploadResponse,
        api::ImageInfo,
        api::MatchResponse,
        api::RegionRequest,
        api::RegionResponse,
        Session,
        Selection,
    )),
    tags(
        (name = "Images", description = "Photograph upload and metadata"),
        (name = "Matching", description = "Shade matching, region selection and annotation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Match { image, session }) => run_match_command(&image, &session),
        Some(Commands::Region {
            image,
            x,
            y,
            tolerance,
        }) => run_region_command(&image, x, y, tolerance),
        Some(Commands::Annotate {
            image,
            session,
            output,
        }) => run_annotate_command(&image, &session, &output),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadematch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config, the image and (optionally) a session for a CLI command
fn load_inputs(
    image: &Path,
    session: Option<&Path>,
) -> anyhow::Result<(MatchService, shade_engine::PixelBuffer, Session)> {
    init_cli_logging();

    let service = MatchService::new(&AppConfig::from_env());

    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    let pixels = service
        .decode_blocking(&bytes)
        .with_context(|| format!("Failed to decode {}", image.display()))?;

    let session = match session {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Session::parse(&content)
                .with_context(|| format!("Failed to parse session {}", path.display()))?
        }
        None => Session::default(),
    };

    Ok((service, pixels, session))
}

/// Print the winning shade and every shade's distance
fn run_match_command(image: &Path, session: &Path) -> anyhow::Result<()> {
    let (service, pixels, session) = load_inputs(image, Some(session))?;
    let report = service.match_blocking(&pixels, &session);

    println!("index: {}", report.sentinel_index());
    for (i, distance) in report.distances.iter().enumerate() {
        let marker = if report.best == Some(i) { " *" } else { "" };
        match distance {
            Some(d) => println!("  shade {i}: {d:.4}{marker}"),
            None => println!("  shade {i}: no pixels"),
        }
    }
    Ok(())
}

/// Print the grown rectangle or "no region"
fn run_region_command(image: &Path, x: u32, y: u32, tolerance: Option<f64>) -> anyhow::Result<()> {
    let (service, pixels, _) = load_inputs(image, None)?;
    let growth = service.region_blocking(&pixels, Point::new(x, y), tolerance)?;

    if pixels.contains(Point::new(x, y)) {
        println!("seed color: {}", pixels.pixel(x, y).to_hex());
    }
    match growth {
        Growth::Region(rect) => println!(
            "x: {} y: {} width: {} height: {}",
            rect.x, rect.y, rect.width, rect.height
        ),
        Growth::Runaway { iterations, .. } => {
            println!("no region (runaway after {iterations} pixels)")
        }
        Growth::TooSmall { size, .. } => println!("no region (only {size} pixels)"),
        Growth::OutOfBounds { .. } => println!(
            "no region (seed outside {}x{} image)",
            pixels.width(),
            pixels.height()
        ),
    }
    Ok(())
}

/// Render the annotated image to a PNG file
fn run_annotate_command(image: &Path, session: &Path, output: &Path) -> anyhow::Result<()> {
    let (service, pixels, session) = load_inputs(image, Some(session))?;
    let (report, png) = service.annotate_blocking(&pixels, &session)?;

    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({} bytes, index {})",
        output.display(),
        png.len(),
        report.sentinel_index()
    );
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("Shadematch v{VERSION}");
    println!("Perceptual tooth shade matching\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Config source
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfiguration: {config_source}");

    let config = match config_file {
        Some(ref path) => AppConfig::load(Some(Path::new(path))),
        None => AppConfig::default(),
    };
    let options = *config.matcher().options();
    println!("  prune_threshold = {}", options.prune_threshold);
    println!(
        "  weights         = kL {} kC {} kH {}",
        options.weights.lightness, options.weights.chroma, options.weights.hue
    );
    println!("  tolerance       = {}", options.tolerance);
    println!("  min_region_size = {}", options.min_region_size);
    println!("  max_iterations  = {}", options.max_iterations);
    println!("  max_image_bytes = {}", config.limits.max_image_bytes);
    println!("  max_pixels      = {}", config.limits.max_pixels);
    println!("  max_images      = {}", config.limits.max_images);

    // Commands section
    println!("\nCommands:");
    println!("  shadematch serve      Start the HTTP server");
    println!("  shadematch match      Match teeth against shades in a PNG");
    println!("  shadematch region     Grow a region from a pixel");
    println!("  shadematch annotate   Write the annotated PNG");
    println!("\nRun 'shadematch --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadematch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    tracing::info!(
        prune_threshold = config.matching.prune_threshold,
        tolerance = config.region.tolerance,
        max_image_bytes = config.limits.max_image_bytes,
        "Configuration loaded"
    );

    let state = server::create_app_state(config);

    // Build router: shared API routes plus the documentation UI
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Shadematch server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
