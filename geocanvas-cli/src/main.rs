//! geocanvas CLI - Command-line interface
//!
//! One-shot tile prefetcher: resolves a viewport from a location, a set of
//! points to fit, or a named view, then downloads the visible tiles into
//! the local cache and reports what landed there.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use geocanvas::cache::{CacheConfig, TileCache, DEFAULT_WORKERS};
use geocanvas::coord::GeoPoint;
use geocanvas::logging::{init_logging, DEFAULT_LOG_DIR};
use geocanvas::provider::{BuiltinProvider, TileProvider, DEFAULT_TIMEOUT_SECS};
use geocanvas::viewport::{CanvasSize, Preset, Projector, VisibleTile};

/// How long to keep polling for outstanding downloads.
const PREFETCH_DEADLINE_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// Stamen watercolor artistic tiles
    Watercolor,
    /// Stamen toner black and white tiles
    Toner,
    /// MapQuest OSM raster tiles
    Mapquest,
    /// Toolserver black and white Mapnik tiles
    Toolserver,
}

impl From<ProviderArg> for BuiltinProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Watercolor => BuiltinProvider::Watercolor,
            ProviderArg::Toner => BuiltinProvider::Toner,
            ProviderArg::Mapquest => BuiltinProvider::Mapquest,
            ProviderArg::Toolserver => BuiltinProvider::Toolserver,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CanvasArg {
    /// 1280x768 canvas
    Standard,
    /// 3840x2160 canvas
    #[value(name = "4k")]
    FourK,
}

impl From<CanvasArg> for CanvasSize {
    fn from(arg: CanvasArg) -> Self {
        match arg {
            CanvasArg::Standard => CanvasSize::Standard,
            CanvasArg::FourK => CanvasSize::FourK,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    /// The whole world
    World,
    /// Denmark
    Denmark,
    /// The greater Copenhagen area
    CopenhagenArea,
    /// Central Copenhagen
    CityCenter,
}

impl From<ViewArg> for Preset {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::World => Preset::World,
            ViewArg::Denmark => Preset::Denmark,
            ViewArg::CopenhagenArea => Preset::CopenhagenArea,
            ViewArg::CityCenter => Preset::CityCenter,
        }
    }
}

#[derive(Parser)]
#[command(name = "geocanvas")]
#[command(version = geocanvas::VERSION)]
#[command(about = "Prefetch map tiles for a viewport into the local cache", long_about = None)]
struct Args {
    /// Latitude of the viewport center in decimal degrees
    #[arg(long, requires = "lon", conflicts_with_all = ["points", "view"])]
    lat: Option<f64>,

    /// Longitude of the viewport center in decimal degrees
    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    /// Zoom level for --lat/--lon (clamped to 1..=24)
    #[arg(long, default_value = "12", conflicts_with_all = ["points", "view"])]
    zoom: u8,

    /// Fit the viewport around this point; repeatable (format: lat,lon)
    #[arg(long = "point", value_parser = parse_point)]
    points: Vec<GeoPoint>,

    /// Named starting view, used when no location is given
    #[arg(long, value_enum, conflicts_with = "points")]
    view: Option<ViewArg>,

    /// Canvas size preset
    #[arg(long, value_enum, default_value = "standard")]
    canvas: CanvasArg,

    /// Tile provider
    #[arg(long, value_enum, default_value = "watercolor")]
    provider: ProviderArg,

    /// Cache directory root (default: the user cache directory)
    #[arg(long)]
    cache_root: Option<PathBuf>,

    /// Number of download worker threads
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Download timeout per tile in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Serve only what is already cached; never download
    #[arg(long)]
    offline: bool,

    /// Directory for log files
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: String,
}

/// Parses a `lat,lon` pair in decimal degrees.
fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    Ok(GeoPoint::new(lat, lon))
}

/// Builds the viewport from whichever location flags were given.
///
/// Precedence: points to fit, then an explicit center, then a named view
/// (Denmark when none is given).
fn resolve_viewport(args: &Args) -> Projector {
    let canvas = CanvasSize::from(args.canvas);

    if !args.points.is_empty() {
        let mut view = Projector::new(GeoPoint::new(0.0, 0.0), 1, canvas);
        view.fit(&args.points);
        return view;
    }

    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Projector::new(GeoPoint::new(lat, lon), args.zoom, canvas);
    }

    let preset = args.view.map(Preset::from).unwrap_or(Preset::Denmark);
    preset.projector(canvas)
}

/// Polls the cache until every visible tile resolves or the deadline passes.
///
/// Returns how many tiles ended up resolvable. In offline mode a single
/// pass reports what the disk already held.
fn prefetch(cache: &mut TileCache, tiles: &[VisibleTile], offline: bool) -> usize {
    let mut resolved = tiles.iter().filter(|t| cache.get(t.id).is_some()).count();
    if offline || resolved == tiles.len() {
        return resolved;
    }

    let deadline = Instant::now() + Duration::from_secs(PREFETCH_DEADLINE_SECS);
    let mut last_reported = resolved;
    while resolved < tiles.len() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(250));
        resolved = tiles.iter().filter(|t| cache.get(t.id).is_some()).count();
        if resolved != last_reported {
            println!("  {}/{} tiles ready", resolved, tiles.len());
            last_reported = resolved;
        }
    }
    resolved
}

fn main() {
    let args = Args::parse();

    let _logging_guard = match init_logging(&args.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {}", e);
            process::exit(1);
        }
    };

    let provider = TileProvider::from(BuiltinProvider::from(args.provider));

    let mut config = CacheConfig::new()
        .with_workers(args.workers)
        .with_timeout_secs(args.timeout_secs)
        .with_offline(args.offline);
    if let Some(root) = &args.cache_root {
        config = config.with_cache_root(root);
    }

    let view = resolve_viewport(&args);
    let (nw, se) = view.bounds();
    let tiles = view.visible_tiles();

    println!("Viewport: zoom {} on a {} canvas", view.zoom(), view.canvas());
    println!("  Northwest: {}", nw);
    println!("  Southeast: {}", se);
    println!("  Visible tiles: {}", tiles.len());
    println!();

    let mut cache = match TileCache::new(provider, config) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("Error creating tile cache: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Caching '{}' tiles under {}",
        cache.provider().namespace(),
        cache.cache_root().display()
    );

    let start = Instant::now();
    let resolved = prefetch(&mut cache, &tiles, args.offline);
    let stats = cache.stats();
    cache.shutdown();

    println!();
    if resolved == tiles.len() {
        println!(
            "✓ All {} tiles cached in {:.2}s",
            tiles.len(),
            start.elapsed().as_secs_f64()
        );
    } else {
        println!("{}/{} tiles cached", resolved, tiles.len());
    }
    println!(
        "  Hits: {} memory, {} disk; misses: {}",
        stats.memory_hits, stats.disk_hits, stats.misses
    );

    if !args.offline && resolved < tiles.len() {
        eprintln!("Error: {} tiles could not be fetched", tiles.len() - resolved);
        process::exit(1);
    }
}
