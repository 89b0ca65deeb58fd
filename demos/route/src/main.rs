//! pathcycle-route: build a bike-lane network from a CSV snapshot and answer
//! one route query.
//!
//! ```text
//! pathcycle-route --from -77.05,-12.05 --to -77.03,-12.05
//! pathcycle-route --segments lanes.csv --from … --to … --config build.toml --stats
//! ```
//!
//! Without `--segments` the embedded sample network (a small crossing in
//! central Lima plus one detached lane) is used.  Set `RUST_LOG=info` or
//! `RUST_LOG=debug` to see the pipeline stages.

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use pc_core::{BuildConfig, Coordinate};
use pc_io::{export_network_csv, load_records_csv, load_records_reader, route_to_json, stats_to_json};
use pc_spatial::{DijkstraRouter, NetworkStats, RouteQuery, build_from_records, route};

// ── Sample data ───────────────────────────────────────────────────────────────

// Two crossing diagonals, a lane whose start is ~1 m off the east corner,
// an incomplete record, and a lane far from everything else.
const SAMPLE_CSV: &str = "\
id,lon_start,lat_start,lon_end,lat_end
diag-sw-ne,-77.05,-12.05,-77.03,-12.03
diag-nw-se,-77.05,-12.03,-77.03,-12.05
east-spur,-77.029991,-12.05,-77.029991,-12.06
unfinished,-77.02,-12.02,,
detached,-77.00,-12.00,-76.99,-12.00
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pathcycle-route")]
#[command(about = "Shortest bike-lane route between two coordinates", long_about = None)]
struct Cli {
    /// Lane CSV (`id,lon_start,lat_start,lon_end,lat_end`).  Defaults to the
    /// embedded sample.
    #[arg(short, long)]
    segments: Option<PathBuf>,

    /// Start as `lon,lat`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
    from: Coordinate,

    /// End as `lon,lat`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
    to: Coordinate,

    /// TOML file with `BuildConfig` fields; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write `nodes.csv` and `edges.csv` into this directory.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print network statistics before the route.
    #[arg(long)]
    stats: bool,
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lon,lat`, got {s:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude {lon:?}: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude {lat:?}: {e}"))?;
    Coordinate::try_new(lon, lat).map_err(|e| e.to_string())
}

fn load_config(path: Option<&PathBuf>) -> Result<BuildConfig> {
    let Some(path) = path else {
        return Ok(BuildConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: BuildConfig = toml::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let records = match &cli.segments {
        Some(path) => load_records_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => load_records_reader(Cursor::new(SAMPLE_CSV))?,
    };
    info!("{} lane records, config {config:?}", records.len());

    let built = build_from_records(&records, &config)?;
    if built.network.is_empty() {
        bail!("no complete lane segments in input; nothing to route on");
    }

    if cli.stats {
        println!("{}", stats_to_json(&NetworkStats::compute(&built.network))?);
    }
    if let Some(dir) = &cli.export {
        std::fs::create_dir_all(dir)?;
        export_network_csv(&built.network, dir)?;
    }

    let query = RouteQuery::new(cli.from, cli.to);
    let outcome = route(&built.network, &query, &DijkstraRouter)?;
    println!("{}", route_to_json(&outcome)?);
    Ok(())
}
