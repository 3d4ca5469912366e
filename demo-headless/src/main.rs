use anyhow::{ensure, Context};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use pinelands_risk_core::core_types::compass_point;
use pinelands_risk_core::core_types::units::{Degrees, Fahrenheit, MilesPerHour, Percent};
use pinelands_risk_core::risk::{calculate_historical_density, count_high_risk_cells};
use pinelands_risk_core::weather::seasonal_trends;
use pinelands_risk_core::{
    build_pinelands_risk_grid, current_fire_season, historical, seasonal_risk, FireSpreadSimulation,
    HeatmapPoint, RiskGrid, RiskSummary, SimulationConfig, SimulationParameters,
    WeatherReading, WildfireRecord, WindConditions,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pinelands wildfire risk and fire-spread demo
#[derive(Parser, Debug)]
#[command(name = "pinelands-demo")]
#[command(about = "NJ Pinelands wildfire risk grid and fire-spread simulation", long_about = None)]
struct Args {
    /// Analysis date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Current temperature in °F (omit to use standing assumptions)
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Current relative humidity in %
    #[arg(long)]
    humidity: Option<f64>,

    /// Wind speed in mph
    #[arg(short, long, default_value_t = 10.0)]
    wind_speed: f64,

    /// Direction the wind blows toward in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 45.0)]
    wind_direction: f64,

    /// Rainfall in inches over the last day
    #[arg(long)]
    precipitation: Option<f64>,

    /// JSON file with historical fire records (defaults to the bundled dataset)
    #[arg(long)]
    fires: Option<PathBuf>,

    /// Ignition latitude (snapped to the containing cell)
    #[arg(long, default_value_t = 39.8)]
    ignition_lat: f64,

    /// Ignition longitude (snapped to the containing cell)
    #[arg(long, default_value_t = -74.5, allow_hyphen_values = true)]
    ignition_lng: f64,

    /// Simulation duration in hours
    #[arg(short, long, default_value_t = 6.0)]
    duration: f64,

    /// Simulation time step in minutes
    #[arg(long, default_value_t = 10.0)]
    time_step: f64,

    /// Random seed for the spread draws
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Report every N steps
    #[arg(short, long, default_value_t = 6)]
    report_interval: usize,

    /// Write risk and fire heatmaps as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Run validation checks
    #[arg(short, long)]
    validate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatmapExport {
    date: NaiveDate,
    fire_season: String,
    summary: RiskSummary,
    risk: Vec<HeatmapPoint>,
    fire: Vec<HeatmapPoint>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());

    println!("=== Pinelands Wildfire Risk Demo ===\n");

    let fires = load_fires(args.fires.as_ref())?;
    info!(records = fires.len(), "Loaded historical fire records");
    println!("Historical fire records: {}", fires.len());

    let weather = weather_from_args(&args)?;
    match &weather {
        Some(reading) => println!(
            "Weather: {} / {} humidity / {} wind, fire-weather index {:.2}",
            reading.temperature.map_or_else(|| "n/a".to_owned(), |t| t.to_string()),
            reading.humidity.map_or_else(|| "n/a".to_owned(), |h| h.to_string()),
            reading.wind_speed.map_or_else(|| "n/a".to_owned(), |w| w.to_string()),
            reading.fire_risk()
        ),
        None => println!("Weather: no live reading, using standing assumptions"),
    }
    println!(
        "Date: {}  {}  (seasonal risk {:.2})\n",
        date,
        current_fire_season(date),
        seasonal_risk(date)
    );

    let grid = build_pinelands_risk_grid(weather.as_ref(), &fires, date)?;
    let summary = RiskSummary::from_grid(&grid);
    println!("Risk grid: {}x{} cells", grid.rows(), grid.cols());
    println!(
        "  Low: {}  Medium: {}  High: {}  Average: {:.3}  Max: {:.3}  Overall: {}",
        summary.low,
        summary.medium,
        summary.high,
        summary.average,
        summary.max,
        summary.level()
    );
    println!(
        "  Cells with recorded fires: {}\n",
        grid.cells().iter().filter(|c| c.historical_fires > 0).count()
    );

    let ignition = grid
        .cell_containing(args.ignition_lat, args.ignition_lng)
        .with_context(|| {
            format!(
                "ignition point ({}, {}) is outside the analysis grid",
                args.ignition_lat, args.ignition_lng
            )
        })?
        .location();

    let wind = WindConditions::new(
        MilesPerHour::from(args.wind_speed),
        Degrees::from(args.wind_direction),
    );
    let params = SimulationParameters {
        ignition_point: ignition,
        wind_conditions: wind,
        duration: args.duration,
        time_step: args.time_step,
    };

    println!(
        "Igniting cell at ({:.2}, {:.2}), wind {} toward {}",
        ignition.lat,
        ignition.lng,
        wind.speed,
        compass_point(*wind.direction)
    );
    let mut sim = FireSpreadSimulation::new(&grid, params, SimulationConfig::default())?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    info!(seed = args.seed, steps = sim.total_steps(), "Starting fire-spread run");

    println!("\nStep | Time(min) | Ignited | Burning | Burned out");
    println!("-----|-----------|---------|---------|-----------");
    let interval = args.report_interval.max(1);
    while let Some(report) = sim.step(&mut rng) {
        if report.step % interval == 0 || sim.is_finished() {
            println!(
                "{:4} | {:9.0} | {:7} | {:7} | {:10}",
                report.step, report.time, report.ignited, report.burning, report.burned_out
            );
        }
    }

    println!("\n=== Simulation Complete ===");
    println!("Simulated: {:.1} h", sim.elapsed_minutes() / 60.0);
    println!("Burning cells: {}", sim.burning_count());
    println!("Burned-out cells: {}", sim.burned_out_count());

    if let Some(path) = &args.json {
        let export = HeatmapExport {
            date,
            fire_season: current_fire_season(date).to_string(),
            summary,
            risk: grid.heatmap(),
            fire: sim.heatmap(),
        };
        fs::write(path, serde_json::to_string_pretty(&export)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "Wrote heatmap export");
        println!("\nHeatmaps written to {}", path.display());
    }

    if args.validate {
        run_validation_tests(&grid, &fires)?;
    }

    Ok(())
}

fn load_fires(path: Option<&PathBuf>) -> anyhow::Result<Vec<WildfireRecord>> {
    let Some(path) = path else {
        return Ok(historical::pinelands_wildfires());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn weather_from_args(args: &Args) -> anyhow::Result<Option<WeatherReading>> {
    if args.temperature.is_none() && args.humidity.is_none() && args.precipitation.is_none() {
        return Ok(None);
    }
    if let Some(t) = args.temperature {
        ensure!(t >= *Fahrenheit::ABSOLUTE_ZERO, "temperature {t}°F is below absolute zero");
    }
    if let Some(h) = args.humidity {
        ensure!((0.0..=100.0).contains(&h), "humidity must be 0-100%, got {h}");
    }
    ensure!(args.wind_speed >= 0.0, "wind speed must be non-negative");

    Ok(Some(WeatherReading {
        temperature: args.temperature.map(Fahrenheit::new),
        humidity: args.humidity.map(Percent::new),
        wind_speed: Some(MilesPerHour::new(args.wind_speed)),
        wind_direction: Some(Degrees::from(args.wind_direction)),
        precipitation: args.precipitation,
    }))
}

fn run_validation_tests(grid: &RiskGrid, fires: &[WildfireRecord]) -> anyhow::Result<()> {
    println!("\n=== Running Validation Tests ===\n");

    // Test 1: Wind directionality
    println!("Test 1: Wind Directionality");
    let center = grid
        .get(grid.rows() / 2, grid.cols() / 2)
        .context("grid has no center cell")?
        .location();
    let eastward = SimulationParameters {
        ignition_point: center,
        wind_conditions: WindConditions::new(MilesPerHour::new(20.0), Degrees::new(90.0)),
        duration: 4.0,
        time_step: 10.0,
    };
    let mut sim = FireSpreadSimulation::new(grid, eastward, SimulationConfig::default())?;
    sim.run(&mut StdRng::seed_from_u64(7));
    let (east, west) = sim
        .cells()
        .iter()
        .filter(|c| c.has_ignited())
        .fold((0, 0), |(e, w), c| {
            if c.cell.lng > center.lng {
                (e + 1, w)
            } else if c.cell.lng < center.lng {
                (e, w + 1)
            } else {
                (e, w)
            }
        });
    println!("  Cells burned east of ignition: {}", east);
    println!("  Cells burned west of ignition: {}", west);
    if east > west {
        println!("  ✓ PASS: Fire spreads further downwind");
    } else {
        println!("  ✗ FAIL: Expected stronger downwind spread");
    }

    // Test 2: Seasonal peak
    println!("\nTest 2: Seasonal Risk Peak");
    let peak = seasonal_trends()
        .iter()
        .filter_map(|m| NaiveDate::from_ymd_opt(2024, m.month, 1))
        .max_by(|a, b| seasonal_risk(*a).total_cmp(&seasonal_risk(*b)))
        .context("no seasonal data")?;
    println!("  Highest-risk month: {} ({})", peak.format("%B"), current_fire_season(peak));
    if current_fire_season(peak).risk_multiplier() > 1.0 {
        println!("  ✓ PASS: Peak falls in a fire season");
    } else {
        println!("  ✗ FAIL: Peak falls in winter");
    }

    // Test 3: Historical density normalization
    println!("\nTest 3: Historical Density Normalization");
    let mut scratch = grid.clone();
    let stats = calculate_historical_density(fires, &mut scratch);
    let max_density = scratch.cells().iter().map(|c| c.risk_score).fold(0.0, f64::max);
    println!(
        "  Placed: {}, dropped: {}, busiest cell: {} fires",
        stats.placed, stats.dropped, stats.max_fires
    );
    if stats.max_fires == 0 || (max_density - 1.0).abs() < 1e-12 {
        println!("  ✓ PASS: Busiest cell normalizes to 1.0");
    } else {
        println!("  ✗ FAIL: Busiest cell density {:.3}", max_density);
    }

    println!(
        "\nHigh-risk cells in scored grid: {} of {}",
        count_high_risk_cells(grid),
        grid.len()
    );
    println!("\n=== Validation Complete ===");
    Ok(())
}
