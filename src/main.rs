//! RC Sim - transient simulator for RC circuits.
//!
//! # Usage
//!
//! ```bash
//! rc-sim --capacitance 1 --resistance 1k --emf 10 --mode discharge --precision 4 --separator comma
//! rc-sim circuit.rc --output series.csv --summary --diagram
//! RUST_LOG=rc_sim=debug rc-sim --source ac --preview 20
//! ```

use std::path::PathBuf;

use clap::Parser;
use rc_sim::{
    circuit::{CircuitConfig, Mode, SourceType},
    dsl::{self, CircuitAst},
    error::Result,
    export::{self, DecimalSeparator, ExportSettings},
    report,
    solver::{Playback, Simulation, Simulator, SimulatorConfig, DEFAULT_NUM_POINTS, INTERVAL_DEFAULT_MS},
};

/// RC circuit transient simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a circuit description file (.rc)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: Option<PathBuf>,

    /// Capacitance in µF
    #[arg(short = 'c', long, value_parser = parse_quantity)]
    capacitance: Option<f64>,

    /// Load resistance in Ω (accepts suffixes such as 4.7k)
    #[arg(short = 'r', long, value_parser = parse_quantity)]
    resistance: Option<f64>,

    /// Internal resistance of the source in Ω
    #[arg(long, value_parser = parse_quantity)]
    internal_resistance: Option<f64>,

    /// Source EMF (AC amplitude) in V
    #[arg(short = 'e', long, value_parser = parse_quantity)]
    emf: Option<f64>,

    /// Source type: dc or ac
    #[arg(long)]
    source: Option<SourceType>,

    /// Mode: charge or discharge
    #[arg(short = 'm', long)]
    mode: Option<Mode>,

    /// Ambient temperature in °C
    #[arg(short = 't', long, allow_hyphen_values = true, value_parser = parse_quantity)]
    temperature: Option<f64>,

    /// Resistor temperature coefficient in 1/°C
    #[arg(long, allow_hyphen_values = true, value_parser = parse_quantity)]
    temp_coeff: Option<f64>,

    /// Capacitor voltage at t = 0 in V
    #[arg(long, allow_hyphen_values = true, value_parser = parse_quantity)]
    initial_voltage: Option<f64>,

    /// Number of samples
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Decimal places in the exported numbers (1-12)
    #[arg(short = 'p', long)]
    precision: Option<usize>,

    /// Decimal separator: point or comma
    #[arg(short = 's', long)]
    separator: Option<DecimalSeparator>,

    /// Print only the first N rows
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Write the series to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the parameter table
    #[arg(long)]
    summary: bool,

    /// Print the circuit schematic with the final charge level
    #[arg(long)]
    diagram: bool,

    /// Replay the series sample by sample
    #[arg(long)]
    animate: bool,

    /// Frame interval for --animate in ms (10-200)
    #[arg(long, default_value_t = INTERVAL_DEFAULT_MS)]
    interval_ms: u64,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_quantity(s: &str) -> std::result::Result<f64, String> {
    dsl::parse_value(s).ok_or_else(|| format!("invalid number: '{}'", s))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Start from the description file (or the defaults) and apply any flags.
fn circuit_config(args: &Args, ast: Option<&CircuitAst>) -> Result<CircuitConfig> {
    let mut config = match ast {
        Some(ast) => CircuitConfig::from_ast(ast)?,
        None => CircuitConfig::default(),
    };

    if let Some(uf) = args.capacitance {
        config = config.with_capacitance_uf(uf);
    }
    if let Some(ohms) = args.resistance {
        config = config.with_resistance(ohms);
    }
    if let Some(ohms) = args.internal_resistance {
        config = config.with_internal_resistance(ohms);
    }
    if let Some(volts) = args.emf {
        config = config.with_emf(volts);
    }
    if let Some(source) = args.source {
        config = config.with_source_type(source);
    }
    if let Some(mode) = args.mode {
        config = config.with_mode(mode);
    }
    if let Some(celsius) = args.temperature {
        config = config.with_temperature(celsius);
    }
    if let Some(alpha) = args.temp_coeff {
        config = config.with_temp_coefficient(alpha);
    }
    if let Some(volts) = args.initial_voltage {
        config = config.with_initial_voltage(volts);
    }

    Ok(config)
}

fn export_settings(args: &Args, ast: Option<&CircuitAst>) -> ExportSettings {
    let defaults = ExportSettings::default();
    let file = ast.map(|ast| &ast.export);

    ExportSettings::new(
        args.precision
            .or_else(|| file.and_then(|e| e.precision))
            .unwrap_or(defaults.precision),
        args.separator
            .or_else(|| file.and_then(|e| e.separator))
            .unwrap_or(defaults.decimal_separator),
    )
}

fn animate(simulation: &Simulation, interval_ms: u64) -> Result<()> {
    let mut playback = Playback::new(&simulation.series).with_interval_ms(interval_ms)?;

    while let Some(frame) = playback.tick() {
        if let Some(sample) = frame.latest() {
            println!(
                "t = {:.6} s  V = {:>9.4} V  I = {:>10.6} A  charge {:>5.1}%",
                sample.time,
                sample.voltage,
                sample.current,
                frame.charge_level * 100.0
            );
        }
        std::thread::sleep(playback.interval());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let ast = args
        .circuit_file
        .as_deref()
        .map(dsl::parse_file)
        .transpose()?;

    let config = circuit_config(&args, ast.as_ref())?;
    let settings = export_settings(&args, ast.as_ref());
    let num_points = args
        .points
        .or_else(|| ast.as_ref().and_then(|a| a.num_points))
        .unwrap_or(DEFAULT_NUM_POINTS);

    // Reject bad input before any work is done
    rc_sim::validate(&config, &settings)?;

    let simulator =
        Simulator::with_config(&config, SimulatorConfig::new().with_num_points(num_points))?;
    let simulation = simulator.run()?;

    if args.animate {
        animate(&simulation, args.interval_ms)?;
    } else if let Some(rows) = args.preview {
        println!("{}", export::preview(&simulation.series, &settings, rows)?);
    } else if args.output.is_none() {
        println!("{}", export::format_series(&simulation.series, &settings)?);
    }

    if let Some(path) = &args.output {
        let rows = export::write_csv(path, &simulation.series, &settings)?;
        eprintln!("Wrote {} rows to {}", rows, path.display());
    }

    if args.summary {
        println!("{}", report::parameter_table(&config, &simulation.summary));
    }

    if args.diagram {
        let level = simulation
            .series
            .charge_level_at(simulation.series.len().saturating_sub(1));
        println!("{}", report::diagram(&config, level));
    }

    Ok(())
}
