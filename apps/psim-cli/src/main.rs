use clap::{Parser, Subcommand, ValueEnum};
use psim_case::{CaseError, CaseResult, build_scrubber, build_streams, load};
use psim_equipment::{Equipment, ScrubberSolution};
use psim_thermo::{
    FluidState, FluidStateMap, PhaseState, PropertyValue, Scope, Shape, ThermoVariant,
};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "psim")]
#[command(about = "psim - venturi scrubber and fluid property tool", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Solve the scrubber of a case
    Scrubber {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Print the solution as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the property catalog of a state variant
    Catalog {
        /// base, water, advanced or refprop
        #[arg(long, default_value = "base")]
        variant: ThermoVariant,
        /// Only list global or per-phase properties
        #[arg(long)]
        scope: Option<ScopeArg>,
    },
    /// Serialize the fluid state of a case stream as JSON
    State {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Stream ID
        stream_id: String,
    },
    /// Restore a serialized fluid state and print it back
    Restore {
        /// JSON file written by `psim state`
        state_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Global,
    Phase,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Global => Scope::Global,
            ScopeArg::Phase => Scope::Phase,
        }
    }
}

fn main() -> CaseResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Scrubber { case_path, json } => cmd_scrubber(&case_path, json),
        Commands::Catalog { variant, scope } => {
            cmd_catalog(variant, scope.map(Scope::from));
            Ok(())
        }
        Commands::State {
            case_path,
            stream_id,
        } => cmd_state(&case_path, &stream_id),
        Commands::Restore { state_path } => cmd_restore(&state_path),
    }
}

fn cmd_validate(case_path: &Path) -> CaseResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = load(case_path)?;
    println!("✓ Case '{}' is valid ({} streams)", case.name, case.streams.len());
    Ok(())
}

fn cmd_scrubber(case_path: &Path, json: bool) -> CaseResult<()> {
    let case = load(case_path)?;
    let streams = build_streams(&case)?;
    let scrubber = build_scrubber(&case, &streams)?;
    let solution = scrubber.solve()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&solution.report())?);
    } else {
        print_solution(scrubber.name(), &solution);
    }
    Ok(())
}

fn print_solution(name: &str, sol: &ScrubberSolution) {
    println!("Scrubber '{}': {} (status {})", name, sol.status, sol.status.code());
    for w in &sol.warnings {
        println!("  warning: {}", w);
    }
    println!(
        "  Efficiency model: {}, pressure drop model: {}",
        sol.efficiency_model.kind().name(),
        sol.pressure_drop_model.name()
    );
    println!(
        "  Throat: D = {:.4} m, A = {:.5} m²",
        sol.geometry.diameter.value, sol.geometry.area.value
    );
    println!(
        "  Vg = {:.4} m/s, L/G = {:.4e}, droplet diameter = {:.4e} m",
        sol.throat.gas_velocity.value, sol.throat.liquid_gas_ratio, sol.throat.droplet_diameter.value
    );
    println!("  Fractional efficiencies:");
    let diameters = sol
        .gas_out
        .solid()
        .map(|s| s.diameters_si().to_vec())
        .unwrap_or_default();
    for (d, eta) in diameters.iter().zip(&sol.efficiency.fractional) {
        println!("    {:>8.2} µm  {:.6}", d * 1e6, eta);
    }
    println!("  Global efficiency: {:.6}", sol.efficiency.global);
    println!(
        "  ΔP = {:.4} Pa, P in = {:.1} Pa, P out = {:.1} Pa",
        sol.pressure_drop.value, sol.pressure_in.value, sol.pressure_out.value
    );
    let s = &sol.solids;
    println!(
        "  Solids in: {:.4e} kg/s (mean {:.2} µm)",
        s.inlet_flow,
        s.inlet_mean_diameter * 1e6
    );
    println!(
        "  Not captured: {:.4e} kg/s (mean {:.2} µm)",
        s.escaped_flow,
        s.escaped_mean_diameter * 1e6
    );
    println!(
        "  Captured: {:.4e} kg/s (mean {:.2} µm)",
        s.captured_flow,
        s.captured_mean_diameter * 1e6
    );
}

fn cmd_catalog(variant: ThermoVariant, scope: Option<Scope>) {
    let catalog = variant.catalog();
    println!("Catalog '{}' ({} properties):", variant, catalog.len());
    for def in catalog.entries() {
        if scope.is_some_and(|s| s != def.scope) {
            continue;
        }
        let shape = match def.shape {
            Shape::Scalar => "",
            Shape::PerComponent => " [per component]",
        };
        let scope_name = match def.scope {
            Scope::Global => "global",
            Scope::Phase => "phase",
        };
        println!(
            "  {:>6}  {:<12} {:<8} {:<10} {}{}",
            def.order,
            def.key,
            def.unit.si_symbol(),
            scope_name,
            def.name,
            shape
        );
    }
}

fn cmd_state(case_path: &Path, stream_id: &str) -> CaseResult<()> {
    let case = load(case_path)?;
    let streams = build_streams(&case)?;
    let stream = streams.get(stream_id).ok_or_else(|| CaseError::UnknownStream {
        id: stream_id.to_string(),
    })?;
    println!("{}", stream.thermo().serialize().to_json()?);
    Ok(())
}

fn cmd_restore(state_path: &Path) -> CaseResult<()> {
    let text = std::fs::read_to_string(state_path)?;
    let map = FluidStateMap::from_json(&text)?;
    let state = FluidState::restore(&map)?;

    println!("Variant: {}", state.variant());
    match state.region() {
        Ok(region) => println!("Region: {}", region),
        Err(e) => println!("Region: unavailable ({})", e),
    }
    println!("Global:");
    for (key, value) in state.global().iter() {
        println!("  {:<12} {}", key, format_value(value));
    }
    print_phase("Liquid", state.liquid());
    print_phase("Gas", state.gas());
    Ok(())
}

fn print_phase(title: &str, phase: &PhaseState) {
    println!("{} ({:?}):", title, phase.status());
    for (key, value) in phase.iter() {
        println!("  {:<12} {}", key, format_value(value));
    }
}

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Scalar(q) => q.to_string(),
        PropertyValue::List(items) => {
            let parts: Vec<String> = items.iter().map(|q| q.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}
