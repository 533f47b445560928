use clap::{Parser, Subcommand};
use jf_app::{
    AppError, AppResult, CycleReport, SweepDefinition, SweepType, case_service, run_service,
    sweep,
};
use jf_cycle::{OptimalPressureRatio, RegenerationOutcome, StepCategory};
use jf_gas::{CpModel, GasSpecies, IdealGas};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jf-cli")]
#[command(about = "JouleFlow CLI - closed Joule/Brayton cycle calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and values
    Validate {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
    },
    /// Solve a cycle and print the state table
    Run {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        /// Print every calculation step
        #[arg(long)]
        steps: bool,
        /// Only print steps of one category (e.g. state_2, regeneration)
        #[arg(long)]
        category: Option<StepCategory>,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Evaluate the cycle over a range of pressure ratios
    Sweep {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        #[arg(long, default_value_t = 2.0)]
        pi_min: f64,
        #[arg(long, default_value_t = 30.0)]
        pi_max: f64,
        #[arg(long, default_value_t = 15)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
    },
    /// List the available gases
    Gases,
    /// Print material properties of a gas
    Props {
        /// Gas key, e.g. air or helium
        gas: String,
        /// Use the cp(T) polynomial instead of constant cp
        #[arg(long)]
        polynomial: bool,
        /// Temperatures in K
        #[arg(required = true)]
        temperatures: Vec<f64>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run {
            case_path,
            steps,
            category,
            json,
        } => cmd_run(&case_path, steps, category, json.as_deref()),
        Commands::Sweep {
            case_path,
            pi_min,
            pi_max,
            points,
            log,
        } => cmd_sweep(&case_path, pi_min, pi_max, points, log),
        Commands::Gases => cmd_gases(),
        Commands::Props {
            gas,
            polynomial,
            temperatures,
        } => cmd_props(&gas, polynomial, &temperatures),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    case_service::validate_case(&case)?;
    let summary = case_service::summarize(&case);
    println!("✓ Case is valid");
    println!(
        "  {} - {}, π = {:.3}{}{}",
        summary.name,
        summary.gas,
        summary.pressure_ratio,
        if summary.intercooled { ", intercooled" } else { "" },
        if summary.regenerated { ", regenerated" } else { "" },
    );
    Ok(())
}

fn cmd_run(
    case_path: &Path,
    show_steps: bool,
    category: Option<StepCategory>,
    json: Option<&Path>,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    println!("Solving case: {}", case.name);

    let start = Instant::now();
    let report = run_service::run_case(&case)?;
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "run finished");

    print_states(&report);
    print_properties(&report);

    if let Some(cat) = category {
        print_steps_of(&report, cat);
    } else if show_steps {
        for group in &report.steps_by_category {
            print_steps_of(&report, group.category);
        }
    }

    if let Some(path) = json {
        jf_app::write_report_json(path, &report)?;
        println!("\n✓ Report written to {}", path.display());
    }
    Ok(())
}

fn print_states(report: &CycleReport) {
    println!("\n{} ({})", report.gas, report.cp_model);
    println!(
        "{:>5}  {:>10}  {:>10}  {:>10}  {:>12}  {:>12}  {:>10}",
        "state", "p [bar]", "T [K]", "t [°C]", "v [m³/kg]", "h [kJ/kg]", "s [J/kgK]"
    );
    for row in &report.states {
        println!(
            "{:>5}  {:>10.4}  {:>10.2}  {:>10.2}  {:>12.5}  {:>12.3}  {:>10.3}",
            row.label.key(),
            row.p_bar,
            row.t_k,
            row.t_c,
            row.v_m3_per_kg,
            row.h_j_per_kg / 1000.0,
            row.s_j_per_kg_k
        );
    }
}

fn print_properties(report: &CycleReport) {
    let props = &report.properties;
    let kj = |v: Option<f64>| match v {
        Some(x) => format!("{:.3} kJ/kg", x / 1000.0),
        None => "-".to_string(),
    };

    println!("\nProcess properties:");
    println!("  w_compressor = {}", kj(props.w_compressor));
    if props.w_compressor_stage1.is_some() {
        println!("    stage 1    = {}", kj(props.w_compressor_stage1));
        println!("    stage 2    = {}", kj(props.w_compressor_stage2));
        println!("  q_intercool  = {}", kj(props.q_intercool));
    }
    println!("  w_turbine    = {}", kj(props.w_turbine));
    println!("  w_net        = {}", kj(props.w_net));
    println!("  q_in         = {}", kj(props.q_in));
    println!("  q_out        = {}", kj(props.q_out));
    if props.q_regen.is_some() {
        println!("  q_regen      = {}", kj(props.q_regen));
    }
    if let Some(eta) = props.thermal_efficiency {
        println!("  η_th         = {:.2} %", eta * 100.0);
    }

    match report.regeneration {
        RegenerationOutcome::Disabled => {}
        RegenerationOutcome::Infeasible { t2, t4, pinch_point } => println!(
            "  regeneration skipped: T4 = {t4:.2} K not above T2 + ΔT_pinch = {:.2} K",
            t2 + pinch_point
        ),
        RegenerationOutcome::Applied { t2_star, t4_star } => {
            println!("  regeneration: T2* = {t2_star:.2} K, T4* = {t4_star:.2} K")
        }
    }

    if let OptimalPressureRatio::Determined { pi_opt, t2_opt, .. } = report.optimum {
        println!("  π_opt        = {pi_opt:.3} (T2 = {t2_opt:.2} K)");
    }

    if let (Some(m), Some(rates)) = (report.mass_flow_kg_s, &props.rates) {
        let mw = |v: Option<f64>| v.map_or("-".to_string(), |x| format!("{:.4} MW", x / 1e6));
        println!("\nAt ṁ = {m:.4} kg/s:");
        println!("  P_turbine    = {}", mw(rates.p_turbine));
        println!("  P_compressor = {}", mw(rates.p_compressor));
        println!("  P_net        = {}", mw(rates.p_net));
        println!("  Q_in         = {}", mw(rates.q_in));
    }
}

fn print_steps_of(report: &CycleReport, category: StepCategory) {
    let steps = report.category(category);
    println!("\n== {} ({} steps) ==", category.title(), steps.len());
    for step in steps {
        println!("  {}", step.title);
        if let Some(formula) = &step.formula {
            println!("      {formula}");
        }
        if let Some(calc) = &step.calculation {
            println!("      {calc}");
        }
        if let Some(value) = step.result {
            println!("      = {value:.6} {}", step.unit.as_deref().unwrap_or(""));
        }
    }
}

fn cmd_sweep(case_path: &Path, pi_min: f64, pi_max: f64, points: usize, log: bool) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let compiled = jf_app::compile_case(&case)?;
    let sweep_type = if log {
        SweepType::Logarithmic
    } else {
        SweepType::Linear
    };
    let definition = SweepDefinition::new(pi_min, pi_max, points, sweep_type)?;

    println!("Sweeping pressure ratio for: {}", case.name);
    let results = sweep::sweep_pressure_ratio(&compiled, &definition);

    println!(
        "{:>8}  {:>8}  {:>12}  {:>12}  {:>10}",
        "π", "η_th [%]", "w_net [kJ/kg]", "q_in [kJ/kg]", "T2 [K]"
    );
    for point in &results {
        match &point.result {
            Ok(v) => println!(
                "{:>8.3}  {:>8.2}  {:>12.3}  {:>12.3}  {:>10.2}",
                point.pressure_ratio,
                v.thermal_efficiency.unwrap_or(f64::NAN) * 100.0,
                v.w_net.unwrap_or(f64::NAN) / 1000.0,
                v.q_in.unwrap_or(f64::NAN) / 1000.0,
                v.t2
            ),
            Err(e) => println!("{:>8.3}  failed: {e}", point.pressure_ratio),
        }
    }

    if let Some(best) = sweep::best_point(&results) {
        println!("\nHighest efficiency at π = {:.3}", best.pressure_ratio);
    }
    Ok(())
}

fn cmd_gases() -> AppResult<()> {
    println!(
        "{:<16}  {:<16}  {:>10}  {:>8}  {:>12}",
        "key", "name", "R [J/kgK]", "κ", "range [K]"
    );
    for species in GasSpecies::ALL {
        let data = species.data();
        println!(
            "{:<16}  {:<16}  {:>10.3}  {:>8.3}  {:>5.0}-{:<6.0}",
            species.key(),
            data.name,
            data.r,
            data.kappa_const,
            data.t_range.0,
            data.t_range.1
        );
    }
    Ok(())
}

fn cmd_props(gas: &str, polynomial: bool, temperatures: &[f64]) -> AppResult<()> {
    if let Some(t) = temperatures.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
        return Err(AppError::InvalidInput(format!(
            "temperature must be positive, got {t}"
        )));
    }
    let species = jf_app::parse_gas(gas)?;
    let model = if polynomial {
        CpModel::Polynomial
    } else {
        CpModel::Constant
    };
    let ideal = IdealGas::new(species, model);

    println!("{} ({})", species.display_name(), model.label());
    println!(
        "{:>10}  {:>12}  {:>12}  {:>8}",
        "T [K]", "cp [J/kgK]", "cv [J/kgK]", "κ"
    );
    for pack in ideal.material_table(temperatures) {
        let note = if ideal.in_valid_range(pack.t) {
            ""
        } else {
            "  (extrapolated)"
        };
        println!(
            "{:>10.2}  {:>12.3}  {:>12.3}  {:>8.4}{note}",
            pack.t, pack.cp, pack.cv, pack.kappa
        );
    }
    Ok(())
}
