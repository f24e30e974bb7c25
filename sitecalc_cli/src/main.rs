//! # SiteCalc CLI
//!
//! Command-line front end for the estimation engine: the quick field
//! estimator, the steel-weight calculator, the bar table and the project
//! desk. Every command prints a report, or JSON with `--json`.

mod desk;
mod format;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use sitecalc_core::calculations::{BeamInput, ColumnInput, SlabInput};
use sitecalc_core::estimate::quick_estimate;
use sitecalc_core::input::{parse_count, parse_decimal, QuickEstimatorForm};
use sitecalc_core::materials::rebar_table;
use sitecalc_core::{ElementSteelResult, SteelBarGroup, StructuralElement};

#[derive(Parser)]
#[command(name = "sitecalc")]
#[command(about = "Concrete and reinforcement quantity estimator")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quick field estimate for a single member
    Quick(QuickArgs),
    /// Bar-by-bar steel take-off for one element
    #[command(subcommand)]
    Steel(ElementCommand),
    /// Nominal bar sizes with area and unit weight
    Bars,
    /// Detailed estimate kept in a project file
    #[command(subcommand)]
    Project(desk::ProjectCommand),
}

/// Values are taken as typed: anything unparsable counts as 0.
#[derive(Args)]
struct QuickArgs {
    /// Member length (m)
    #[arg(long)]
    length: Option<String>,
    /// Member width (m)
    #[arg(long)]
    width: Option<String>,
    /// Member depth (m)
    #[arg(long)]
    depth: Option<String>,
    /// Number of identical members [1]
    #[arg(long)]
    quantity: Option<String>,
    /// Number of bars [4]
    #[arg(long)]
    bars: Option<String>,
    /// Bar diameter in mm [20]
    #[arg(long)]
    dia: Option<String>,
    /// Concrete rate per m³ [8000]
    #[arg(long)]
    concrete_rate: Option<String>,
    /// Steel rate per kg [65]
    #[arg(long)]
    steel_rate: Option<String>,
    /// Prompt for each value
    #[arg(long, short)]
    interactive: bool,
}

impl QuickArgs {
    fn into_form(self) -> QuickEstimatorForm {
        let mut form = QuickEstimatorForm::default();
        let fields = [
            (self.length, &mut form.length),
            (self.width, &mut form.width),
            (self.depth, &mut form.depth),
            (self.quantity, &mut form.quantity),
            (self.bars, &mut form.number_of_bars),
            (self.dia, &mut form.bar_diameter_mm),
            (self.concrete_rate, &mut form.concrete_rate),
            (self.steel_rate, &mut form.steel_rate),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

#[derive(Subcommand)]
pub(crate) enum ElementCommand {
    /// Beam: main bars plus stirrups
    Beam(BeamArgs),
    /// Column: straight main bars plus lateral ties
    Column(ColumnArgs),
    /// Slab: main and distribution bars at spacing
    Slab(SlabArgs),
}

#[derive(Args)]
pub(crate) struct BeamArgs {
    #[arg(long, default_value = "")]
    label: String,
    /// Span (m)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    length: f64,
    /// Width (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    width: f64,
    /// Overall depth (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    depth: f64,
    /// Clear cover (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "25")]
    cover: f64,
    /// Main bar diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    main_dia: f64,
    #[arg(long, value_parser = lenient_count, default_value = "0")]
    main_count: u32,
    /// Stirrup diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    stirrup_dia: f64,
    /// Stirrup spacing (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    stirrup_spacing: f64,
}

#[derive(Args)]
pub(crate) struct ColumnArgs {
    #[arg(long, default_value = "")]
    label: String,
    /// Height (m)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    height: f64,
    /// Width (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    width: f64,
    /// Depth (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    depth: f64,
    /// Clear cover (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "40")]
    cover: f64,
    /// Main bar diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    main_dia: f64,
    #[arg(long, value_parser = lenient_count, default_value = "0")]
    main_count: u32,
    /// Tie diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    tie_dia: f64,
    /// Tie spacing (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    tie_spacing: f64,
}

#[derive(Args)]
pub(crate) struct SlabArgs {
    #[arg(long, default_value = "")]
    label: String,
    /// Length (m)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    length: f64,
    /// Width (m)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    width: f64,
    /// Thickness (mm), recorded only
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    thickness: f64,
    /// Clear cover (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "20")]
    cover: f64,
    /// Main bar diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    main_dia: f64,
    /// Main bar spacing (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    main_spacing: f64,
    /// Distribution bar diameter (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    dist_dia: f64,
    /// Distribution bar spacing (mm)
    #[arg(long, value_parser = lenient_decimal, default_value = "0")]
    dist_spacing: f64,
}

impl ElementCommand {
    pub(crate) fn into_element(self) -> StructuralElement {
        match self {
            ElementCommand::Beam(a) => StructuralElement::Beam(BeamInput {
                label: a.label,
                length_m: a.length,
                width_mm: a.width,
                depth_mm: a.depth,
                cover_mm: a.cover,
                main_bar_dia_mm: a.main_dia,
                main_bar_count: a.main_count,
                stirrup_dia_mm: a.stirrup_dia,
                stirrup_spacing_mm: a.stirrup_spacing,
            }),
            ElementCommand::Column(a) => StructuralElement::Column(ColumnInput {
                label: a.label,
                height_m: a.height,
                width_mm: a.width,
                depth_mm: a.depth,
                cover_mm: a.cover,
                main_bar_dia_mm: a.main_dia,
                main_bar_count: a.main_count,
                tie_dia_mm: a.tie_dia,
                tie_spacing_mm: a.tie_spacing,
            }),
            ElementCommand::Slab(a) => StructuralElement::Slab(SlabInput {
                label: a.label,
                length_m: a.length,
                width_m: a.width,
                thickness_mm: a.thickness,
                cover_mm: a.cover,
                main_bar_dia_mm: a.main_dia,
                main_bar_spacing_mm: a.main_spacing,
                dist_bar_dia_mm: a.dist_dia,
                dist_bar_spacing_mm: a.dist_spacing,
            }),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Quick(args) => run_quick(args, cli.json),
        Command::Steel(element) => run_steel(element.into_element(), cli.json),
        Command::Bars => run_bars(cli.json),
        Command::Project(command) => desk::run(command, cli.json),
    }
}

fn run_quick(args: QuickArgs, json_out: bool) -> Result<()> {
    let interactive = args.interactive;
    let mut form = args.into_form();
    if interactive {
        prompt_form(&mut form);
    }

    let (member, rates) = form.to_inputs();
    debug!(?member, ?rates, "quick estimate");
    let result = quick_estimate(&member, &rates);

    if json_out {
        return print_json(&result);
    }

    banner("QUICK ESTIMATE");
    println!("  Concrete volume:  {}", format::volume(result.concrete_volume_m3));
    println!("  Steel area:       {}", format::area(result.steel_area_mm2));
    println!("  Steel weight:     {}", format::weight(result.steel_weight_kg));
    println!("  Total cost:       {}", format::currency("₹", result.total_cost));
    println!();
    println!("  (materials only: concrete + steel supply)");
    Ok(())
}

fn run_steel(element: StructuralElement, json_out: bool) -> Result<()> {
    match element.steel_weight() {
        Some(result) => {
            if json_out {
                return print_json(&result);
            }
            banner("STEEL TAKE-OFF");
            print_take_off(&element, &result);
        }
        None => {
            let reason = withheld_reason(&element);
            if json_out {
                return print_json(&json!({
                    "type": element.element_type(),
                    "withheld": true,
                    "reason": reason,
                }));
            }
            println!("{} calculation withheld: {}", element.element_type(), reason);
        }
    }
    Ok(())
}

fn run_bars(json_out: bool) -> Result<()> {
    let table = rebar_table();
    if json_out {
        return print_json(&table);
    }

    banner("NOMINAL BAR SIZES");
    println!("  {:<8} {:>10}  {:>12}", "Size", "Area", "Unit weight");
    for bar in &table {
        println!(
            "  {:<8} {:>10}  {:>7.3} kg/m",
            bar.size.display_name(),
            format::area(bar.area_mm2),
            bar.unit_weight_kg_per_m
        );
    }
    Ok(())
}

/// The first incomplete field of a withheld element.
pub(crate) fn withheld_reason(element: &StructuralElement) -> String {
    match element.validate() {
        Err(e) => e.to_string(),
        Ok(()) => "incomplete input".to_string(),
    }
}

pub(crate) fn print_take_off(element: &StructuralElement, result: &ElementSteelResult) {
    let label = match element.label() {
        "" => "(unlabelled)",
        label => label,
    };
    println!("  {} {}", element.element_type(), label);
    for s in result.schedules() {
        println!(
            "    {:<26} {:>6} × {:>8} = {:>9}   {:.3} kg/m   {:>10}",
            s.description,
            format::count(s.bar_count),
            format::length(s.cutting_length_m),
            format::length(s.total_length_m),
            s.unit_weight_kg_per_m,
            format::weight(s.weight_kg)
        );
    }
    println!("    Total steel: {}", format::weight(result.total_weight_kg()));
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

pub(crate) fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

/// clap value parser that never rejects: bad text is 0.
pub(crate) fn lenient_decimal(text: &str) -> Result<f64, String> {
    Ok(parse_decimal(text))
}

pub(crate) fn lenient_count(text: &str) -> Result<u32, String> {
    Ok(parse_count(text))
}

/// Parse a bar group written as `COUNTxDIA`, e.g. `4x16`.
pub(crate) fn parse_bar_group(text: &str) -> Result<SteelBarGroup, String> {
    let (count, dia) = text
        .split_once(|c: char| c == 'x' || c == 'X' || c == '×')
        .ok_or_else(|| format!("expected COUNTxDIA, e.g. 4x16, got '{}'", text))?;
    let dia = dia.trim_start_matches(|c: char| c.is_alphabetic() || c == 'Ø' || c == '#');
    Ok(SteelBarGroup::new(parse_count(count), parse_decimal(dia)))
}

fn prompt_text(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    match input.trim() {
        "" => default.to_string(),
        typed => typed.to_string(),
    }
}

fn prompt_form(form: &mut QuickEstimatorForm) {
    let fields = [
        ("Concrete rate (per m³)", &mut form.concrete_rate),
        ("Steel rate (per kg)", &mut form.steel_rate),
        ("Length (m)", &mut form.length),
        ("Width (m)", &mut form.width),
        ("Depth (m)", &mut form.depth),
        ("Quantity", &mut form.quantity),
        ("Number of bars", &mut form.number_of_bars),
        ("Bar diameter (mm)", &mut form.bar_diameter_mm),
    ];
    for (label, value) in fields {
        let current = value.clone();
        *value = prompt_text(&format!("{} [{}]: ", label, current), &current);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
