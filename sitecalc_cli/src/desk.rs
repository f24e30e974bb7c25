//! Project desk commands.
//!
//! Each editing command takes the file lock, loads the project, applies
//! one change and saves it back atomically.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use sitecalc_core::estimate::estimate_member;
use sitecalc_core::file_io::{load_project, load_project_with_lock_check, save_project, FileLock};
use sitecalc_core::{Member, Project, SteelBarGroup, SteelWeightMethod};

use crate::format;
use crate::{
    banner, lenient_count, lenient_decimal, parse_bar_group, print_json, print_take_off, withheld_reason,
    ElementCommand,
};

#[derive(Subcommand)]
pub(crate) enum ProjectCommand {
    /// Create a project file
    New {
        file: PathBuf,
        /// Project name
        #[arg(long)]
        name: String,
        /// Person preparing the estimate
        #[arg(long, default_value = "")]
        estimator: String,
        /// Start without the sample column row
        #[arg(long)]
        empty: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Append a member row
    AddMember {
        file: PathBuf,
        #[command(flatten)]
        member: MemberArgs,
    },
    /// Change fields of a member row
    EditMember {
        file: PathBuf,
        /// Member position (1-based) or id
        member: String,
        #[command(flatten)]
        changes: MemberArgs,
    },
    /// Delete a member row
    RemoveMember {
        file: PathBuf,
        /// Member position (1-based) or id
        member: String,
    },
    /// Add a steel take-off element
    AddElement {
        file: PathBuf,
        #[command(subcommand)]
        element: ElementCommand,
    },
    /// Delete a steel take-off element
    RemoveElement {
        file: PathBuf,
        /// Element id
        id: String,
    },
    /// Update rates, steel method or currency
    Rates {
        file: PathBuf,
        #[command(flatten)]
        rates: RateArgs,
    },
    /// Print members, take-offs and totals
    Show { file: PathBuf },
}

/// Member fields. Omitted fields keep their current (or starting) value.
#[derive(Args)]
pub(crate) struct MemberArgs {
    #[arg(long)]
    name: Option<String>,
    /// Length (m)
    #[arg(long, value_parser = lenient_decimal)]
    length: Option<f64>,
    /// Width (m)
    #[arg(long, value_parser = lenient_decimal)]
    width: Option<f64>,
    /// Depth (m)
    #[arg(long, value_parser = lenient_decimal)]
    depth: Option<f64>,
    #[arg(long, value_parser = lenient_count)]
    quantity: Option<u32>,
    /// Bar group as COUNTxDIA (repeatable), replaces the existing groups
    #[arg(long = "bar", value_parser = parse_bar_group)]
    bars: Vec<SteelBarGroup>,
}

impl MemberArgs {
    fn apply(self, member: &mut Member) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(length) = self.length {
            member.length_m = length;
        }
        if let Some(width) = self.width {
            member.width_m = width;
        }
        if let Some(depth) = self.depth {
            member.depth_m = depth;
        }
        if let Some(quantity) = self.quantity {
            member.quantity = quantity;
        }
        if !self.bars.is_empty() {
            member.bars = self.bars;
        }
    }
}

#[derive(Args)]
pub(crate) struct RateArgs {
    /// Concrete supply rate per m³
    #[arg(long, value_parser = lenient_decimal)]
    concrete: Option<f64>,
    /// Steel supply rate per kg
    #[arg(long, value_parser = lenient_decimal)]
    steel: Option<f64>,
    /// Concrete labor rate per m³
    #[arg(long, value_parser = lenient_decimal)]
    concrete_labor: Option<f64>,
    /// Steel labor rate per kg
    #[arg(long, value_parser = lenient_decimal)]
    steel_labor: Option<f64>,
    /// Estimate member steel as this percentage of concrete volume
    #[arg(long, value_parser = lenient_decimal, conflicts_with = "assumed_length")]
    steel_percent: Option<f64>,
    /// Estimate member steel as bar area × member length (default)
    #[arg(long)]
    assumed_length: bool,
    #[arg(long)]
    currency: Option<String>,
}

impl RateArgs {
    fn apply(self, project: &mut Project) {
        let settings = &mut project.settings;
        if let Some(rate) = self.concrete {
            settings.rates.concrete_rate = rate;
        }
        if let Some(rate) = self.steel {
            settings.rates.steel_rate = rate;
        }
        if let Some(rate) = self.concrete_labor {
            settings.rates.concrete_labor_rate = rate;
        }
        if let Some(rate) = self.steel_labor {
            settings.rates.steel_labor_rate = rate;
        }
        if let Some(steel_percent) = self.steel_percent {
            settings.steel_method = SteelWeightMethod::PercentageOfVolume { steel_percent };
        } else if self.assumed_length {
            settings.steel_method = SteelWeightMethod::AssumedBarLength;
        }
        if let Some(symbol) = self.currency {
            settings.currency_symbol = symbol;
        }
        project.touch();
    }
}

pub(crate) fn run(command: ProjectCommand, json_out: bool) -> Result<()> {
    match command {
        ProjectCommand::New { file, name, estimator, empty, force } => {
            if file.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", file.display());
            }
            let mut project = Project::new(name, estimator);
            if !empty {
                project.add_member(Member::sample_column());
            }
            let _lock = lock(&file)?;
            save(&project, &file)?;
            report(&project, json_out)
        }
        ProjectCommand::AddMember { file, member } => {
            let project = edit(&file, |project| {
                let mut row = Member::placeholder(project.member_count() + 1);
                member.apply(&mut row);
                let id = project.add_member(row);
                info!(%id, "member added");
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::EditMember { file, member, changes } => {
            let project = edit(&file, |project| {
                let id = project.find_member(&member)?.id;
                if let Some(row) = project.get_member_mut(&id) {
                    changes.apply(row);
                }
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::RemoveMember { file, member } => {
            let project = edit(&file, |project| {
                let id = project.find_member(&member)?.id;
                project.remove_member(&id);
                info!(%id, "member removed");
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::AddElement { file, element } => {
            let element = element.into_element();
            let project = edit(&file, |project| {
                let id = project.add_element(element);
                info!(%id, "element added");
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::RemoveElement { file, id } => {
            let id = Uuid::parse_str(&id).with_context(|| format!("'{}' is not an element id", id))?;
            let project = edit(&file, |project| {
                if project.remove_element(&id).is_none() {
                    bail!("no element with id {}", id);
                }
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::Rates { file, rates } => {
            let project = edit(&file, |project| {
                rates.apply(project);
                Ok(())
            })?;
            report(&project, json_out)
        }
        ProjectCommand::Show { file } => {
            let (project, lock_info) = load_project_with_lock_check(&file)
                .with_context(|| format!("failed to open {}", file.display()))?;
            if let Some(holder) = lock_info {
                warn!(holder = %holder.holder(), "project is open for editing elsewhere");
            }
            report(&project, json_out)
        }
    }
}

fn lock(file: &Path) -> Result<FileLock> {
    FileLock::acquire(file, whoami::username()).with_context(|| format!("failed to lock {}", file.display()))
}

fn save(project: &Project, file: &Path) -> Result<()> {
    save_project(project, file).with_context(|| format!("failed to save {}", file.display()))
}

/// Load, change and save a project while holding its lock.
fn edit<F>(file: &Path, change: F) -> Result<Project>
where
    F: FnOnce(&mut Project) -> Result<()>,
{
    let _lock = lock(file)?;
    let mut project = load_project(file).with_context(|| format!("failed to open {}", file.display()))?;
    change(&mut project)?;
    save(&project, file)?;
    Ok(project)
}

fn report(project: &Project, json_out: bool) -> Result<()> {
    let symbol = project.settings.currency_symbol.as_str();
    let totals = project.totals();

    if json_out {
        let elements: Vec<_> = project
            .element_results()
            .into_iter()
            .map(|(id, element, result)| match result {
                Some(result) => json!({ "id": id, "element": element, "result": result }),
                None => json!({ "id": id, "element": element, "withheld": withheld_reason(element) }),
            })
            .collect();
        return print_json(&json!({
            "project": project,
            "member_estimates": project.member_estimates(),
            "elements": elements,
            "totals": totals,
        }));
    }

    banner(&format!("PROJECT: {}", project.meta.name));
    if !project.meta.estimator.is_empty() {
        println!("  Estimator: {}", project.meta.estimator);
    }
    let rates = &project.settings.rates;
    println!(
        "  Rates: concrete {} /m³, steel {} /kg, labor {} /m³ + {} /kg",
        format::currency(symbol, rates.concrete_rate),
        format::currency(symbol, rates.steel_rate),
        format::currency(symbol, rates.concrete_labor_rate),
        format::currency(symbol, rates.steel_labor_rate),
    );
    println!("  Steel method: {}", project.settings.steel_method.display_name());
    println!();

    println!("Members:");
    if project.members.is_empty() {
        println!("  (none)");
    }
    for (index, member) in project.members.iter().enumerate() {
        let bars: Vec<String> = member
            .bars
            .iter()
            .map(|g| format!("{}×{}mm", g.count, g.diameter_mm))
            .collect();
        println!(
            "  {}. {}  {} × {} × {} m, qty {}, bars {}",
            index + 1,
            member.name,
            member.length_m,
            member.width_m,
            member.depth_m,
            member.quantity,
            bars.join(" + ")
        );
        if member.has_dimensions() {
            let line = estimate_member(member, rates, project.settings.steel_method);
            println!(
                "     {}  {}  {}  {}",
                format::volume(line.concrete_volume_m3),
                format::area(line.steel_area_mm2),
                format::weight(line.steel_weight_kg),
                format::currency(symbol, line.material_cost)
            );
        }
    }
    println!();

    let elements = project.element_results();
    if !elements.is_empty() {
        println!("Steel take-offs:");
        for (id, element, result) in &elements {
            match result {
                Some(result) => print_take_off(element, result),
                None => println!("  {} {}: withheld, {}", element.element_type(), element.label(), withheld_reason(element)),
            }
            println!("    id {}", id);
        }
        println!();
    }

    println!("Totals:");
    println!("  Concrete volume:  {}", format::volume(totals.concrete_volume_m3));
    println!("  Steel area:       {}", format::area(totals.steel_area_mm2));
    println!("  Steel weight:     {}", format::weight(totals.steel_weight_kg));
    println!("  Material cost:    {}", format::currency(symbol, totals.material_cost));
    println!("  Labor cost:       {}", format::currency(symbol, totals.labor_cost));
    println!("  Grand total:      {}", format::currency(symbol, totals.grand_total));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sitecalc_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_member_args_apply_only_given_fields() {
        let mut member = Member::placeholder(2);
        MemberArgs {
            name: None,
            length: Some(4.0),
            width: None,
            depth: Some(0.45),
            quantity: None,
            bars: vec![SteelBarGroup::new(3, 12.0), SteelBarGroup::new(2, 16.0)],
        }
        .apply(&mut member);

        assert_eq!(member.name, "Member 2");
        assert_eq!(member.length_m, 4.0);
        assert_eq!(member.width_m, 0.0);
        assert_eq!(member.depth_m, 0.45);
        assert_eq!(member.quantity, 1);
        assert_eq!(member.bars.len(), 2);
    }

    #[test]
    fn test_rate_args_switch_method() {
        let mut project = Project::new("P", "");
        RateArgs {
            concrete: Some(7500.0),
            steel: None,
            concrete_labor: None,
            steel_labor: None,
            steel_percent: Some(1.2),
            assumed_length: false,
            currency: Some("Rs".to_string()),
        }
        .apply(&mut project);

        assert_eq!(project.settings.rates.concrete_rate, 7500.0);
        assert_eq!(project.settings.rates.steel_rate, 65.0);
        assert_eq!(
            project.settings.steel_method,
            SteelWeightMethod::PercentageOfVolume { steel_percent: 1.2 }
        );
        assert_eq!(project.settings.currency_symbol, "Rs");
    }

    #[test]
    fn test_desk_session() {
        let file = temp_path("desk.scp");
        let _ = std::fs::remove_file(&file);

        run(
            ProjectCommand::New {
                file: file.clone(),
                name: "Villa".to_string(),
                estimator: String::new(),
                empty: false,
                force: false,
            },
            true,
        )
        .unwrap();
        run(
            ProjectCommand::AddMember {
                file: file.clone(),
                member: MemberArgs {
                    name: Some("Beam B1".to_string()),
                    length: Some(4.0),
                    width: Some(0.23),
                    depth: Some(0.45),
                    quantity: Some(2),
                    bars: vec![],
                },
            },
            true,
        )
        .unwrap();
        run(ProjectCommand::RemoveMember { file: file.clone(), member: "1".to_string() }, true).unwrap();

        let project = load_project(&file).unwrap();
        assert_eq!(project.member_count(), 1);
        assert_eq!(project.members[0].name, "Beam B1");
        assert_eq!(project.members[0].bars, vec![SteelBarGroup::default()]);
        assert!(FileLock::check(&file).is_none());

        let again = ProjectCommand::New {
            file: file.clone(),
            name: "Villa".to_string(),
            estimator: String::new(),
            empty: true,
            force: false,
        };
        assert!(run(again, true).is_err());

        let _ = std::fs::remove_file(&file);
    }

    #[test]
    fn test_new_project_requires_name() {
        let file = temp_path("unnamed.scp");
        let _ = std::fs::remove_file(&file);
        let result = run(
            ProjectCommand::New {
                file: file.clone(),
                name: "  ".to_string(),
                estimator: String::new(),
                empty: true,
                force: false,
            },
            true,
        );
        assert!(result.is_err());
        assert!(!file.exists());
    }
}
