use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

use sitecalc_core::calculations::{beam, BeamInput, ColumnInput, SlabInput, StructuralElement};
use sitecalc_core::equations::{
    member_concrete_volume, steel_bar_area, steel_weight_from_area, steel_weight_from_percentage,
    unit_weight_per_meter,
};
use sitecalc_core::estimate::{
    project_totals, project_totals_by, Member, RateConfig, SteelBarGroup, SteelWeightMethod,
};
use sitecalc_core::{load_project, save_project, CalcResult, Project};

fn worked_beam() -> BeamInput {
    BeamInput {
        label: "B1".to_string(),
        length_m: 6.0,
        width_mm: 230.0,
        depth_mm: 450.0,
        cover_mm: 25.0,
        main_bar_dia_mm: 16.0,
        main_bar_count: 4,
        stirrup_dia_mm: 8.0,
        stirrup_spacing_mm: 200.0,
    }
}

fn temp_path(file_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sitecalc_it_{}_{}", std::process::id(), file_name))
}

#[test]
fn bar_area_follows_circle_formula() {
    for n in [0u32, 1, 3, 12] {
        for d in [6.0, 8.0, 16.0, 28.0] {
            assert!((steel_bar_area(n, d) - n as f64 * PI * (d / 2.0).powi(2)).abs() < 1e-9);
        }
    }
    assert_eq!(steel_bar_area(5, 0.0), 0.0);
}

#[test]
fn concrete_volume_is_multiplicative() {
    let v = member_concrete_volume(2.0, 3.0, 0.5, 2);
    assert!((v - 6.0).abs() < 1e-12);
    assert!((member_concrete_volume(4.0, 3.0, 0.5, 2) - 2.0 * v).abs() < 1e-12);
}

#[test]
fn worked_beam_example() {
    let result = beam::calculate(&worked_beam()).expect("complete input");

    assert!((result.main_bars.cutting_length_m - 6.238).abs() < 1e-9);
    assert!((result.main_bars.total_length_m - 24.952).abs() < 1e-9);
    assert!((result.main_bars.weight_kg - 24.952 * unit_weight_per_meter(16.0)).abs() < 1e-9);

    assert!((result.stirrups.cutting_length_m - 1.32).abs() < 1e-9);
    assert_eq!(result.stirrups.bar_count, 31.0);
    assert!((result.stirrups.total_length_m - 40.92).abs() < 1e-9);
    assert!((result.stirrups.weight_kg - 40.92 * unit_weight_per_meter(8.0)).abs() < 1e-9);

    assert!((result.total_weight_kg - 55.53).abs() < 0.01);
}

#[test]
fn take_offs_are_idempotent() {
    let elements = [
        StructuralElement::Beam(worked_beam()),
        StructuralElement::Column(ColumnInput {
            height_m: 3.0,
            width_mm: 300.0,
            depth_mm: 300.0,
            main_bar_dia_mm: 16.0,
            main_bar_count: 6,
            tie_dia_mm: 8.0,
            tie_spacing_mm: 150.0,
            ..ColumnInput::default()
        }),
        StructuralElement::Slab(SlabInput {
            length_m: 4.0,
            width_m: 3.0,
            main_bar_dia_mm: 10.0,
            main_bar_spacing_mm: 150.0,
            dist_bar_dia_mm: 8.0,
            dist_bar_spacing_mm: 200.0,
            ..SlabInput::default()
        }),
    ];
    for element in &elements {
        let first = element.steel_weight();
        assert!(first.is_some(), "{} should calculate", element.element_type());
        assert_eq!(first, element.steel_weight());
    }
}

#[test]
fn guards_never_leak_nan() {
    for value in [0.0, -1.0, f64::NAN] {
        let mut b = worked_beam();
        b.cover_mm = value;
        assert!(beam::calculate(&b).is_none());

        let mut b = worked_beam();
        b.main_bar_dia_mm = value;
        assert!(beam::calculate(&b).is_none());

        let mut b = worked_beam();
        b.stirrup_spacing_mm = value;
        assert!(beam::calculate(&b).is_none());
    }
}

#[test]
fn steel_methods_stay_distinct() {
    let member = Member::new("C1", 0.3, 0.3, 3.0, 4).with_bars(SteelBarGroup::new(4, 20.0));
    let rates = RateConfig::default();

    let by_area = project_totals(std::slice::from_ref(&member), &rates);
    assert!(
        (by_area.steel_weight_kg - steel_weight_from_area(member.steel_area_mm2(), 1.2)).abs() < 1e-9
    );

    let by_percent = project_totals_by(
        std::slice::from_ref(&member),
        &rates,
        SteelWeightMethod::PercentageOfVolume { steel_percent: 1.5 },
    );
    assert!((by_percent.steel_weight_kg - steel_weight_from_percentage(1.08, 1.5)).abs() < 1e-9);
}

#[test]
fn empty_project_totals_are_zero() {
    let totals = project_totals(&[], &RateConfig::default());
    assert_eq!(totals.concrete_volume_m3, 0.0);
    assert_eq!(totals.steel_area_mm2, 0.0);
    assert_eq!(totals.steel_weight_kg, 0.0);
    assert_eq!(totals.material_cost, 0.0);
    assert_eq!(totals.labor_cost, 0.0);
    assert_eq!(totals.grand_total, 0.0);
}

#[test]
fn project_file_keeps_members_and_elements() -> CalcResult<()> {
    let path = temp_path("desk.scp");

    let mut project = Project::new("Desk Roundtrip", "QA");
    project.add_member(Member::sample_column());
    project.add_placeholder_member();
    let beam_id = project.add_element(StructuralElement::Beam(worked_beam()));
    project.settings.rates.steel_rate = 72.0;

    save_project(&project, &path)?;
    let loaded = load_project(&path)?;

    assert_eq!(loaded.members, project.members);
    assert_eq!(loaded.settings, project.settings);
    assert_eq!(loaded.get_element(&beam_id), project.get_element(&beam_id));
    assert_eq!(loaded.totals(), project.totals());

    let _ = fs::remove_file(&path);
    Ok(())
}
