//! Loading, validating and running the bundled case files.

use psim_case::{
    CaseError, ValidationError, build_scrubber, build_streams, from_yaml_str, load, save_json,
    save_yaml,
};
use psim_equipment::{
    CalculationMode, Equipment, EquipmentStatus, EfficiencyModelKind, PressureDropModelKind,
};
use std::path::PathBuf;

fn case_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../cases")
        .join(name)
}

#[test]
fn rating_case_reproduces_reference_efficiency() {
    let case = load(&case_path("venturi_rating.yaml")).unwrap();
    let streams = build_streams(&case).unwrap();
    assert_eq!(streams.len(), 2);

    let solid = streams["air"].solid().unwrap();
    assert!((solid.mass_flow().value - 1.0 / 3600.0).abs() < 1e-18);
    assert_eq!(streams["air"].pressure().value, 101_325.0);

    let scrubber = build_scrubber(&case, &streams).unwrap();
    let sol = scrubber.solve().unwrap();
    assert_eq!(sol.status, EquipmentStatus::Solved);
    assert!((sol.efficiency.global - 0.23320931822736898).abs() < 1e-7);
    assert!((sol.pressure_drop.value - 0.34978059373051884).abs() < 1e-8);
}

#[test]
fn design_case_reaches_target() {
    let case = load(&case_path("venturi_design.json")).unwrap();
    let streams = build_streams(&case).unwrap();
    let flue = &streams["flue"];
    assert!((flue.temperature().value - 333.15).abs() < 1e-9);
    assert!((flue.pressure().value - 1.05e5).abs() < 1e-6);

    let sol = build_scrubber(&case, &streams).unwrap().solve().unwrap();
    assert!((sol.efficiency.global - 0.8).abs() < 1e-6);
    assert_eq!(sol.pressure_in.value, flue.pressure().value);
    assert!(sol.pressure_drop.value > 0.0);
}

#[test]
fn yaml_and_json_round_trip() {
    let case = load(&case_path("venturi_rating.yaml")).unwrap();
    let dir = std::env::temp_dir();

    let yaml = dir.join("psim_case_roundtrip.yaml");
    save_yaml(&yaml, &case).unwrap();
    assert_eq!(load(&yaml).unwrap(), case);

    let json = dir.join("psim_case_roundtrip.json");
    save_json(&json, &case).unwrap();
    assert_eq!(load(&json).unwrap(), case);
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load(&case_path("venturi_rating.toml")).unwrap_err();
    assert!(matches!(err, CaseError::UnsupportedFormat { .. }));
}

const MINIMAL: &str = r#"
version: 1
name: minimal
streams:
  - id: gas
    backend: { type: ideal_gas }
    temperature: 300
    pressure: 1 bar
    mass_flow: 0.2
    composition: { type: pure, species: N2 }
    solid:
      mass_flow: 0.001
      density: 1500
      diameters_um: [5, 10]
      fractions: [0.5, 0.5]
  - id: liquid
    backend: { type: incompressible }
    temperature: 300
    pressure: 1 bar
    mass_flow: 0.2
    composition: { type: pure, species: H2O }
"#;

fn validation_error(yaml: &str) -> ValidationError {
    match from_yaml_str(yaml) {
        Err(CaseError::Validation(e)) => e,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn minimal_case_without_scrubber() {
    let case = from_yaml_str(MINIMAL).unwrap();
    assert!(case.scrubber.is_none());
    let streams = build_streams(&case).unwrap();
    assert!(matches!(
        build_scrubber(&case, &streams),
        Err(CaseError::MissingSection { what: "scrubber" })
    ));
}

#[test]
fn missing_diameter_surfaces_when_solving() {
    let yaml = format!("{MINIMAL}scrubber: {{ id: s, gas: gas, liquid: liquid }}\n");
    let case = from_yaml_str(&yaml).unwrap();
    let streams = build_streams(&case).unwrap();
    let scrubber = build_scrubber(&case, &streams).unwrap();
    assert_eq!(scrubber.status(), EquipmentStatus::Unresolved);
    assert!(scrubber.solve().unwrap_err().to_string().contains("undefined diameter"));
}

#[test]
fn validation_failures() {
    let dup = MINIMAL.replace("id: liquid", "id: gas");
    assert!(matches!(
        validation_error(&dup),
        ValidationError::DuplicateId { .. }
    ));

    let missing = format!("{MINIMAL}scrubber: {{ id: s, gas: gas, liquid: nope, diameter_m: 0.1 }}\n");
    assert!(matches!(
        validation_error(&missing),
        ValidationError::MissingReference { .. }
    ));

    let swapped = format!("{MINIMAL}scrubber: {{ id: s, gas: liquid, liquid: gas, diameter_m: 0.1 }}\n");
    assert!(matches!(
        validation_error(&swapped),
        ValidationError::InvalidValue { .. }
    ));

    let bad_unit = MINIMAL.replace("pressure: 1 bar", "pressure: 1 furlong");
    assert!(matches!(
        validation_error(&bad_unit),
        ValidationError::InvalidValue { .. }
    ));

    let bad_species = MINIMAL.replace("species: N2", "species: Unobtainium");
    assert!(matches!(
        validation_error(&bad_species),
        ValidationError::InvalidValue { .. }
    ));

    let future = MINIMAL.replace("version: 1", "version: 9");
    assert_eq!(
        validation_error(&future),
        ValidationError::UnsupportedVersion { version: 9 }
    );

    let ragged = MINIMAL.replace("fractions: [0.5, 0.5]", "fractions: [1.0]");
    assert!(matches!(
        validation_error(&ragged),
        ValidationError::InvalidValue { .. }
    ));
}

#[test]
fn model_selectors_accept_numeric_ids() {
    let yaml = format!(
        "{MINIMAL}scrubber: {{ id: s, gas: gas, liquid: liquid, mode: 0, diameter_m: 0.25, \
         efficiency_model: 1, f: 0.5, pressure_drop_model: 4, throat_length_m: 0.3 }}\n"
    );
    let case = from_yaml_str(&yaml).unwrap();
    let def = case.scrubber.as_ref().unwrap();
    assert_eq!(def.mode, CalculationMode::Rating);
    assert_eq!(def.efficiency_model, EfficiencyModelKind::Calvert);
    assert_eq!(def.pressure_drop_model, PressureDropModelKind::Young);

    let named = yaml
        .replace("efficiency_model: 1", "efficiency_model: calvert")
        .replace("pressure_drop_model: 4", "pressure_drop_model: young");
    assert_eq!(from_yaml_str(&named).unwrap().scrubber, case.scrubber);

    let out_of_range = yaml.replace("pressure_drop_model: 4", "pressure_drop_model: 7");
    let err = from_yaml_str(&out_of_range).unwrap_err();
    assert!(matches!(err, CaseError::Yaml(_)));
    assert!(err.to_string().contains("pressure drop model id"));
}
