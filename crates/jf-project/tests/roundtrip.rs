use jf_project::schema::*;
use jf_project::{ProjectError, load_case, load_json, load_yaml, save_json, save_yaml, validate_case};

fn full_case() -> CycleCase {
    CycleCase {
        version: 1,
        name: "Regenerated intercooled air".to_string(),
        description: Some("two-stage compression with regenerator".to_string()),
        gas: "air".to_string(),
        cp_model: CpModelDef::Polynomial,
        inlet: InletDef {
            pressure_bar: 1.0,
            temperature: TemperatureDef::kelvin(293.15),
        },
        compressor: MachineDef {
            outlet_pressure_bar: 10.0,
            efficiency: 0.85,
        },
        heater: HeaterDef {
            outlet_temperature: TemperatureDef::celsius(1000.0),
            pressure_bar: Some(9.8),
        },
        turbine: MachineDef {
            outlet_pressure_bar: 1.0,
            efficiency: 0.9,
        },
        regeneration: Some(RegenerationDef {
            effectiveness: 0.8,
            pinch_point_k: Some(15.0),
        }),
        intercooling: Some(IntercoolingDef {
            outlet_temperature: TemperatureDef::kelvin(300.0),
            intermediate_pressure: IntermediatePressureDef::ArithmeticMean,
        }),
        mass_flow: Some(MassFlowDef::FromPower {
            basis: PowerBasisDef::Turbine,
            power_kw: 1200.0,
        }),
    }
}

#[test]
fn roundtrip_yaml_simple_case() {
    let case = CycleCase::simple("Simple", 8.0, 1273.15);
    validate_case(&case).unwrap();

    let path = std::env::temp_dir().join("jf_project_roundtrip_simple.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_yaml_full_case() {
    let case = full_case();
    let path = std::env::temp_dir().join("jf_project_roundtrip_full.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_json_full_case() {
    let case = full_case();
    let path = std::env::temp_dir().join("jf_project_roundtrip_full.json");
    save_json(&path, &case).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(case, loaded);

    // Extension picks the format
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn invalid_case_is_not_saved() {
    let mut case = full_case();
    case.compressor.efficiency = 0.0;
    let path = std::env::temp_dir().join("jf_project_invalid.yaml");
    let _ = std::fs::remove_file(&path);

    let result = save_yaml(&path, &case);
    assert!(matches!(result, Err(ProjectError::Validation(_))));
    assert!(!path.exists());
}

#[test]
fn loading_validates() {
    let path = std::env::temp_dir().join("jf_project_bad_version.yaml");
    let mut case = CycleCase::simple("Future", 8.0, 1273.15);
    case.version = 99;
    std::fs::write(&path, serde_yaml::to_string(&case).unwrap()).unwrap();

    let result = load_yaml(&path);
    assert!(matches!(result, Err(ProjectError::Validation(_))));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("jf_project_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(ProjectError::Io(_))));
}
