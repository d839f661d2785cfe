use fusion_processing::core::{
    ExecutionSettings, FusionExecutor, ParameterError, ParameterValue, ParameterValues,
    ToolRegistry,
};
use std::path::{Path, PathBuf};

fn resolve(tool_id: &str, values: ParameterValues) -> Result<(), ParameterError> {
    let registry = ToolRegistry::builtin();
    let tool = registry.get(tool_id).expect("tool is registered");
    tool.resolve(&values, Path::new("/scratch/run")).map(|_| ())
}

fn clip_values() -> ParameterValues {
    ParameterValues::new()
        .with("input", "a.las")
        .with("extent", "0,0,100,100")
}

#[test]
fn missing_required_parameter_is_reported() {
    let err = resolve("clipdata", ParameterValues::new().with("input", "a.las")).unwrap_err();
    assert_eq!(
        err,
        ParameterError::Missing {
            key: "extent".to_string()
        }
    );
    assert_eq!(err.code(), "FUS-PARAM-002");
}

#[test]
fn unknown_parameter_is_rejected() {
    let err = resolve("clipdata", clip_values().with("radius", 5)).unwrap_err();
    assert_eq!(err.code(), "FUS-PARAM-001");
    assert_eq!(err.key(), "radius");
}

#[test]
fn numbers_outside_bounds_are_rejected() {
    let values = ParameterValues::new()
        .with("input", "surface.dtm")
        .with("latitude", 91);
    let err = resolve("topometrics", values).unwrap_err();
    assert!(matches!(err, ParameterError::OutOfRange { ref key, .. } if key == "latitude"));

    let at_bound = ParameterValues::new()
        .with("input", "surface.dtm")
        .with("latitude", -90);
    assert!(resolve("topometrics", at_bound).is_ok());
}

#[test]
fn integer_parameters_reject_fractions() {
    let values = ParameterValues::new()
        .with("input", "surface.dtm")
        .with("wsize", "2.5");
    let err = resolve("topometrics", values).unwrap_err();
    assert_eq!(err.code(), "FUS-PARAM-003");
}

#[test]
fn integers_beyond_i64_are_rejected_instead_of_clamped() {
    for huge in [serde_json::json!("1e30"), serde_json::json!(1e30), serde_json::json!("-1e19")] {
        let values = ParameterValues::new()
            .with("input", "a.xyz")
            .with("output", "o.dtm")
            .with("fillholes", huge.clone());
        let err = resolve("xyz2dtm", values).unwrap_err();
        assert_eq!(err.code(), "FUS-PARAM-004", "{}", huge);
        assert_eq!(err.key(), "fillholes");
    }
}

#[test]
fn large_integers_keep_every_digit() {
    let registry = ToolRegistry::builtin();
    let tool = registry.get("xyz2dtm").unwrap();
    let values = ParameterValues::new()
        .with("input", "a.xyz")
        .with("fillholes", "9007199254740993");
    let resolved = tool.resolve(&values, Path::new("/scratch/run")).unwrap();
    assert_eq!(
        resolved.get("fillholes"),
        Some(&ParameterValue::Integer(9_007_199_254_740_993))
    );
}

#[test]
fn wrong_extension_is_rejected() {
    let values = ParameterValues::new()
        .with("input", "a.txt")
        .with("extent", "0,0,100,100");
    let err = resolve("clipdata", values).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'input' file 'a.txt' must have extension .las or .laz"
    );
}

#[test]
fn extensions_are_matched_case_insensitively() {
    let values = ParameterValues::new()
        .with("input", "A.LAZ")
        .with("extent", "0,0,100,100");
    assert!(resolve("clipdata", values).is_ok());
}

#[test]
fn single_file_parameters_reject_lists() {
    let values = ParameterValues::new().with("input", "a.dtm;b.dtm");
    let err = resolve("dtm2tif", values).unwrap_err();
    assert_eq!(
        err,
        ParameterError::TooManyFiles {
            key: "input".to_string(),
            count: 2
        }
    );
}

#[test]
fn malformed_extents_are_rejected() {
    for extent in ["0,0,100", "100,0,0,100", "a,b,c,d"] {
        let values = ParameterValues::new()
            .with("input", "a.las")
            .with("extent", extent);
        let err = resolve("clipdata", values).unwrap_err();
        assert_eq!(err.code(), "FUS-PARAM-007", "extent {}", extent);
    }
}

#[test]
fn unknown_enum_label_lists_the_options() {
    let err = resolve("clipdata", clip_values().with("shape", "Hexagon")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'shape' expects one of Rectangle, Circle, got 'Hexagon'"
    );
}

#[test]
fn mutually_exclusive_switches_are_rejected() {
    let values = ParameterValues::new()
        .with("input", "a.las")
        .with("ground", "g.dtm")
        .with("fuel", true)
        .with("first", true);
    let err = resolve("gridmetrics", values).unwrap_err();
    assert_eq!(
        err,
        ParameterError::MutuallyExclusive {
            first: "fuel".to_string(),
            second: "first".to_string()
        }
    );
}

#[test]
fn switch_with_missing_companion_values_is_rejected() {
    let values = ParameterValues::new()
        .with("input", "a.las")
        .with("mask", "stands.shp")
        .with("shape", true)
        .with("field", "1");
    let err = resolve("polyclipdata", values).unwrap_err();
    assert_eq!(
        err,
        ParameterError::MissingDependency {
            key: "shape".to_string(),
            requires: "value".to_string()
        }
    );
}

#[test]
fn blank_values_count_as_unset() {
    let values = clip_values().with("ground", "  ").with("modifiers", "");
    assert!(resolve("clipdata", values).is_ok());
}

#[test]
fn executor_reports_validation_errors_with_tool_context() {
    let settings = ExecutionSettings {
        install_dir: PathBuf::from("/opt/FUSION"),
        scratch_dir: PathBuf::from("/scratch"),
        ..ExecutionSettings::default()
    };
    let executor = FusionExecutor::new(settings, ToolRegistry::builtin());

    let err = executor
        .prepare("clipdata", &ParameterValues::new().with("input", "a.las"))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.code, "FUS-PARAM-002");
    assert_eq!(err.context.get("tool").map(String::as_str), Some("clipdata"));
    assert_eq!(err.context.get("parameter").map(String::as_str), Some("extent"));
}
