use fusion_processing::core::{build_plan, CommandPlan, Launch, ParameterValues, ToolRegistry};
use insta::assert_snapshot;
use std::path::{Path, PathBuf};

const INSTALL_DIR: &str = "/opt/FUSION";
const INVOCATION_DIR: &str = "/scratch/run";

fn plan(tool_id: &str, values: ParameterValues) -> CommandPlan {
    let registry = ToolRegistry::builtin();
    let tool = registry.get(tool_id).expect("tool is registered");
    let resolved = tool
        .resolve(&values, Path::new(INVOCATION_DIR))
        .expect("values are valid");
    build_plan(&tool, &resolved, Path::new(INSTALL_DIR), Path::new(INVOCATION_DIR))
}

#[test]
fn clipdata_puts_switches_before_input_output_and_extent() {
    let plan = plan(
        "clipdata",
        ParameterValues::new()
            .with("input", "a.las")
            .with("extent", "0,0,100,100")
            .with("shape", 0)
            .with("version64", true),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/ClipData64.exe /shape:0 a.las /scratch/run/output.las 0.0 0.0 100.0 100.0"
    );
    assert_eq!(
        plan.outputs["output"],
        PathBuf::from("/scratch/run/output.las")
    );
}

#[test]
fn clipdata_uses_32_bit_build_by_default() {
    let plan = plan(
        "clipdata",
        ParameterValues::new()
            .with("input", "a.las")
            .with("output", "clip.las")
            .with("extent", "10,20,30,40")
            .with("ground", "ground.dtm")
            .with("height", true)
            .with("modifiers", "/class:2"),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/ClipData.exe /class:2 /dtm:ground.dtm /height a.las clip.las 10.0 20.0 30.0 40.0"
    );
}

#[test]
fn surface_tools_append_units_and_zero_projection() {
    let plan = plan(
        "gridsurfacecreate",
        ParameterValues::new()
            .with("input", "ground.las")
            .with("output", "ground.dtm")
            .with("cellsize", 1)
            .with("median", 3)
            .with("zunits", "Feet"),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/GridSurfaceCreate64.exe /median:3 ground.dtm 1.0 M F 0 0 0 0 ground.las"
    );
}

#[test]
fn several_inputs_are_passed_through_a_list_file() {
    let plan = plan(
        "cover",
        ParameterValues::new()
            .with("input", "a.las;b.las")
            .with("ground", "g.dtm")
            .with("output", "cover.dtm")
            .with("cellsize", 15)
            .with("heightbreak", 2)
            .with("coordsys", "UTM")
            .with("zone", 10)
            .with("hdatum", "NAD83")
            .with("vdatum", "NAVD88")
            .with("version64", false)
            .with("all", true),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/Cover.exe /all g.dtm cover.dtm 2.0 15.0 m m 1 10 2 2 /scratch/run/input_files.txt"
    );
    assert_eq!(plan.list_files.len(), 1);
    assert_eq!(plan.list_files[0].contents(), "a.las\nb.las\n");
}

#[test]
fn xyz2dtm_always_uses_a_list_file() {
    let plan = plan("xyz2dtm", ParameterValues::new().with("input", "points.xyz"));

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/XYZ2DTM.exe /scratch/run/output.dtm m m 0 0 0 0 /scratch/run/input_files.txt"
    );
    assert_eq!(plan.list_files[0].contents(), "points.xyz\n");
}

#[test]
fn canopymaxima_renders_window_size_from_defaults() {
    let plan = plan(
        "canopymaxima",
        ParameterValues::new()
            .with("input", "chm.dtm")
            .with("output", "trees.csv")
            .with("summary", true),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/CanopyMaxima.exe /wse:2.51503,0,0.00901,0 /summary /threshold:10.0 chm.dtm trees.csv"
    );
}

#[test]
fn polyclipdata_shape_filter_joins_field_and_value() {
    let plan = plan(
        "polyclipdata",
        ParameterValues::new()
            .with("input", "a.las")
            .with("mask", "stands.shp")
            .with("output", "clip.las")
            .with("shape", true)
            .with("field", "1")
            .with("value", "TR5"),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/PolyClipData.exe /shape:1,TR5 stands.shp clip.las a.las"
    );
}

#[test]
fn empty_enum_code_emits_no_token() {
    let plan = plan(
        "intensityimage",
        ParameterValues::new()
            .with("input", "a.las")
            .with("output", "intensity.bmp")
            .with("format", "Bitmap")
            .with("pixel", 0.5)
            .with("hist", true),
    );

    assert_snapshot!(
        plan.command.render(),
        @"/opt/FUSION/IntensityImage.exe /hist 0.5 intensity.bmp a.las"
    );
}

#[test]
fn dependent_switch_needs_its_companion() {
    let without_csv = plan(
        "dtm2xyz",
        ParameterValues::new()
            .with("input", "g.dtm")
            .with("output", "g.xyz")
            .with("noheader", true),
    );
    let with_csv = plan(
        "dtm2xyz",
        ParameterValues::new()
            .with("input", "g.dtm")
            .with("output", "g.csv")
            .with("csv", true)
            .with("noheader", true),
    );

    assert_snapshot!(without_csv.command.render(), @"/opt/FUSION/DTM2XYZ.exe g.dtm g.xyz");
    assert_snapshot!(with_csv.command.render(), @"/opt/FUSION/DTM2XYZ.exe /csv /noheader g.dtm g.csv");
}

#[test]
fn viewer_launches_detached_without_arguments() {
    let plan = plan("openviewer", ParameterValues::new());

    assert_snapshot!(plan.command.render(), @"/opt/FUSION/pdq.exe");
    assert_eq!(plan.launch, Launch::Detached);
    assert!(plan.outputs.is_empty());
}

#[test]
fn paths_with_spaces_are_quoted_only_for_display() {
    let plan = plan(
        "dtm2tif",
        ParameterValues::new()
            .with("input", "my data/g.dtm")
            .with("output", "out.tif"),
    );

    assert_snapshot!(plan.command.render(), @r#"/opt/FUSION/DTM2TIF.exe "my data/g.dtm" out.tif"#);
    assert_eq!(plan.command.args, vec!["my data/g.dtm", "out.tif"]);
}

#[test]
fn treeseg_passes_several_point_files_through_a_list_file() {
    let single = plan(
        "treeseg",
        ParameterValues::new()
            .with("input", "chm.dtm")
            .with("output", "trees")
            .with("laspts", "a.las"),
    );
    let several = plan(
        "treeseg",
        ParameterValues::new()
            .with("input", "chm.dtm")
            .with("output", "trees")
            .with("laspts", "a.las;b.las"),
    );

    assert_snapshot!(single.command.render(), @"/opt/FUSION/TreeSeg64.exe /points:a.las chm.dtm 0 trees");
    assert!(single.list_files.is_empty());
    assert_snapshot!(
        several.command.render(),
        @"/opt/FUSION/TreeSeg64.exe /points:/scratch/run/laspts_files.txt chm.dtm 0 trees"
    );
    assert_eq!(
        several.list_files[0].entries,
        vec![PathBuf::from("a.las"), PathBuf::from("b.las")]
    );
}
