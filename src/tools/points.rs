use super::options::*;
use crate::core::descriptor::{Part, Segment, ToolDescriptor, ToolGroup};
use crate::core::params::{EnumOption, ParameterSpec};
use crate::core::registry::ToolRegistryBuilder;

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder
        .register(canopymaxima())
        .register(catalog())
        .register(clipdata())
        .register(cloudmetrics())
        .register(cover())
        .register(densitymetrics())
        .register(filterdata())
        .register(firstlastreturn())
        .register(gridmetrics())
        .register(groundfilter())
        .register(mergedata())
        .register(polyclipdata())
        .register(returndensity())
        .register(thindata())
        .register(treeseg());
}

const WINDOW_SIZE: &[Part] = &[
    Part::Param("param_a"),
    Part::Text("0"),
    Part::Param("param_c"),
    Part::Text("0"),
];

fn canopymaxima() -> ToolDescriptor {
    ToolDescriptor::builder("canopymaxima", "Canopy maxima", ToolGroup::Points)
        .summary("Identifies local maxima in a canopy height model as tree candidates.")
        .executable("CanopyMaxima.exe")
        .param(ParameterSpec::input("input", "Input FUSION canopy height model", DTM_FILES))
        .param(ground_model().optional())
        .param(
            ParameterSpec::double("threshold", "Height threshold")
                .default_value(10.0)
                .min(0.0),
        )
        .param(
            ParameterSpec::double("param_a", "Variable window size: parameter A")
                .default_value(2.51503)
                .min(0.0),
        )
        .param(
            ParameterSpec::double("param_c", "Parameter C")
                .default_value(0.00901)
                .min(0.0),
        )
        .param(ParameterSpec::boolean("summary", "Summary (tree height summary statistics)"))
        .param(modifiers())
        .param(ParameterSpec::output("output", "Output", CSV_FILES))
        .template([
            Segment::joined("wse", WINDOW_SIZE),
            Segment::switch("summary"),
            Segment::modifiers(MODIFIERS),
            Segment::option("ground"),
            Segment::option("threshold"),
            Segment::path("input"),
            Segment::path("output"),
        ])
        .build()
}

fn catalog() -> ToolDescriptor {
    ToolDescriptor::builder("catalog", "Catalog", ToolGroup::Points)
        .summary("Produces a report describing the coverage and density of LIDAR data files.")
        .executable("Catalog.exe")
        .param(point_inputs())
        .param(ParameterSpec::output("output", "Output", &["html", "csv"]))
        .param(ParameterSpec::string("density", "Density - area, min, max").advanced())
        .param(ParameterSpec::string("firstdensity", "First density - area, min, max").advanced())
        .param(ParameterSpec::string("intensity", "Intensity - area, min, max").advanced())
        .param(modifiers())
        .template([
            Segment::option("intensity"),
            Segment::option("density"),
            Segment::option_as("firstdensity", "first"),
            Segment::modifiers(MODIFIERS),
            Segment::inputs("input"),
            Segment::path("output"),
        ])
        .build()
}

const CLIP_SHAPES: &[EnumOption] = &[EnumOption::new("Rectangle", "0"), EnumOption::new("Circle", "1")];

fn clipdata() -> ToolDescriptor {
    ToolDescriptor::builder("clipdata", "Clip data", ToolGroup::Points)
        .summary("Clips points that fall inside a rectangular or circular extent.")
        .dual_executable("ClipData.exe", "ClipData64.exe", false)
        .param(point_inputs())
        .param(ParameterSpec::extent("extent", "Extent"))
        .param(ParameterSpec::choice("shape", "Shape", CLIP_SHAPES).optional())
        .param(ParameterSpec::output("output", "Output", LAS_FILES))
        .param(ground_model().advanced())
        .param(ParameterSpec::boolean("height", "Convert point elevations into heights above ground"))
        .param(modifiers())
        .template([
            Segment::modifiers(MODIFIERS),
            Segment::option("shape"),
            Segment::option_as("ground", "dtm"),
            Segment::switch("height"),
            Segment::inputs("input"),
            Segment::path("output"),
            Segment::extent("extent"),
        ])
        .build()
}

fn cloudmetrics() -> ToolDescriptor {
    ToolDescriptor::builder("cloudmetrics", "Cloud metrics", ToolGroup::Points)
        .summary("Computes descriptive statistics for a point cloud.")
        .executable("CloudMetrics.exe")
        .param(point_inputs())
        .param(ParameterSpec::output(
            "output",
            "Output file with tabular metric information",
            CSV_FILES,
        ))
        .param(ParameterSpec::string("above", "Above").optional())
        .param(ParameterSpec::string("htmin", "Htmin").optional())
        .param(ParameterSpec::boolean("firstimpulse", "First impulse"))
        .param(ParameterSpec::boolean("firstreturn", "First return"))
        .template([
            Segment::option("above"),
            Segment::option_as("htmin", "minht"),
            Segment::switch("firstimpulse"),
            Segment::switch("firstreturn"),
            Segment::inputs("input"),
            Segment::path("output"),
        ])
        .build()
}

fn cover() -> ToolDescriptor {
    ToolDescriptor::builder("cover", "Cover", ToolGroup::Points)
        .summary("Computes estimates of canopy closure using a grid.")
        .dual_executable("Cover.exe", "Cover64.exe", true)
        .param(point_inputs())
        .param(ParameterSpec::input("ground", "Ground file for height normalization", DTM_FILES))
        .param(cellsize(10.0).min(0.0))
        .param(
            ParameterSpec::double("heightbreak", "Height break")
                .default_value(1.0)
                .min(0.0),
        )
        .params(projection(UNITS))
        .param(ParameterSpec::boolean("all", "Use all returns to compute cover"))
        .param(ParameterSpec::boolean("ignoreoverlap", "Ignore points with the overlap flag set").advanced())
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(ParameterSpec::boolean("penetration", "Compute the proportion of returns close to the ground surface").advanced())
        .param(ParameterSpec::integer("upper", "Upper limit on cover computations").advanced())
        .param(ParameterSpec::output("output", "Output", DTM_FILES))
        .template([
            Segment::switch("all"),
            Segment::switch("penetration"),
            Segment::switch("ignoreoverlap"),
            Segment::option("class"),
            Segment::option("upper"),
            Segment::path("ground"),
            Segment::path("output"),
            Segment::value("heightbreak"),
            Segment::value("cellsize"),
        ])
        .template(PROJECTION_SEGMENTS)
        .template([Segment::inputs("input")])
        .build()
}

fn densitymetrics() -> ToolDescriptor {
    ToolDescriptor::builder("densitymetrics", "Density metrics", ToolGroup::Points)
        .summary("Computes point counts by height slice for each grid cell.")
        .dual_executable("DensityMetrics.exe", "DensityMetrics64.exe", true)
        .param(point_inputs())
        .param(ParameterSpec::input("ground", "Ground file for height normalization", DTM_FILES))
        .param(cellsize(10.0).min(0.0))
        .param(
            ParameterSpec::double("slicethickness", "Slice thickness")
                .default_value(1.0)
                .min(0.0),
        )
        .param(ParameterSpec::boolean("nocsv", "Do not create a CSV output file for cell metrics"))
        .param(ParameterSpec::boolean("first", "Use only first returns"))
        .param(ParameterSpec::output("output", "Base name for output files", ANY_FILE))
        .param(ParameterSpec::boolean("ignoreoverlap", "Ignore points with the overlap flag set").advanced())
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(modifiers())
        .template([
            Segment::switch("first"),
            Segment::switch("nocsv"),
            Segment::switch("ignoreoverlap"),
            Segment::option("class"),
            Segment::modifiers(MODIFIERS),
            Segment::path("ground"),
            Segment::value("cellsize"),
            Segment::value("slicethickness"),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .build()
}

fn filterdata() -> ToolDescriptor {
    ToolDescriptor::builder("filterdata", "Filter data outliers", ToolGroup::Points)
        .summary("Removes outlier points using the local mean and standard deviation.")
        .executable("FilterData.exe")
        .param(point_inputs())
        .param(
            ParameterSpec::double("value", "Standard deviation multiplier")
                .default_value(1.0)
                .min(0.0),
        )
        .param(
            ParameterSpec::double("windowsize", "Window size")
                .default_value(10.0)
                .min(0.0),
        )
        .param(ParameterSpec::output("output", "Output filtered LAS file", LAS_FILES))
        .param(modifiers())
        .template([
            Segment::modifiers(MODIFIERS),
            Segment::literal("outlier"),
            Segment::value("value"),
            Segment::value("windowsize"),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .build()
}

fn firstlastreturn() -> ToolDescriptor {
    ToolDescriptor::builder("firstlastreturn", "First & last return", ToolGroup::Points)
        .summary("Extracts first and last returns into separate LAS files.")
        .executable("FirstLastReturn.exe")
        .param(point_inputs())
        .param(ParameterSpec::output("output", "Output", LAS_FILES))
        .param(ParameterSpec::boolean("uselas", "Use LAS info").default_value(true))
        .param(modifiers())
        .template([
            Segment::switch("uselas"),
            Segment::modifiers(MODIFIERS),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .build()
}

fn gridmetrics() -> ToolDescriptor {
    ToolDescriptor::builder("gridmetrics", "Grid metrics", ToolGroup::Points)
        .summary("Computes point cloud statistics for every cell of a grid.")
        .dual_executable("GridMetrics.exe", "GridMetrics64.exe", true)
        .param(point_inputs())
        .param(ParameterSpec::input("ground", "Input ground DTM layer", DTM_FILES))
        .param(
            ParameterSpec::double("height", "Height break")
                .default_value(10.0)
                .min(0.0),
        )
        .param(cellsize(10.0).min(0.0))
        .param(ParameterSpec::output("output", "Output table with grid metrics", CSV_FILES))
        .param(ParameterSpec::string("outlier", "Outlier: low,high").advanced())
        .param(ParameterSpec::string("class", "Class (set blank if not used)").advanced())
        .param(ParameterSpec::string("htmin", "Minimum height for points used in metrics").advanced())
        .param(ParameterSpec::boolean("first", "Use only first returns"))
        .param(ParameterSpec::boolean("nointensity", "Do not compute intensity metrics"))
        .param(ParameterSpec::boolean("fuel", "Apply fuel parameter models"))
        .param(ParameterSpec::boolean("ascii", "Output raster layers in ASCII format"))
        .param(ParameterSpec::boolean("ignoreoverlap", "Ignore points with the overlap flag set").advanced())
        .param(modifiers())
        .template([
            Segment::modifiers(MODIFIERS),
            Segment::option("outlier"),
            Segment::switch("first"),
            Segment::switch("nointensity"),
            Segment::switch("fuel"),
            Segment::switch("ascii"),
            Segment::switch("ignoreoverlap"),
            Segment::option_as("htmin", "minht"),
            Segment::option("class"),
            Segment::path("ground"),
            Segment::value("height"),
            Segment::value("cellsize"),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .exclusive("fuel", "first")
        .build()
}

fn groundfilter() -> ToolDescriptor {
    ToolDescriptor::builder("groundfilter", "Ground filter", ToolGroup::Points)
        .summary("Filters a point cloud to identify bare-earth returns.")
        .executable("GroundFilter.exe")
        .param(point_inputs())
        .param(
            ParameterSpec::double("cellsize", "Cellsize for intermediate surfaces")
                .default_value(10.0)
                .min(0.0),
        )
        .param(ParameterSpec::output("output", "Output ground LAS file", LAS_FILES))
        .param(ParameterSpec::boolean("surface", "Create .dtm surface"))
        .param(modifiers())
        .template([
            Segment::modifiers(MODIFIERS),
            Segment::switch("surface"),
            Segment::path("output"),
            Segment::value("cellsize"),
            Segment::inputs("input"),
        ])
        .build()
}

fn mergedata() -> ToolDescriptor {
    ToolDescriptor::builder("mergedata", "Merge LAS files", ToolGroup::Points)
        .summary("Merges several point files into a single LAS file.")
        .executable("MergeData.exe")
        .param(point_inputs())
        .param(ParameterSpec::output("output", "Output merged LAS file", LAS_FILES))
        .param(modifiers())
        .template([
            Segment::modifiers(MODIFIERS),
            Segment::inputs("input"),
            Segment::path("output"),
        ])
        .build()
}

const SHAPE_FILTER: &[Part] = &[Part::Param("field"), Part::Param("value")];

fn polyclipdata() -> ToolDescriptor {
    ToolDescriptor::builder("polyclipdata", "Poly clip data", ToolGroup::Points)
        .summary("Clips points using polygons from a shapefile.")
        .executable("PolyClipData.exe")
        .param(point_inputs())
        .param(ParameterSpec::input("mask", "Mask layer", SHAPE_FILES))
        .param(ParameterSpec::output("output", "Output clipped LAS file", LAS_FILES))
        .param(ParameterSpec::boolean("shape", "Use only one polygon from the mask"))
        .param(ParameterSpec::string("field", "Shape field index").optional())
        .param(ParameterSpec::string("value", "Shape value").optional())
        .param(modifiers())
        .template([
            Segment::joined_when("shape", SHAPE_FILTER, "shape"),
            Segment::modifiers(MODIFIERS),
            Segment::path("mask"),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .requires("shape", &["field", "value"])
        .build()
}

fn returndensity() -> ToolDescriptor {
    ToolDescriptor::builder("returndensity", "Return density", ToolGroup::Points)
        .summary("Produces a raster with the number of returns per cell.")
        .dual_executable("ReturnDensity.exe", "ReturnDensity64.exe", true)
        .param(point_inputs())
        .param(cellsize(10.0).min(0.0))
        .param(ParameterSpec::output("output", "Output surface", DTM_FILES))
        .param(ParameterSpec::boolean("first", "Use only first returns when computing return counts").advanced())
        .param(ParameterSpec::boolean("ascii", "Output raster data in ASCII raster format instead of PLANS DTM format").advanced())
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .template([
            Segment::switch("first"),
            Segment::switch("ascii"),
            Segment::option("class"),
            Segment::path("output"),
            Segment::value("cellsize"),
            Segment::inputs("input"),
        ])
        .build()
}

fn thindata() -> ToolDescriptor {
    ToolDescriptor::builder("thindata", "Thin data", ToolGroup::Points)
        .summary("Thins LIDAR data to a specific pulse density.")
        .dual_executable("ThinData.exe", "ThinData64.exe", true)
        .param(point_inputs())
        .param(
            ParameterSpec::integer("density", "Desired pulse density per square unit")
                .default_value(1)
                .min(0.0),
        )
        .param(
            ParameterSpec::integer("cellsize", "Cellsize (in square units)")
                .default_value(0)
                .min(0.0),
        )
        .param(
            ParameterSpec::integer("rseed", "Random number seed")
                .min(0.0)
                .max(99.0)
                .advanced(),
        )
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(ParameterSpec::boolean("ignoreoverlap", "Ignore points with the overlap flag set").advanced())
        .param(ParameterSpec::output("output", "Output", LAS_FILES))
        .template([
            Segment::switch("ignoreoverlap"),
            Segment::option("class"),
            Segment::option("rseed"),
            Segment::path("output"),
            Segment::value("density"),
            Segment::value("cellsize"),
            Segment::inputs("input"),
        ])
        .build()
}

fn treeseg() -> ToolDescriptor {
    ToolDescriptor::builder("treeseg", "Tree segmentation", ToolGroup::Points)
        .summary("Segments single trees from a canopy height model.")
        .dual_executable("TreeSeg.exe", "TreeSeg64.exe", true)
        .param(ParameterSpec::input("input", "Input CHM in PLANS DTM format", DTM_FILES))
        .param(
            ParameterSpec::integer("height_th", "Minimum height for object segmentation")
                .default_value(0)
                .min(0.0),
        )
        .param(ParameterSpec::input("ground", "Input ground surface file (PLANS DTM format)", DTM_FILES).optional())
        .param(ParameterSpec::boolean("height_norm", "Normalize height model using a ground model"))
        .param(ParameterSpec::boolean("height_pts", "Normalize points' height using a ground model"))
        .param(ParameterSpec::inputs("laspts", "Input LAS layer(s)", POINT_FILES).optional())
        .param(ParameterSpec::boolean(
            "segmentpts",
            "Output points for the raster segments instead of crown polygons",
        ))
        .param(ParameterSpec::boolean("shape", "Create basin/crown shapefiles with metrics"))
        .param(ParameterSpec::output("output", "Base name for (multiple) output files", ANY_FILE))
        .template([
            Segment::switch_as("height_norm", "height"),
            Segment::switch_as("height_pts", "ptheight"),
            Segment::option("ground"),
            Segment::option_as("laspts", "points"),
            Segment::switch("segmentpts"),
            Segment::switch("shape"),
            Segment::path("input"),
            Segment::value("height_th"),
            Segment::path("output"),
        ])
        .build()
}
