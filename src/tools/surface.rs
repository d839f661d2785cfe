use super::options::*;
use crate::core::descriptor::{Segment, ToolDescriptor, ToolGroup};
use crate::core::params::{EnumOption, ParameterSpec};
use crate::core::registry::ToolRegistryBuilder;

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder
        .register(canopymodel())
        .register(gridsurfacecreate())
        .register(gridsurfacestats())
        .register(imagecreate())
        .register(intensityimage())
        .register(tinsurfacecreate())
        .register(topometrics());
}

fn canopymodel() -> ToolDescriptor {
    ToolDescriptor::builder("canopymodel", "Canopy model", ToolGroup::Surface)
        .summary("Creates a canopy surface model from a point cloud.")
        .dual_executable("CanopyModel.exe", "CanopyModel64.exe", true)
        .param(point_inputs())
        .param(cellsize(10.0).min(0.0))
        .params(surface_units())
        .param(ParameterSpec::output("output", "Output surface", DTM_FILES))
        .param(ground_model().advanced())
        .param(ParameterSpec::integer("median", "Median filter window size").min(1.0).advanced())
        .param(ParameterSpec::integer("smooth", "Smoothing filter window size").min(1.0).advanced())
        .param(ParameterSpec::boolean("slope", "Calculate surface slope").advanced())
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(ParameterSpec::boolean("ascii", "Add an ASCII output").advanced())
        .param(modifiers())
        .template([
            Segment::literal("/verbose"),
            Segment::option("ground"),
            Segment::option("median"),
            Segment::option("smooth"),
            Segment::switch("slope"),
            Segment::option("class"),
            Segment::switch("ascii"),
            Segment::modifiers(MODIFIERS),
            Segment::path("output"),
            Segment::value("cellsize"),
        ])
        .template(SURFACE_UNIT_SEGMENTS)
        .template([Segment::inputs("input")])
        .build()
}

fn gridsurfacecreate() -> ToolDescriptor {
    ToolDescriptor::builder("gridsurfacecreate", "Grid surface create", ToolGroup::Surface)
        .summary("Creates a gridded surface model from ground points.")
        .dual_executable("GridSurfaceCreate.exe", "GridSurfaceCreate64.exe", true)
        .param(point_inputs())
        .param(cellsize(10.0).min(0.0))
        .params(surface_units())
        .param(ParameterSpec::output("output", "Output surface", DTM_FILES))
        .param(ParameterSpec::double("spike", "Filter spikes steeper than this slope").advanced())
        .param(ParameterSpec::integer("median", "Median filter window size").min(1.0).advanced())
        .param(ParameterSpec::integer("smooth", "Smoothing filter window size").min(1.0).advanced())
        .param(ParameterSpec::double("slope", "Filter areas steeper than this slope").advanced())
        .param(ParameterSpec::string("minimum", "Minimum").advanced())
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(modifiers())
        .template([
            Segment::option("spike"),
            Segment::option("median"),
            Segment::option("smooth"),
            Segment::option("slope"),
            Segment::option("minimum"),
            Segment::option("class"),
            Segment::modifiers(MODIFIERS),
            Segment::path("output"),
            Segment::value("cellsize"),
        ])
        .template(SURFACE_UNIT_SEGMENTS)
        .template([Segment::inputs("input")])
        .build()
}

fn gridsurfacestats() -> ToolDescriptor {
    ToolDescriptor::builder("gridsurfacestats", "Grid surface stats", ToolGroup::Surface)
        .summary("Computes statistics of a surface model over a coarser grid.")
        .dual_executable("GridSurfaceStats.exe", "GridSurfaceStats64.exe", true)
        .param(ParameterSpec::input("input", "Input surface (PLANS DTM format)", DTM_FILES))
        .param(ParameterSpec::output("output", "Output surface", DTM_FILES))
        .param(
            ParameterSpec::integer("samplefactor", "Sample factor")
                .default_value(3)
                .min(1.0),
        )
        .param(ParameterSpec::input("ground", "Ground model used to normalize the surface", DTM_FILES).advanced())
        .param(ParameterSpec::boolean("area", "Compute the surface area of each cell").advanced())
        .param(ParameterSpec::boolean("ascii", "Output ASCII raster files").advanced())
        .param(ParameterSpec::boolean("svonly", "Output only the surface volume metric").advanced())
        .param(modifiers())
        .template([
            Segment::option("ground"),
            Segment::switch("area"),
            Segment::switch("ascii"),
            Segment::switch("svonly"),
            Segment::modifiers(MODIFIERS),
            Segment::path("input"),
            Segment::path("output"),
            Segment::value("samplefactor"),
        ])
        .build()
}

const COLOR_OPTIONS: &[EnumOption] = &[
    EnumOption::new("Intensity", "0"),
    EnumOption::new("Elevation", "1"),
    EnumOption::new("Height", "2"),
];

const IMAGE_FORMATS: &[EnumOption] = &[EnumOption::new("JPEG", "/jpg"), EnumOption::new("Bitmap", "/bmp")];

fn imagecreate() -> ToolDescriptor {
    ToolDescriptor::builder("imagecreate", "Image create", ToolGroup::Surface)
        .summary("Creates an image from point data colored by intensity, elevation or height.")
        .executable("ImageCreate.exe")
        .param(point_inputs())
        .param(ParameterSpec::output("output", "Output image", IMAGE_FILES))
        .param(ParameterSpec::choice("coloroption", "Method to assign color", COLOR_OPTIONS).default_choice(0))
        .param(ground_model().optional())
        .param(ParameterSpec::boolean("rgb", "Use RGB color model"))
        .param(ParameterSpec::choice("format", "Output format", IMAGE_FORMATS).default_choice(0))
        .param(
            ParameterSpec::double("pixel", "Pixel size")
                .default_value(1.0)
                .min(0.0),
        )
        .template([
            Segment::option("coloroption"),
            Segment::option_as("ground", "dtm"),
            Segment::switch("rgb"),
            Segment::enum_switch("format"),
            Segment::path("output"),
            Segment::value("pixel"),
            Segment::inputs("input"),
        ])
        .build()
}

/// IntensityImage writes a bitmap unless told otherwise.
const INTENSITY_FORMATS: &[EnumOption] = &[EnumOption::new("JPEG", "/jpg"), EnumOption::new("Bitmap", "")];

fn intensityimage() -> ToolDescriptor {
    ToolDescriptor::builder("intensityimage", "Intensity image", ToolGroup::Surface)
        .summary("Creates an image from the intensity values of a point cloud.")
        .executable("IntensityImage.exe")
        .param(point_inputs())
        .param(ParameterSpec::output("output", "Output image", IMAGE_FILES))
        .param(ParameterSpec::boolean("allreturns", "Use all returns instead of only first"))
        .param(ParameterSpec::boolean("lowest", "Use the lowest return in pixel area to assign the intensity value"))
        .param(ParameterSpec::boolean("hist", "Produce a CSV intensity histogram data file"))
        .param(ParameterSpec::choice("format", "Output format", INTENSITY_FORMATS).default_choice(0))
        .param(
            ParameterSpec::double("pixel", "Pixel size")
                .default_value(1.0)
                .min(0.0),
        )
        .param(modifiers())
        .template([
            Segment::switch("allreturns"),
            Segment::switch("lowest"),
            Segment::switch("hist"),
            Segment::enum_switch("format"),
            Segment::modifiers(MODIFIERS),
            Segment::value("pixel"),
            Segment::path("output"),
            Segment::inputs("input"),
        ])
        .build()
}

fn tinsurfacecreate() -> ToolDescriptor {
    ToolDescriptor::builder("tinsurfacecreate", "TIN surface create", ToolGroup::Surface)
        .summary("Creates a gridded surface model from a TIN of ground points.")
        .executable("TINSurfaceCreate.exe")
        .param(point_inputs())
        .param(cellsize(10.0).min(0.0))
        .params(surface_units())
        .param(ParameterSpec::output("output", "Output DTM file", DTM_FILES))
        .param(ParameterSpec::string("class", "Use only a specific LAS class").advanced())
        .param(ParameterSpec::string("return", "Use only specific return numbers").advanced())
        .template([
            Segment::option("class"),
            Segment::option("return"),
            Segment::path("output"),
            Segment::value("cellsize"),
        ])
        .template(SURFACE_UNIT_SEGMENTS)
        .template([Segment::inputs("input")])
        .build()
}

fn topometrics() -> ToolDescriptor {
    ToolDescriptor::builder("topometrics", "Topographic metrics", ToolGroup::Surface)
        .summary("Computes topographic metrics over a grid from a surface model.")
        .dual_executable("TopoMetrics.exe", "TopoMetrics64.exe", true)
        .param(ParameterSpec::input("input", "Input PLANS DTM file", DTM_FILES))
        .param(cellsize(10.0).min(0.0))
        .param(
            ParameterSpec::double("pointspacing", "Point spacing")
                .default_value(1.0)
                .min(0.0),
        )
        .param(
            ParameterSpec::integer("latitude", "Latitude of the data area")
                .default_value(0)
                .min(-90.0)
                .max(90.0),
        )
        .param(
            ParameterSpec::integer("wsize", "Window size for the topographic position index")
                .default_value(10)
                .min(0.0),
        )
        .param(ParameterSpec::boolean("square", "Use a square-shaped mask when computing the TPI"))
        .param(ParameterSpec::output("output", "Output file with tabular metric information", CSV_FILES))
        .param(modifiers())
        .template([
            Segment::switch("square"),
            Segment::modifiers(MODIFIERS),
            Segment::path("input"),
            Segment::value("cellsize"),
            Segment::value("pointspacing"),
            Segment::value("latitude"),
            Segment::value("wsize"),
            Segment::path("output"),
        ])
        .build()
}
