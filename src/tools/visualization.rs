use crate::core::descriptor::{ToolDescriptor, ToolGroup};
use crate::core::registry::ToolRegistryBuilder;

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(openviewer());
}

/// Starts the FUSION viewer and returns immediately.
fn openviewer() -> ToolDescriptor {
    ToolDescriptor::builder("openviewer", "Open viewer", ToolGroup::Visualization)
        .summary("Opens the FUSION LIDAR viewer.")
        .executable("pdq.exe")
        .detached()
        .build()
}
