//! Built-in FUSION tool catalog.
//!
//! Each tool is a static [`ToolDescriptor`](crate::core::descriptor::ToolDescriptor):
//! its parameters plus the template that orders them on the command line.

pub mod conversion;
pub mod options;
pub mod points;
pub mod surface;
pub mod visualization;

use crate::core::registry::ToolRegistryBuilder;

/// Registers every built-in tool, grouped as in the FUSION menus.
pub fn register_builtins(builder: &mut ToolRegistryBuilder) {
    conversion::register(builder);
    points::register(builder);
    surface::register(builder);
    visualization::register(builder);
}
