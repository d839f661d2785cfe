#![allow(clippy::result_large_err)] // Lookups return AppError so the CLI can report the unknown tool with its code.

use crate::core::descriptor::{ToolDescriptor, ToolGroup};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use std::sync::Arc;

pub struct ToolRegistryBuilder {
    tools: IndexMap<&'static str, Arc<ToolDescriptor>>,
}

impl Default for ToolRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    pub fn register(&mut self, tool: ToolDescriptor) -> &mut Self {
        let id = tool.id;
        if self.tools.contains_key(id) {
            panic!("duplicate tool registered: {}", id);
        }
        self.tools.insert(id, Arc::new(tool));
        self
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            inner: Arc::new(self.tools),
        }
    }
}

/// Immutable, enumerable set of tools. Cloning shares the same table.
#[derive(Clone)]
pub struct ToolRegistry {
    inner: Arc<IndexMap<&'static str, Arc<ToolDescriptor>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Registry holding every supported FUSION tool.
    pub fn builtin() -> Self {
        let mut builder = ToolRegistryBuilder::new();
        crate::tools::register_builtins(&mut builder);
        builder.build()
    }

    pub fn get(&self, id: &str) -> Option<Arc<ToolDescriptor>> {
        self.inner.get(id).cloned()
    }

    /// Like [`ToolRegistry::get`], failing with a validation error for unknown ids.
    pub fn lookup(&self, id: &str) -> Result<Arc<ToolDescriptor>, AppError> {
        self.get(id.trim()).ok_or_else(|| {
            let mut err = AppError::new(
                ErrorCategory::ValidationError,
                format!("unknown tool '{}'", id),
            )
            .with_code("FUS-TOOL-001")
            .with_suggestion("Run `fusion tools` to list the available tools");
            err.add_context("tool", id);
            err
        })
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.inner.values()
    }

    pub fn in_group(&self, group: ToolGroup) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.iter().filter(move |tool| tool.group == group)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
