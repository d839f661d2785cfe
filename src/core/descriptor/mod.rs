//! Static metadata describing one FUSION executable.

pub mod segment;

pub use segment::{Part, Segment};

use crate::core::params::value::coerce;
use crate::core::params::{
    ParameterError, ParameterSpec, ParameterValue, ParameterValues, ResolvedValues,
};
use serde::Serialize;
use std::path::Path;

/// Key of the boolean that selects the 64-bit executable of a dual tool.
pub const VERSION64_KEY: &str = "version64";

/// Groups used to organise the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    Conversion,
    Points,
    Surface,
    Visualization,
}

impl ToolGroup {
    pub const ALL: [ToolGroup; 4] = [
        ToolGroup::Conversion,
        ToolGroup::Points,
        ToolGroup::Surface,
        ToolGroup::Visualization,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ToolGroup::Conversion => "conversion",
            ToolGroup::Points => "points",
            ToolGroup::Surface => "surface",
            ToolGroup::Visualization => "visualization",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ToolGroup::Conversion => "Conversion",
            ToolGroup::Points => "Point cloud analysis",
            ToolGroup::Surface => "Surface",
            ToolGroup::Visualization => "Visualization",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.id().eq_ignore_ascii_case(id.trim()))
    }
}

impl std::fmt::Display for ToolGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Executable file name(s) inside the FUSION install directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Executable {
    Single(&'static str),
    /// 32-bit and 64-bit builds of the same tool, picked by [`VERSION64_KEY`].
    Dual {
        x32: &'static str,
        x64: &'static str,
    },
}

impl Executable {
    pub fn select(&self, values: &ResolvedValues) -> &'static str {
        match *self {
            Executable::Single(name) => name,
            Executable::Dual { x32, x64 } => {
                if values.flag(VERSION64_KEY) {
                    x64
                } else {
                    x32
                }
            }
        }
    }
}

/// How the executor waits on the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Launch {
    #[default]
    Wait,
    /// Start the program and return immediately (interactive viewers).
    Detached,
}

/// A boolean that is only valid when other parameters are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub trigger: &'static str,
    pub requires: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub group: ToolGroup,
    pub summary: &'static str,
    pub executable: Executable,
    pub launch: Launch,
    pub parameters: Vec<ParameterSpec>,
    pub template: Vec<Segment>,
    pub exclusive: Vec<(&'static str, &'static str)>,
    pub requirements: Vec<Requirement>,
}

impl ToolDescriptor {
    pub fn builder(id: &'static str, name: &'static str, group: ToolGroup) -> ToolDescriptorBuilder {
        ToolDescriptorBuilder {
            descriptor: ToolDescriptor {
                id,
                name,
                group,
                summary: "",
                executable: Executable::Single(""),
                launch: Launch::Wait,
                parameters: Vec::new(),
                template: Vec::new(),
                exclusive: Vec::new(),
                requirements: Vec::new(),
            },
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|spec| spec.key == key)
    }

    /// Declared output destinations, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|spec| spec.is_output())
    }

    /// Validates caller values and fills in defaults.
    ///
    /// Output destinations left unset are assigned `<invocation_dir>/<key>.<ext>`.
    /// No filesystem access happens here.
    pub fn resolve(
        &self,
        values: &ParameterValues,
        invocation_dir: &Path,
    ) -> Result<ResolvedValues, ParameterError> {
        if let Some(unknown) = values.keys().find(|key| self.parameter(key).is_none()) {
            return Err(ParameterError::Unknown {
                tool: self.id.to_string(),
                key: unknown.to_string(),
            });
        }

        let mut resolved = ResolvedValues::default();
        for spec in &self.parameters {
            let supplied = match values.get(spec.key) {
                Some(raw) => coerce(spec, raw)?,
                None => None,
            };
            let value = supplied
                .or_else(|| spec.default.clone())
                .or_else(|| generated_output(spec, invocation_dir));

            match value {
                Some(value) => resolved.insert(spec.key, value),
                None if spec.optional || spec.is_boolean() => {}
                None => {
                    return Err(ParameterError::Missing {
                        key: spec.key.to_string(),
                    })
                }
            }
        }

        for (first, second) in &self.exclusive {
            if resolved.flag(first) && resolved.flag(second) {
                return Err(ParameterError::MutuallyExclusive {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }

        for requirement in &self.requirements {
            if !resolved.flag(requirement.trigger) {
                continue;
            }
            if let Some(missing) = requirement
                .requires
                .iter()
                .find(|key| !resolved.is_set(key))
            {
                return Err(ParameterError::MissingDependency {
                    key: requirement.trigger.to_string(),
                    requires: missing.to_string(),
                });
            }
        }

        Ok(resolved)
    }

    /// Checks that the template, exclusions and requirements only reference
    /// declared parameters, that keys are unique and defaults match their kinds.
    pub fn check(&self) -> Result<(), String> {
        for (index, spec) in self.parameters.iter().enumerate() {
            if self.parameters[..index].iter().any(|other| other.key == spec.key) {
                return Err(format!("{}: duplicate parameter '{}'", self.id, spec.key));
            }
            if let Some(default) = &spec.default {
                if !default_matches_kind(spec, default) {
                    return Err(format!(
                        "{}: default of '{}' does not match its {} kind",
                        self.id,
                        spec.key,
                        spec.kind.type_name()
                    ));
                }
            }
        }

        let referenced = self
            .template
            .iter()
            .flat_map(Segment::params)
            .chain(self.exclusive.iter().flat_map(|(a, b)| [*a, *b]))
            .chain(self.requirements.iter().flat_map(|requirement| {
                std::iter::once(requirement.trigger).chain(requirement.requires.iter().copied())
            }));
        for key in referenced {
            if self.parameter(key).is_none() {
                return Err(format!("{}: undeclared parameter '{}'", self.id, key));
            }
        }

        if matches!(self.executable, Executable::Dual { .. }) && self.parameter(VERSION64_KEY).is_none() {
            return Err(format!("{}: dual executable without '{}'", self.id, VERSION64_KEY));
        }
        if matches!(self.executable, Executable::Single("")) {
            return Err(format!("{}: no executable declared", self.id));
        }
        Ok(())
    }
}

fn generated_output(spec: &ParameterSpec, invocation_dir: &Path) -> Option<ParameterValue> {
    if !spec.is_output() {
        return None;
    }
    let file_name = match spec.preferred_extension() {
        Some(ext) => format!("{}.{}", spec.key, ext),
        None => spec.key.to_string(),
    };
    Some(ParameterValue::Files(vec![invocation_dir.join(file_name)]))
}

fn default_matches_kind(spec: &ParameterSpec, default: &ParameterValue) -> bool {
    use crate::core::params::ParameterKind;
    match (&spec.kind, default) {
        (ParameterKind::Boolean, ParameterValue::Flag(_)) => true,
        (ParameterKind::Number { integer: true, .. }, ParameterValue::Integer(_)) => true,
        (ParameterKind::Number { integer: false, .. }, ParameterValue::Double(_)) => true,
        (ParameterKind::Enum { options }, ParameterValue::Choice(index)) => *index < options.len(),
        (ParameterKind::String, ParameterValue::Text(_)) => true,
        (ParameterKind::Extent, ParameterValue::Extent(_)) => true,
        (ParameterKind::File { .. }, ParameterValue::Files(_)) => true,
        _ => false,
    }
}

/// Builder used by the tool catalog.
pub struct ToolDescriptorBuilder {
    descriptor: ToolDescriptor,
}

impl ToolDescriptorBuilder {
    pub fn summary(mut self, summary: &'static str) -> Self {
        self.descriptor.summary = summary;
        self
    }

    pub fn executable(mut self, name: &'static str) -> Self {
        self.descriptor.executable = Executable::Single(name);
        self
    }

    /// Declares 32/64-bit builds and adds the selecting boolean.
    pub fn dual_executable(mut self, x32: &'static str, x64: &'static str, default_64: bool) -> Self {
        self.descriptor.executable = Executable::Dual { x32, x64 };
        self.descriptor.parameters.push(
            ParameterSpec::boolean(VERSION64_KEY, "Use 64-bit version").default_value(default_64),
        );
        self
    }

    pub fn detached(mut self) -> Self {
        self.descriptor.launch = Launch::Detached;
        self
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.descriptor.parameters.push(spec);
        self
    }

    pub fn params(mut self, specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.descriptor.parameters.extend(specs);
        self
    }

    pub fn template(mut self, segments: impl IntoIterator<Item = Segment>) -> Self {
        self.descriptor.template.extend(segments);
        self
    }

    pub fn exclusive(mut self, first: &'static str, second: &'static str) -> Self {
        self.descriptor.exclusive.push((first, second));
        self
    }

    pub fn requires(mut self, trigger: &'static str, requires: &'static [&'static str]) -> Self {
        self.descriptor
            .requirements
            .push(Requirement { trigger, requires });
        self
    }

    /// Finishes the descriptor.
    ///
    /// Panics when the declaration is inconsistent; descriptors are static
    /// catalog data, so this is a programming error.
    pub fn build(self) -> ToolDescriptor {
        if let Err(problem) = self.descriptor.check() {
            panic!("invalid tool descriptor: {}", problem);
        }
        self.descriptor
    }
}
