//! Typed parameter declarations shared by every FUSION tool.
//!
//! A [`ParameterSpec`] is declared once when a tool is registered and never
//! changes afterwards. Callers hand in loosely typed [`ParameterValues`]
//! (CLI strings, JSON or YAML scalars) which are coerced against the spec's
//! [`ParameterKind`] before any command line is built.

pub mod error;
pub mod value;

pub use error::ParameterError;
pub use value::{Extent, ParameterValue, ParameterValues, ResolvedValues};

use serde::Serialize;

/// Direction of a file parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Input,
    Output,
}

/// One selectable entry of an enumeration parameter.
///
/// `label` is what users pick, `code` is the token written to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub label: &'static str,
    pub code: &'static str,
}

impl EnumOption {
    pub const fn new(label: &'static str, code: &'static str) -> Self {
        Self { label, code }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    File {
        role: FileRole,
        extensions: &'static [&'static str],
        multiple: bool,
    },
    Number {
        integer: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Enum {
        options: &'static [EnumOption],
    },
    String,
    Extent,
}

impl ParameterKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::File {
                role: FileRole::Input,
                ..
            } => "input file",
            ParameterKind::File {
                role: FileRole::Output,
                ..
            } => "output file",
            ParameterKind::Number { integer: true, .. } => "integer",
            ParameterKind::Number { integer: false, .. } => "number",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Enum { .. } => "enum",
            ParameterKind::String => "string",
            ParameterKind::Extent => "extent",
        }
    }
}

/// Static declaration of one configurable input to a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,
    pub optional: bool,
    pub advanced: bool,
}

impl ParameterSpec {
    fn new(key: &'static str, label: &'static str, kind: ParameterKind) -> Self {
        Self {
            key,
            label,
            kind,
            default: None,
            optional: false,
            advanced: false,
        }
    }

    /// Single input file restricted to the given extensions.
    pub fn input(key: &'static str, label: &'static str, extensions: &'static [&'static str]) -> Self {
        Self::new(
            key,
            label,
            ParameterKind::File {
                role: FileRole::Input,
                extensions,
                multiple: false,
            },
        )
    }

    /// One or more input files; several files are passed through a list file.
    pub fn inputs(
        key: &'static str,
        label: &'static str,
        extensions: &'static [&'static str],
    ) -> Self {
        Self::new(
            key,
            label,
            ParameterKind::File {
                role: FileRole::Input,
                extensions,
                multiple: true,
            },
        )
    }

    /// Output destination. Left unset, the executor assigns a scratch path.
    pub fn output(key: &'static str, label: &'static str, extensions: &'static [&'static str]) -> Self {
        Self::new(
            key,
            label,
            ParameterKind::File {
                role: FileRole::Output,
                extensions,
                multiple: false,
            },
        )
    }

    pub fn double(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            ParameterKind::Number {
                integer: false,
                min: None,
                max: None,
            },
        )
    }

    pub fn integer(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            ParameterKind::Number {
                integer: true,
                min: None,
                max: None,
            },
        )
    }

    pub fn boolean(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, ParameterKind::Boolean)
    }

    pub fn choice(key: &'static str, label: &'static str, options: &'static [EnumOption]) -> Self {
        Self::new(key, label, ParameterKind::Enum { options })
    }

    pub fn string(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, ParameterKind::String)
    }

    pub fn extent(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, ParameterKind::Extent)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Advanced parameters are optional as well.
    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self.optional = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Selects the enum option at `index` as the default.
    pub fn default_choice(mut self, index: usize) -> Self {
        self.default = Some(ParameterValue::Choice(index));
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        if let ParameterKind::Number { min, .. } = &mut self.kind {
            *min = Some(bound);
        }
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        if let ParameterKind::Number { max, .. } = &mut self.kind {
            *max = Some(bound);
        }
        self
    }

    pub fn is_output(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::File {
                role: FileRole::Output,
                ..
            }
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, ParameterKind::Boolean)
    }

    /// True when a caller must supply a value: no default, not optional, and
    /// not a flag or output that can be filled in.
    pub fn is_required(&self) -> bool {
        !self.optional && !self.is_boolean() && !self.is_output() && self.default.is_none()
    }

    /// Enum options, empty for every other kind.
    pub fn options(&self) -> &'static [EnumOption] {
        match self.kind {
            ParameterKind::Enum { options } => options,
            _ => &[],
        }
    }

    /// Extension used when the executor names an unset output.
    pub fn preferred_extension(&self) -> Option<&'static str> {
        match self.kind {
            ParameterKind::File { extensions, .. } => extensions.first().copied(),
            _ => None,
        }
    }
}
