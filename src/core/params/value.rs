use super::{EnumOption, FileRole, ParameterError, ParameterKind, ParameterSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Rectangular area as `xmin, ymin, xmax, ymax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, String> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err("coordinates must be finite numbers".to_string());
        }
        if xmin > xmax {
            return Err(format!("xmin {} is greater than xmax {}", xmin, xmax));
        }
        if ymin > ymax {
            return Err(format!("ymin {} is greater than ymax {}", ymin, ymax));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Parses `xmin,ymin,xmax,ymax`. A trailing `[CRS]` suffix is ignored.
    pub fn parse(text: &str) -> Result<Self, String> {
        let body = match text.find('[') {
            Some(index) => &text[..index],
            None => text,
        };
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 comma separated values, got {}", parts.len()));
        }
        let mut corners = [0.0; 4];
        for (slot, part) in corners.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part))?;
        }
        Self::new(corners[0], corners[1], corners[2], corners[3])
    }

    pub fn corners(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

/// A validated value, typed by the parameter it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Flag(bool),
    Integer(i64),
    Double(f64),
    /// Index into the parameter's enum options.
    Choice(usize),
    Text(String),
    Files(Vec<PathBuf>),
    Extent(Extent),
}

impl ParameterValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParameterValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Token text for this value as FUSION expects it on the command line.
    pub fn render(&self, options: &[EnumOption]) -> String {
        match self {
            ParameterValue::Flag(value) => value.to_string(),
            ParameterValue::Integer(value) => value.to_string(),
            ParameterValue::Double(value) => format_double(*value),
            ParameterValue::Choice(index) => options
                .get(*index)
                .map(|option| option.code.to_string())
                .unwrap_or_else(|| index.to_string()),
            ParameterValue::Text(text) => text.clone(),
            ParameterValue::Files(paths) => paths
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(","),
            ParameterValue::Extent(extent) => extent
                .corners()
                .iter()
                .map(|value| format_double(*value))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Flag(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

/// Formats a double so integral values keep a decimal point (`10.0`) and
/// others use the shortest representation that round-trips (`2.51503`).
pub fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Loosely typed values supplied by a caller for one invocation.
///
/// Values are kept as JSON scalars so CLI strings, JSON and YAML parameter
/// files all funnel through the same coercion rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues(IndexMap<String, Value>);

impl ParameterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays `other` on top of these values; later keys win.
    pub fn merge(&mut self, other: ParameterValues) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }
}

/// Values after coercion, defaults and output naming, keyed by parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedValues {
    values: IndexMap<&'static str, ParameterValue>,
}

impl ResolvedValues {
    pub(crate) fn insert(&mut self, key: &'static str, value: ParameterValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.values.get(key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// `true` only when the boolean parameter is present and set.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ParameterValue::Flag(true)))
    }

    pub fn files(&self, key: &str) -> &[PathBuf] {
        match self.values.get(key) {
            Some(ParameterValue::Files(paths)) => paths,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParameterValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

/// Coerces one raw value against its declaration. `Ok(None)` means "not set".
pub(crate) fn coerce(spec: &ParameterSpec, raw: &Value) -> Result<Option<ParameterValue>, ParameterError> {
    if raw.is_null() {
        return Ok(None);
    }
    if let Value::String(text) = raw {
        if text.trim().is_empty() {
            return Ok(None);
        }
    }

    let key = spec.key;
    match &spec.kind {
        ParameterKind::Boolean => coerce_flag(key, raw).map(Some),
        ParameterKind::Number { integer, min, max } => {
            coerce_number(key, raw, *integer, *min, *max).map(Some)
        }
        ParameterKind::Enum { options } => coerce_choice(key, raw, options).map(Some),
        ParameterKind::String => match raw {
            Value::String(text) => Ok(Some(ParameterValue::Text(text.trim().to_string()))),
            Value::Number(number) => Ok(Some(ParameterValue::Text(number.to_string()))),
            Value::Bool(flag) => Ok(Some(ParameterValue::Text(flag.to_string()))),
            other => Err(ParameterError::invalid(key, "a string", describe(other))),
        },
        ParameterKind::Extent => coerce_extent(key, raw).map(Some),
        ParameterKind::File {
            role,
            extensions,
            multiple,
        } => coerce_files(key, raw, *role, extensions, *multiple),
    }
}

fn coerce_flag(key: &str, raw: &Value) -> Result<ParameterValue, ParameterError> {
    let flag = match raw {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    flag.map(ParameterValue::Flag)
        .ok_or_else(|| ParameterError::invalid(key, "a boolean", describe(raw)))
}

fn coerce_number(
    key: &str,
    raw: &Value,
    integer: bool,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<ParameterValue, ParameterError> {
    let expected = if integer { "an integer" } else { "a number" };
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
    .ok_or_else(|| ParameterError::invalid(key, expected, describe(raw)))?;

    if integer && value.fract() != 0.0 {
        return Err(ParameterError::invalid(key, expected, describe(raw)));
    }

    let below = min.is_some_and(|bound| value < bound);
    let above = max.is_some_and(|bound| value > bound);
    if below || above {
        return Err(ParameterError::OutOfRange {
            key: key.to_string(),
            value: describe(raw),
            bounds: describe_bounds(min, max),
        });
    }

    if integer {
        exact_integer(key, raw, value).map(ParameterValue::Integer)
    } else {
        Ok(ParameterValue::Double(value))
    }
}

/// Integers are read without a detour through `f64` when the input allows it;
/// integral floats outside the `i64` range are rejected instead of saturating.
fn exact_integer(key: &str, raw: &Value, value: f64) -> Result<i64, ParameterError> {
    let exact = match raw {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    if let Some(exact) = exact {
        return Ok(exact);
    }
    // 2^63 is exactly representable; `i64::MAX as f64` rounds up to it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if (-LIMIT..LIMIT).contains(&value) {
        Ok(value as i64)
    } else {
        Err(ParameterError::OutOfRange {
            key: key.to_string(),
            value: describe(raw),
            bounds: "the 64-bit integer range".to_string(),
        })
    }
}

fn coerce_choice(
    key: &str,
    raw: &Value,
    options: &[EnumOption],
) -> Result<ParameterValue, ParameterError> {
    let index = match raw {
        Value::Number(number) => number.as_u64().map(|index| index as usize),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<usize>().ok().or_else(|| {
                options
                    .iter()
                    .position(|option| option.label.eq_ignore_ascii_case(text))
                    .or_else(|| {
                        options.iter().position(|option| {
                            !option.code.is_empty() && option.code.eq_ignore_ascii_case(text)
                        })
                    })
            })
        }
        _ => None,
    };

    match index {
        Some(index) if index < options.len() => Ok(ParameterValue::Choice(index)),
        Some(_) => Err(ParameterError::OutOfRange {
            key: key.to_string(),
            value: describe(raw),
            bounds: format!("option indexes 0..={}", options.len().saturating_sub(1)),
        }),
        None => {
            let labels: Vec<&str> = options.iter().map(|option| option.label).collect();
            Err(ParameterError::invalid(
                key,
                &format!("one of {}", labels.join(", ")),
                describe(raw),
            ))
        }
    }
}

fn coerce_extent(key: &str, raw: &Value) -> Result<ParameterValue, ParameterError> {
    let invalid = |reason: String| ParameterError::InvalidExtent {
        key: key.to_string(),
        reason,
    };
    let extent = match raw {
        Value::String(text) => Extent::parse(text).map_err(invalid)?,
        Value::Array(items) => {
            let numbers: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
            if items.len() != 4 || numbers.len() != 4 {
                return Err(invalid("expected an array of 4 numbers".to_string()));
            }
            Extent::new(numbers[0], numbers[1], numbers[2], numbers[3]).map_err(invalid)?
        }
        Value::Object(map) => {
            let corner = |name: &str| {
                map.get(name)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| invalid(format!("missing numeric '{}'", name)))
            };
            Extent::new(corner("xmin")?, corner("ymin")?, corner("xmax")?, corner("ymax")?)
                .map_err(invalid)?
        }
        other => return Err(invalid(format!("unsupported value {}", describe(other)))),
    };
    Ok(ParameterValue::Extent(extent))
}

fn coerce_files(
    key: &str,
    raw: &Value,
    role: FileRole,
    extensions: &[&str],
    multiple: bool,
) -> Result<Option<ParameterValue>, ParameterError> {
    let paths: Vec<PathBuf> = match raw {
        Value::String(text) => split_paths(text),
        Value::Array(items) => {
            let mut paths = Vec::with_capacity(items.len());
            for item in items {
                let text = item
                    .as_str()
                    .ok_or_else(|| ParameterError::invalid(key, "file paths", describe(item)))?;
                paths.extend(split_paths(text));
            }
            paths
        }
        other => return Err(ParameterError::invalid(key, "a file path", describe(other))),
    };

    if paths.is_empty() {
        return Ok(None);
    }
    let single_only = role == FileRole::Output || !multiple;
    if single_only && paths.len() > 1 {
        return Err(ParameterError::TooManyFiles {
            key: key.to_string(),
            count: paths.len(),
        });
    }
    if !extensions.is_empty() {
        if let Some(path) = paths.iter().find(|path| !has_extension(path, extensions)) {
            return Err(ParameterError::InvalidExtension {
                key: key.to_string(),
                path: path.display().to_string(),
                allowed: extensions
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(" or "),
            });
        }
    }
    Ok(Some(ParameterValue::Files(paths)))
}

/// Splits a `;` separated file list, dropping blanks.
fn split_paths(text: &str) -> Vec<PathBuf> {
    text.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{}'", text),
        other => other.to_string(),
    }
}

fn describe_bounds(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("[{}, {}]", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "any value".to_string(),
    }
}
