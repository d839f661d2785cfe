use super::{CommandLine, CommandPlan, ListFile};
use crate::core::descriptor::{Part, Segment, ToolDescriptor};
use crate::core::params::value::format_double;
use crate::core::params::{ParameterValue, ResolvedValues};
use std::path::Path;

/// Turns resolved values into the command plan for `tool`.
///
/// Pure: the result depends only on the arguments. List files are described
/// in the plan and written later by the executor.
pub fn build_plan(
    tool: &ToolDescriptor,
    values: &ResolvedValues,
    install_dir: &Path,
    invocation_dir: &Path,
) -> CommandPlan {
    let executable = tool.executable.select(values);
    let mut formatter = Formatter {
        tool,
        values,
        invocation_dir,
        command: CommandLine::for_tool(install_dir, executable),
        list_files: Vec::new(),
    };
    for segment in &tool.template {
        formatter.render(segment);
    }

    let outputs = tool
        .outputs()
        .filter_map(|spec| {
            values
                .files(spec.key)
                .first()
                .map(|path| (spec.key.to_string(), path.clone()))
        })
        .collect();

    CommandPlan {
        command: formatter.command,
        list_files: formatter.list_files,
        outputs,
        launch: tool.launch,
    }
}

struct Formatter<'a> {
    tool: &'a ToolDescriptor,
    values: &'a ResolvedValues,
    invocation_dir: &'a Path,
    command: CommandLine,
    list_files: Vec<ListFile>,
}

impl Formatter<'_> {
    fn render(&mut self, segment: &Segment) {
        let values = self.values;
        match *segment {
            Segment::Switch {
                param,
                flag,
                requires,
            } => {
                let enabled = requires.map_or(true, |other| values.flag(other));
                if values.flag(param) && enabled {
                    self.command.push(format!("/{}", flag));
                }
            }
            Segment::Option { param, flag } => {
                if values.files(param).len() > 1 {
                    let list = self.list_file(param);
                    self.command.push(format!("/{}:{}", flag, list));
                } else if let Some(text) = self.text(param) {
                    self.command.push(format!("/{}:{}", flag, text));
                }
            }
            Segment::Joined { flag, parts, when } => {
                if when.is_some_and(|key| !values.flag(key)) {
                    return;
                }
                let rendered: Option<Vec<String>> = parts
                    .iter()
                    .map(|part| match part {
                        Part::Param(key) => self.text(key),
                        Part::Text(text) => Some(text.to_string()),
                    })
                    .collect();
                if let Some(rendered) = rendered {
                    self.command
                        .push(format!("/{}:{}", flag, rendered.join(",")));
                }
            }
            Segment::EnumSwitch { param } => {
                if let Some(code) = self.text(param).filter(|code| !code.is_empty()) {
                    self.command.push(code);
                }
            }
            Segment::Value { param } => {
                if let Some(text) = self.text(param) {
                    self.command.push(text);
                }
            }
            Segment::Path { param } => {
                for path in values.files(param) {
                    self.command.push(path.display().to_string());
                }
            }
            Segment::Inputs { param } => match values.files(param) {
                [] => {}
                [single] => self.command.push(single.display().to_string()),
                _ => self.push_list_file(param),
            },
            Segment::InputList { param } => {
                if !values.files(param).is_empty() {
                    self.push_list_file(param);
                }
            }
            Segment::Extent { param } => {
                if let Some(ParameterValue::Extent(extent)) = values.get(param) {
                    for corner in extent.corners() {
                        self.command.push(format_double(corner));
                    }
                }
            }
            Segment::Modifiers { param } => {
                if let Some(ParameterValue::Text(text)) = values.get(param) {
                    for token in text.split_whitespace() {
                        self.command.push(token);
                    }
                }
            }
            Segment::Literal { text } => self.command.push(text),
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        let value = self.values.get(key)?;
        let options = self
            .tool
            .parameter(key)
            .map(|spec| spec.options())
            .unwrap_or(&[]);
        Some(value.render(options))
    }

    fn push_list_file(&mut self, param: &str) {
        let list = self.list_file(param);
        self.command.push(list);
    }

    /// Registers `<invocation>/<param>_files.txt` and returns its path as a token.
    fn list_file(&mut self, param: &str) -> String {
        let path = self.invocation_dir.join(format!("{}_files.txt", param));
        let token = path.display().to_string();
        self.list_files.push(ListFile {
            path,
            entries: self.values.files(param).to_vec(),
        });
        token
    }
}
