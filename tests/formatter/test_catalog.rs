use fusion_processing::core::descriptor::Segment;
use fusion_processing::core::params::{FileRole, ParameterKind};
use fusion_processing::core::{
    build_plan, CommandPlan, ParameterError, ParameterSpec, ParameterValue, ParameterValues,
    ToolDescriptor, ToolRegistry,
};
use std::path::Path;

const INSTALL_DIR: &str = "/opt/FUSION";
const INVOCATION_DIR: &str = "/scratch/run";

/// Smallest set of values every tool accepts: one entry per required parameter.
fn minimal_values(tool: &ToolDescriptor) -> ParameterValues {
    let mut values = ParameterValues::new();
    for spec in tool.parameters.iter().filter(|spec| spec.is_required()) {
        match &spec.kind {
            ParameterKind::File {
                role: FileRole::Input,
                extensions,
                ..
            } => {
                let extension = extensions.first().copied().unwrap_or("dat");
                values.insert(spec.key, format!("{}.{}", spec.key, extension));
            }
            ParameterKind::Number { integer, min, .. } => {
                let value = min.unwrap_or(1.0);
                if *integer {
                    values.insert(spec.key, value as i64);
                } else {
                    values.insert(spec.key, value);
                }
            }
            ParameterKind::Enum { .. } => values.insert(spec.key, 0),
            ParameterKind::Extent => values.insert(spec.key, "0,0,10,10"),
            ParameterKind::String => values.insert(spec.key, "x"),
            ParameterKind::File { .. } | ParameterKind::Boolean => {}
        }
    }
    values
}

fn plan(tool: &ToolDescriptor, values: &ParameterValues) -> CommandPlan {
    let resolved = tool
        .resolve(values, Path::new(INVOCATION_DIR))
        .unwrap_or_else(|err| panic!("{}: {}", tool.id, err));
    build_plan(tool, &resolved, Path::new(INSTALL_DIR), Path::new(INVOCATION_DIR))
}

fn defaults_to_false(spec: &ParameterSpec) -> bool {
    spec.is_boolean() && matches!(spec.default, None | Some(ParameterValue::Flag(false)))
}

/// Switches a boolean drives on its own, without a companion switch.
fn plain_switch_flags(tool: &ToolDescriptor, key: &str) -> Vec<String> {
    tool.template
        .iter()
        .filter_map(|segment| match segment {
            Segment::Switch {
                param,
                flag,
                requires: None,
            } if *param == key => Some(format!("/{}", flag)),
            _ => None,
        })
        .collect()
}

#[test]
fn every_tool_plans_with_minimal_values() {
    for tool in ToolRegistry::builtin().iter() {
        let values = minimal_values(tool);
        let first = plan(tool, &values);
        let second = plan(tool, &values);

        assert_eq!(first, second, "{} plan is not stable", tool.id);
        let program = first.command.program.display().to_string();
        assert!(program.starts_with(INSTALL_DIR), "{}: {}", tool.id, program);
    }
}

#[test]
fn every_exclusive_pair_is_rejected_when_both_are_set() {
    let registry = ToolRegistry::builtin();
    let mut checked = Vec::new();
    for tool in registry.iter() {
        for (first, second) in &tool.exclusive {
            let values = minimal_values(tool)
                .with(*first, true)
                .with(*second, true);
            let err = tool
                .resolve(&values, Path::new(INVOCATION_DIR))
                .unwrap_err();
            assert_eq!(
                err,
                ParameterError::MutuallyExclusive {
                    first: first.to_string(),
                    second: second.to_string()
                },
                "{}",
                tool.id
            );
            assert_eq!(err.code(), "FUS-PARAM-008");
            checked.push(format!("{}:{}+{}", tool.id, first, second));
        }
    }
    assert!(checked.contains(&"dtm2ascii:csv+raster".to_string()));
    assert!(checked.contains(&"gridmetrics:fuel+first".to_string()));
}

#[test]
fn default_false_switches_produce_no_token() {
    for tool in ToolRegistry::builtin().iter() {
        let values = minimal_values(tool);
        let baseline = plan(tool, &values);

        for spec in tool.parameters.iter().filter(|spec| defaults_to_false(spec)) {
            for flag in plain_switch_flags(tool, spec.key) {
                assert!(
                    !baseline.command.args.contains(&flag),
                    "{}: {} present without being set",
                    tool.id,
                    flag
                );
            }

            let explicit = plan(tool, &values.clone().with(spec.key, false));
            assert_eq!(explicit.command, baseline.command, "{}: {}", tool.id, spec.key);
        }
    }
}

#[test]
fn set_switches_produce_their_token() {
    for tool in ToolRegistry::builtin().iter() {
        let values = minimal_values(tool);
        let triggers: Vec<&str> = tool.requirements.iter().map(|rule| rule.trigger).collect();

        for spec in tool.parameters.iter().filter(|spec| spec.is_boolean()) {
            if triggers.contains(&spec.key) {
                continue;
            }
            for flag in plain_switch_flags(tool, spec.key) {
                let enabled = plan(tool, &values.clone().with(spec.key, true));
                assert!(
                    enabled.command.args.contains(&flag),
                    "{}: {} missing when set",
                    tool.id,
                    flag
                );
            }
        }
    }
}
