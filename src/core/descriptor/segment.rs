use serde::Serialize;

/// One piece of a joined option such as `/wse:2.51503,0,0.00901,0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Part {
    Param(&'static str),
    Text(&'static str),
}

/// Declarative step of a tool's command-line template.
///
/// Segments are rendered in order; each contributes zero or more tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "segment", rename_all = "snake_case")]
pub enum Segment {
    /// Bare `/flag` when the boolean is true (and `requires` is true as well, if given).
    Switch {
        param: &'static str,
        flag: &'static str,
        requires: Option<&'static str>,
    },
    /// `/flag:value` when the parameter is set.
    Option {
        param: &'static str,
        flag: &'static str,
    },
    /// `/flag:a,b,...` built from parameters and fixed text, emitted when every
    /// referenced parameter is set and `when` (if given) is true.
    Joined {
        flag: &'static str,
        parts: &'static [Part],
        when: Option<&'static str>,
    },
    /// The chosen enum option's code as a bare token, skipped when the code is empty.
    EnumSwitch { param: &'static str },
    /// Positional value: numbers, enum codes, strings.
    Value { param: &'static str },
    /// Positional file path.
    Path { param: &'static str },
    /// Input files: one path directly, several through a list file.
    Inputs { param: &'static str },
    /// Input files, always passed through a list file.
    InputList { param: &'static str },
    /// Four positional coordinates.
    Extent { param: &'static str },
    /// Free-form switches, split on whitespace.
    Modifiers { param: &'static str },
    Literal { text: &'static str },
}

impl Segment {
    pub const fn switch(param: &'static str) -> Self {
        Segment::Switch {
            param,
            flag: param,
            requires: None,
        }
    }

    pub const fn switch_as(param: &'static str, flag: &'static str) -> Self {
        Segment::Switch {
            param,
            flag,
            requires: None,
        }
    }

    pub const fn switch_if(param: &'static str, requires: &'static str) -> Self {
        Segment::Switch {
            param,
            flag: param,
            requires: Some(requires),
        }
    }

    pub const fn option(param: &'static str) -> Self {
        Segment::Option { param, flag: param }
    }

    pub const fn option_as(param: &'static str, flag: &'static str) -> Self {
        Segment::Option { param, flag }
    }

    pub const fn joined(flag: &'static str, parts: &'static [Part]) -> Self {
        Segment::Joined {
            flag,
            parts,
            when: None,
        }
    }

    pub const fn joined_when(
        flag: &'static str,
        parts: &'static [Part],
        when: &'static str,
    ) -> Self {
        Segment::Joined {
            flag,
            parts,
            when: Some(when),
        }
    }

    pub const fn enum_switch(param: &'static str) -> Self {
        Segment::EnumSwitch { param }
    }

    pub const fn value(param: &'static str) -> Self {
        Segment::Value { param }
    }

    pub const fn path(param: &'static str) -> Self {
        Segment::Path { param }
    }

    pub const fn inputs(param: &'static str) -> Self {
        Segment::Inputs { param }
    }

    pub const fn input_list(param: &'static str) -> Self {
        Segment::InputList { param }
    }

    pub const fn extent(param: &'static str) -> Self {
        Segment::Extent { param }
    }

    pub const fn modifiers(param: &'static str) -> Self {
        Segment::Modifiers { param }
    }

    pub const fn literal(text: &'static str) -> Self {
        Segment::Literal { text }
    }

    /// Parameter keys this segment reads.
    pub fn params(&self) -> Vec<&'static str> {
        match self {
            Segment::Switch {
                param, requires, ..
            } => std::iter::once(*param).chain(*requires).collect(),
            Segment::Joined { parts, when, .. } => parts
                .iter()
                .filter_map(|part| match part {
                    Part::Param(key) => Some(*key),
                    Part::Text(_) => None,
                })
                .chain(*when)
                .collect(),
            Segment::Option { param, .. }
            | Segment::EnumSwitch { param }
            | Segment::Value { param }
            | Segment::Path { param }
            | Segment::Inputs { param }
            | Segment::InputList { param }
            | Segment::Extent { param }
            | Segment::Modifiers { param } => vec![*param],
            Segment::Literal { .. } => Vec::new(),
        }
    }
}
