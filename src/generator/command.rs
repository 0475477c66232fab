use crate::registry::{CommandNode, TypeName};
use serde::Serialize;
use std::fmt;

/// Length of the API namespace prefix (`vk`) stripped from command names.
pub const COMMAND_PREFIX_LEN: usize = 2;

/// One formal parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: TypeName,
    pub name: String,
}

/// A command's signature with the namespace prefix removed from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPrototype {
    pub return_type: TypeName,
    pub name: String,
    pub params: Vec<Param>,
}

/// Extract the prototype of `cmd`.
///
/// The first [`COMMAND_PREFIX_LEN`] characters of the name are dropped
/// without checking what they are; shorter names become empty. Parameters
/// keep schema order, nothing is skipped or deduplicated.
pub fn extract_command(cmd: &CommandNode) -> CommandPrototype {
    CommandPrototype {
        return_type: cmd.return_type.clone(),
        name: strip_prefix(&cmd.name).to_string(),
        params: cmd
            .params
            .iter()
            .map(|p| Param {
                ty: p.ty.clone(),
                name: p.name.clone(),
            })
            .collect(),
    }
}

fn strip_prefix(name: &str) -> &str {
    match name.char_indices().nth(COMMAND_PREFIX_LEN) {
        Some((idx, _)) => &name[idx..],
        None => "",
    }
}

/// Renders the `Proto(...)` constructor call used inside an `Extension`.
impl fmt::Display for CommandPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        Proto(\"{}\", \"{}\",", self.return_type, self.name)?;
        writeln!(f, "            [")?;
        for param in &self.params {
            writeln!(f, "             Param(\"{}\", \"{}\"),", param.ty, param.name)?;
        }
        writeln!(f, "            ]),")
    }
}
