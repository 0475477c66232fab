use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A type as written in a command parameter or return position.
///
/// Holds the full declared C type (`const VkInstanceCreateInfo*`,
/// `uint8_t[VK_UUID_SIZE]`). [`TypeName::base`] yields the bare name used for
/// type-table lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(raw: impl Into<String>) -> Self {
        TypeName(normalize_decl(&raw.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare type name with qualifiers, pointer stars and array suffix removed.
    ///
    /// `const VkInstanceCreateInfo*` → `VkInstanceCreateInfo`,
    /// `VkInstance*` → `VkInstance`, `float[4]` → `float`.
    pub fn base(&self) -> &str {
        let without_array = match self.0.find('[') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        };
        without_array
            .split(|c: char| c.is_whitespace() || c == '*')
            .filter(|tok| !tok.is_empty() && !matches!(*tok, "const" | "struct"))
            .next_back()
            .unwrap_or("")
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(raw: &str) -> Self {
        TypeName::new(raw)
    }
}

/// Collapse runs of whitespace and glue pointer stars to the preceding token.
fn normalize_decl(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(" *", "*").replace(" [", "[")
}

/// One `<types>/<type>` entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    pub name: String,
    pub category: Option<String>,
    /// Text of the first nested `<type>` element. For handles this is the
    /// defining macro (`VK_DEFINE_HANDLE` / `VK_DEFINE_NON_DISPATCHABLE_HANDLE`).
    pub handle_macro: Option<String>,
    pub alias: Option<String>,
}

/// Exact-name index over the registry's type definitions.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<String, TypeInfo>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type. A later definition with the same name replaces the
    /// earlier one.
    pub fn insert(&mut self, info: TypeInfo) {
        self.types.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeInfo> for TypeTable {
    fn from_iter<I: IntoIterator<Item = TypeInfo>>(iter: I) -> Self {
        let mut table = TypeTable::new();
        for info in iter {
            table.insert(info);
        }
        table
    }
}

/// One `<param>` of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNode {
    pub ty: TypeName,
    pub name: String,
}

impl ParamNode {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        ParamNode {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// One `<commands>/<command>` entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    /// Raw command name including the API prefix (`vkCreateInstance`).
    pub name: String,
    pub return_type: TypeName,
    pub params: Vec<ParamNode>,
    /// Set for `<command name=".." alias=".."/>` entries, which carry no
    /// prototype of their own.
    pub alias: Option<String>,
}

impl CommandNode {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<TypeName>,
        params: Vec<ParamNode>,
    ) -> Self {
        CommandNode {
            name: name.into(),
            return_type: return_type.into(),
            params,
            alias: None,
        }
    }
}

/// A core version number such as `1.3`, compared component-wise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoreVersion {
    pub major: u32,
    pub minor: u32,
}

impl CoreVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        CoreVersion { major, minor }
    }

    /// Parse a `number` attribute of the form `major.minor`.
    ///
    /// A bare `major` reads as `major.0`.
    pub fn parse(number: &str) -> Option<Self> {
        let mut parts = number.trim().splitn(2, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(minor) => minor.parse().ok()?,
            None => 0,
        };
        Some(CoreVersion { major, minor })
    }
}

impl fmt::Display for CoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureKind {
    /// `<feature>`: a core API version.
    Core { version: CoreVersion },
    /// `<extensions>/<extension>`.
    Extension {
        number: u32,
        supported: Vec<String>,
        protect: Option<String>,
    },
}

/// A core version or extension together with the commands it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureNode {
    pub name: String,
    pub kind: FeatureKind,
    /// Required command names in document order.
    pub commands: Vec<String>,
}

impl FeatureNode {
    /// Preprocessor guard the feature is wrapped in, if any.
    pub fn protect(&self) -> Option<&str> {
        match &self.kind {
            FeatureKind::Extension { protect, .. } => protect.as_deref(),
            FeatureKind::Core { .. } => None,
        }
    }

    /// Whether the extension is supported for `api`. Core features always are.
    pub fn supports(&self, api: &str) -> bool {
        match &self.kind {
            FeatureKind::Core { .. } => true,
            FeatureKind::Extension { supported, .. } => {
                supported.iter().any(|s| s == api) && !supported.iter().any(|s| s == "disabled")
            }
        }
    }
}

/// The parsed registry: type table, command table and features.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub types: TypeTable,
    pub commands: HashMap<String, CommandNode>,
    pub features: Vec<FeatureNode>,
}

impl Registry {
    /// Look up a command, following a single `alias` hop.
    ///
    /// The alias keeps its own name but borrows the target's prototype.
    pub fn resolve_command(&self, name: &str) -> Option<CommandNode> {
        let cmd = self.commands.get(name)?;
        match &cmd.alias {
            None => Some(cmd.clone()),
            Some(target) => {
                let target = self.commands.get(target)?;
                if target.alias.is_some() {
                    return None;
                }
                Some(CommandNode {
                    name: cmd.name.clone(),
                    return_type: target.return_type.clone(),
                    params: target.params.clone(),
                    alias: cmd.alias.clone(),
                })
            }
        }
    }
}
