use super::types::{CommandNode, CoreVersion, FeatureKind, FeatureNode, ParamNode, Registry, TypeInfo, TypeName};
use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Load and parse a registry file (usually `vk.xml`).
///
/// Elements whose `api` attribute does not list `api` are dropped.
pub fn load_registry(path: &Path, api: &str) -> anyhow::Result<Registry> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry: {}", path.display()))?;
    let registry = parse_registry(&xml, api)
        .with_context(|| format!("Failed to parse registry: {}", path.display()))?;
    info!(
        path = %path.display(),
        types = registry.types.len(),
        commands = registry.commands.len(),
        features = registry.features.len(),
        "Registry loaded"
    );
    Ok(registry)
}

/// Parse registry XML held in memory.
pub fn parse_registry(xml: &str, api: &str) -> anyhow::Result<Registry> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut builder = RegistryBuilder::new(api);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = tag_name(&e);
                let attrs = attributes(&e)?;
                builder.open(&stack, &name, &attrs);
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = tag_name(&e);
                let attrs = attributes(&e)?;
                builder.open(&stack, &name, &attrs);
                builder.close(&stack, &name);
            }
            Event::End(_) => {
                if let Some(name) = stack.pop() {
                    builder.close(&stack, &name);
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                builder.text(&stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        anyhow::bail!("Unexpected end of registry inside <{}>", stack.join("/"));
    }
    Ok(builder.finish())
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attributes(e: &BytesStart<'_>) -> anyhow::Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        out.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(out)
}

/// `api="vulkan,vulkansc"` style filter. Elements without the attribute apply
/// to every API.
fn api_matches(attrs: &HashMap<String, String>, api: &str) -> bool {
    attrs
        .get("api")
        .map_or(true, |list| list.split(',').any(|a| a.trim() == api))
}

fn parent(stack: &[String]) -> &str {
    stack.last().map(String::as_str).unwrap_or("")
}

fn grandparent(stack: &[String]) -> &str {
    stack
        .len()
        .checked_sub(2)
        .and_then(|i| stack.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

#[derive(Default)]
struct PendingCommand {
    name: Option<String>,
    alias: Option<String>,
    return_type: String,
    proto_name: String,
    params: Vec<ParamNode>,
}

#[derive(Default)]
struct PendingParam {
    decl: String,
    name: Option<String>,
    suffix: String,
}

struct RegistryBuilder<'a> {
    api: &'a str,
    registry: Registry,
    ty: Option<TypeInfo>,
    command: Option<PendingCommand>,
    param: Option<PendingParam>,
    feature: Option<FeatureNode>,
    /// Depth of an element excluded by the api filter; everything below it
    /// is ignored until it closes.
    skip_depth: Option<usize>,
}

impl<'a> RegistryBuilder<'a> {
    fn new(api: &'a str) -> Self {
        RegistryBuilder {
            api,
            registry: Registry::default(),
            ty: None,
            command: None,
            param: None,
            feature: None,
            skip_depth: None,
        }
    }

    /// `stack` is the path of the parent element.
    fn open(&mut self, stack: &[String], name: &str, attrs: &HashMap<String, String>) {
        if self.skip_depth.is_some() {
            return;
        }
        if !api_matches(attrs, self.api) {
            self.skip_depth = Some(stack.len());
            return;
        }

        match (parent(stack), name) {
            ("types", "type") => {
                self.ty = Some(TypeInfo {
                    name: attrs.get("name").cloned().unwrap_or_default(),
                    category: attrs.get("category").cloned(),
                    handle_macro: None,
                    alias: attrs.get("alias").cloned(),
                });
            }
            ("commands", "command") => {
                self.command = Some(PendingCommand {
                    name: attrs.get("name").cloned(),
                    alias: attrs.get("alias").cloned(),
                    ..PendingCommand::default()
                });
            }
            ("command", "param") if self.command.is_some() => {
                self.param = Some(PendingParam::default());
            }
            ("registry", "feature") => {
                let version = attrs
                    .get("number")
                    .and_then(|n| CoreVersion::parse(n))
                    .unwrap_or_default();
                self.feature = Some(FeatureNode {
                    name: attrs.get("name").cloned().unwrap_or_default(),
                    kind: FeatureKind::Core { version },
                    commands: Vec::new(),
                });
            }
            ("extensions", "extension") => {
                let number = attrs
                    .get("number")
                    .and_then(|n| n.parse::<u32>().ok())
                    .unwrap_or(0);
                let supported = attrs
                    .get("supported")
                    .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
                    .unwrap_or_default();
                self.feature = Some(FeatureNode {
                    name: attrs.get("name").cloned().unwrap_or_default(),
                    kind: FeatureKind::Extension {
                        number,
                        supported,
                        protect: attrs.get("protect").cloned(),
                    },
                    commands: Vec::new(),
                });
            }
            ("require", "command") => {
                if let (Some(feature), Some(cmd)) = (self.feature.as_mut(), attrs.get("name")) {
                    if !feature.commands.contains(cmd) {
                        feature.commands.push(cmd.clone());
                    }
                }
            }
            _ => {}
        }
    }

    /// `stack` is the path down to and including the element holding the text.
    fn text(&mut self, stack: &[String], text: &str) {
        if self.skip_depth.is_some() {
            return;
        }
        let (elem, up) = (parent(stack), grandparent(stack));

        if let Some(ty) = self.ty.as_mut() {
            match (up, elem) {
                ("type", "name") if ty.name.is_empty() => ty.name = text.trim().to_string(),
                ("type", "type") if ty.handle_macro.is_none() => {
                    ty.handle_macro = Some(text.trim().to_string())
                }
                _ => {}
            }
            return;
        }

        if let Some(param) = self.param.as_mut() {
            match (up, elem) {
                (_, "param") | ("param", "type") if param.name.is_none() => {
                    param.decl.push_str(text)
                }
                (_, "param") | ("param", "enum") => param.suffix.push_str(text),
                ("param", "name") => param.name = Some(text.trim().to_string()),
                _ => {}
            }
            return;
        }

        if let Some(cmd) = self.command.as_mut() {
            match (up, elem) {
                ("proto", "type") => cmd.return_type.push_str(text),
                ("proto", "name") => cmd.proto_name.push_str(text.trim()),
                _ => {}
            }
        }
    }

    /// `stack` is the path of the parent element.
    fn close(&mut self, stack: &[String], name: &str) {
        if let Some(depth) = self.skip_depth {
            if stack.len() == depth {
                self.skip_depth = None;
            }
            return;
        }

        match (parent(stack), name) {
            ("types", "type") => {
                if let Some(ty) = self.ty.take().filter(|t| !t.name.is_empty()) {
                    self.registry.types.insert(ty);
                }
            }
            ("command", "param") => {
                if let (Some(param), Some(cmd)) = (self.param.take(), self.command.as_mut()) {
                    let decl = format!("{}{}", param.decl, param.suffix.trim());
                    cmd.params.push(ParamNode::new(
                        TypeName::new(decl),
                        param.name.unwrap_or_default(),
                    ));
                }
            }
            ("commands", "command") => {
                if let Some(cmd) = self.command.take() {
                    let name = cmd.name.unwrap_or(cmd.proto_name);
                    if name.is_empty() {
                        return;
                    }
                    let node = CommandNode {
                        name: name.clone(),
                        return_type: TypeName::new(cmd.return_type),
                        params: cmd.params,
                        alias: cmd.alias,
                    };
                    self.registry.commands.insert(name, node);
                }
            }
            ("registry", "feature") | ("extensions", "extension") => {
                if let Some(feature) = self.feature.take() {
                    debug!(
                        feature = %feature.name,
                        commands = feature.commands.len(),
                        "Parsed feature"
                    );
                    self.registry.features.push(feature);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Registry {
        self.registry
    }
}
