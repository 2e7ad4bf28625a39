//! Validation and sanitization of request-step bodies.

use std::fmt;
use std::fmt::Write as _;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Json,
    Xml,
    Html,
    Text,
}

impl BodyType {
    pub const ALL: [BodyType; 4] = [BodyType::Json, BodyType::Xml, BodyType::Html, BodyType::Text];

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|body_type| body_type.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unsupported body type '{}'. Allowed values are: json, xml, html, text",
                    raw
                )
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyType::Json => "json",
            BodyType::Xml => "xml",
            BodyType::Html => "html",
            BodyType::Text => "text",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            BodyType::Json => "application/json",
            BodyType::Xml => "application/xml",
            BodyType::Html => "text/html",
            BodyType::Text => "text/plain",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the content to store for `body_type`. JSON and XML are rejected
/// when malformed; HTML and text are cleaned and never rejected.
pub fn prepare_body(body_type: BodyType, content: &str) -> Result<String, String> {
    match body_type {
        BodyType::Json => serde_json::from_str::<serde_json::Value>(content)
            .map(|value| value.to_string())
            .map_err(|err| format!("Invalid JSON body: {}", err)),
        BodyType::Xml => canonical_xml(content).map_err(|err| format!("Invalid XML body: {}", err)),
        BodyType::Html => Ok(ammonia::clean(content)),
        BodyType::Text => Ok(strip_control_chars(content)),
    }
}

pub fn strip_control_chars(content: &str) -> String {
    content
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// roxmltree refuses any DTD by default, which rules out entity expansion
/// (external or recursive) before a single node is built.
fn canonical_xml(content: &str) -> Result<String, roxmltree::Error> {
    let doc = roxmltree::Document::parse(content)?;
    let mut out = String::with_capacity(content.len());
    for node in doc.root().children() {
        write_node(&mut out, node);
    }
    Ok(out)
}

fn write_node(out: &mut String, node: roxmltree::Node<'_, '_>) {
    match node.node_type() {
        roxmltree::NodeType::Element => write_element(out, node),
        roxmltree::NodeType::Text => {
            if let Some(text) = node.text() {
                escape_into(out, text, false);
            }
        }
        roxmltree::NodeType::Comment => {
            if let Some(text) = node.text() {
                let _ = write!(out, "<!--{}-->", text);
            }
        }
        roxmltree::NodeType::PI => {
            if let Some(pi) = node.pi() {
                match pi.value {
                    Some(value) => {
                        let _ = write!(out, "<?{} {}?>", pi.target, value);
                    }
                    None => {
                        let _ = write!(out, "<?{}?>", pi.target);
                    }
                }
            }
        }
        roxmltree::NodeType::Root => {}
    }
}

fn write_element(out: &mut String, node: roxmltree::Node<'_, '_>) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name(), true);
    out.push('<');
    out.push_str(&name);

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                let _ = write!(out, " xmlns:{}=\"", prefix);
            }
            None => out.push_str(" xmlns=\""),
        }
        escape_into(out, ns.uri(), true);
        out.push('"');
    }

    for attr in node.attributes() {
        out.push(' ');
        out.push_str(&qualified_name(node, attr.namespace(), attr.name(), false));
        out.push_str("=\"");
        escape_into(out, attr.value(), true);
        out.push('"');
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in node.children() {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", name);
}

/// Attributes never take the default namespace, elements prefer it.
fn qualified_name(
    scope: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
    allow_default: bool,
) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };
    if uri == XML_NAMESPACE {
        return format!("xml:{}", local);
    }
    let mut prefix = None;
    for ns in scope.namespaces().filter(|ns| ns.uri() == uri) {
        match ns.name() {
            None if allow_default => return local.to_string(),
            None => {}
            Some(name) => {
                prefix.get_or_insert(name);
            }
        }
    }
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}
