//! Minimal HTML markup tree.
//!
//! Tag and attribute names are `&'static str` so they can only come from code;
//! text content and attribute values are always escaped on render. Server
//! supplied strings therefore never reach the output unescaped.

use std::fmt;

/// Escape the five HTML special characters. Absent input renders as "".
pub fn escape_html(text: Option<&str>) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(Some(text))),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(Some(value)));
                    out.push('"');
                }
                out.push('>');
                for child in &el.children {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIALS: [char; 5] = ['<', '>', '&', '"', '\''];

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(
            escape_html(Some(r#"<a href="x">Tom & Jerry's</a>"#)),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_empty() {
        assert_eq!(escape_html(None), "");
        assert_eq!(escape_html(Some("")), "");
    }

    #[test]
    fn test_escape_removes_raw_specials() {
        let payload = r#"<script>alert("x" + 'y' && 1)</script>"#;
        let escaped = escape_html(Some(payload));
        // Entities reintroduce '&', so strip them before checking for raw characters.
        let stripped = escaped
            .replace("&amp;", "")
            .replace("&lt;", "")
            .replace("&gt;", "")
            .replace("&quot;", "")
            .replace("&#039;", "");
        assert!(!stripped.contains(SPECIALS));
    }

    #[test]
    fn test_text_node_matches_escape_html() {
        let raw = "Drum & Bass <live> \"remix\" 'edit'";
        let node = Node::Text(raw.to_string());
        assert_eq!(node.render(), escape_html(Some(raw)));
    }

    #[test]
    fn test_tree_escapes_text_and_attributes() {
        let node: Node = Element::new("td")
            .attr("title", "\"quoted\"")
            .text("<b>bold</b>")
            .into();
        assert_eq!(
            node.render(),
            "<td title=\"&quot;quoted&quot;\">&lt;b&gt;bold&lt;/b&gt;</td>"
        );
    }

    #[test]
    fn test_tree_nests_children() {
        let node: Node = Element::new("tr")
            .class("row")
            .child(Element::new("td").text("a"))
            .child(Element::new("td").child(Element::new("span").text("b")))
            .into();
        assert_eq!(
            node.to_string(),
            "<tr class=\"row\"><td>a</td><td><span>b</span></td></tr>"
        );
    }
}
