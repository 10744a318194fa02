//! Minimal element/text tree with escaping HTML output.

use std::fmt::Write;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["img", "meta", "link", "input", "br"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted markup emitted verbatim (used for the doctype and stylesheet).
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Raw(_) => {}
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.has_class(class) {
            return Some(el);
        }
        el.children.iter().find_map(|c| c.find_by_class(class))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Raw(r) => out.push_str(r),
            Node::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for c in &el.children {
                    c.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let node: Node = Element::new("div")
            .class("meta")
            .child(Element::new("span").text("a"))
            .text("b")
            .into();
        assert_eq!(node.to_html(), r#"<div class="meta"><span>a</span>b</div>"#);
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Element::new("a")
            .attr("href", "/p?a=1&b=\"2\"")
            .text("<Tom & Jerry>")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<a href="/p?a=1&amp;b=&quot;2&quot;">&lt;Tom &amp; Jerry&gt;</a>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: Node = Element::new("img").attr("src", "x.png").into();
        assert_eq!(node.to_html(), r#"<img src="x.png">"#);
    }

    #[test]
    fn find_by_class_matches_any_listed_class() {
        let node: Node = Element::new("div")
            .child(Element::new("a").class("btn btn-outline").text("Details"))
            .into();
        let found = node.find_by_class("btn-outline").unwrap();
        assert_eq!(found.tag, "a");
        assert!(node.find_by_class("btn-primary").is_none());
    }
}
