//! Results container and the full HTML page around it.

use super::node::{Element, Node};

pub const EMPTY_RESULTS_TEXT: &str = "No products found.";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;padding:1rem;background:#f6f6f6}\
#results{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:1rem}\
.card{background:#fff;border-radius:8px;padding:.75rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.thumb{height:160px;display:flex;align-items:center;justify-content:center;color:#888;background:#eee}\
.thumb-img{width:100%;height:160px;object-fit:cover}\
.meta{color:#555;font-size:.9rem}\
.actions{display:flex;gap:.5rem;margin-top:.5rem}\
.btn{padding:.3rem .6rem;border-radius:4px;text-decoration:none}\
.btn-primary{background:#ee4d2d;color:#fff}\
.btn-outline{border:1px solid #ee4d2d;color:#ee4d2d}\
.footer-note{color:#777}";

/// `<div id="results">` holding the cards, or the empty-state note.
pub fn results_node(cards: Vec<Node>) -> Node {
    let container = Element::new("div").attr("id", "results");
    if cards.is_empty() {
        return container
            .child(Element::new("p").class("footer-note").text(EMPTY_RESULTS_TEXT))
            .into();
    }
    cards
        .into_iter()
        .fold(container, |c, card| c.child(card))
        .into()
}

/// Standalone HTML document: search form plus the results container.
pub fn render_page(query: &str, results: Node) -> String {
    let search = Element::new("form")
        .attr("method", "get")
        .child(
            Element::new("input")
                .attr("id", "search")
                .attr("name", "q")
                .attr("type", "search")
                .attr("placeholder", "Search products")
                .attr("value", query),
        );

    let html = Element::new("html")
        .attr("lang", "en")
        .child(
            Element::new("head")
                .child(Element::new("meta").attr("charset", "utf-8"))
                .child(Element::new("title").text("Catalog"))
                .child(Element::new("style").child(Node::Raw(STYLE.to_string()))),
        )
        .child(Element::new("body").child(search).child(results));

    let mut out = String::from("<!DOCTYPE html>\n");
    Node::from(html).write_html(&mut out);
    out.push('\n');
    out
}
