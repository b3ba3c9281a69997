//! HTML flattening.
//!
//! Filing documents are HTML with heavy presentational markup. Downstream
//! extraction works on an ordered sequence of trimmed text lines, so this
//! module walks the DOM once, drops non-content elements, and inserts line
//! breaks at block-element boundaries so semantically distinct blocks do
//! not collapse into one unbroken line.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Elements whose text is never content.
const SKIP_ELEMENTS: &[&str] = &[
    "script", "style", "head", "title", "noscript", "nav", "header", "footer",
];

/// Elements that terminate a text line on both sides.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "div", "dl", "dt", "dd",
    "fieldset", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol",
    "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Flattens an HTML document into non-empty, whitespace-trimmed lines in
/// document order.
pub fn flatten_html(raw: &str) -> Vec<String> {
    let document = Html::parse_document(raw);
    let mut text = String::new();
    collect_text(document.tree.root(), &mut text);
    to_lines(&text)
}

/// Splits already-plain text into the same canonical line form.
pub fn to_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| normalize_whitespace(line))
        .filter(|line| !line.is_empty())
        .collect()
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Element(element) => {
            let name = element.name();
            if SKIP_ELEMENTS.contains(&name) {
                return;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            for child in node.children() {
                collect_text(child, out);
            }
            if block {
                out.push('\n');
            }
        }
        Node::Text(text) => out.push_str(&text),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

/// Collapses runs of interior whitespace and trims the ends.
fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
