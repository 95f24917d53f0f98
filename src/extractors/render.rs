// src/extractors/render.rs
use ego_tree::NodeRef;
use scraper::Node;

// One level of indentation in the pretty-printed output.
const INDENT: &str = " ";

// The whitespace HTML collapses. Only these five ASCII characters; U+00A0 and
// other Unicode spaces are content.
const ASCII_WHITESPACE: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

// Elements with no closing tag, serialized as <br/>.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Elements whose text content is not HTML and must not be entity-escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

// Elements whose whitespace is significant; their subtree is emitted inline.
const PRESERVED_WHITESPACE_ELEMENTS: &[&str] = &["pre", "textarea"];

/// Pretty-prints the subtree rooted at `node`, one node per line, indented
/// one space per nesting level, with no trailing newline.
///
/// The output is normalized. Runs of ASCII whitespace in text collapse to a
/// single space, attributes appear in name order, and `& < > " '` are
/// entity-escaped outside of raw-text elements. `pre` and `textarea`
/// subtrees keep their whitespace and are serialized inline. Feeding the
/// output back through the parser and this function reproduces it byte for
/// byte.
pub fn prettify(node: NodeRef<Node>) -> String {
    let mut lines = Vec::new();
    render_node(node, 0, &mut lines);
    lines.join("\n")
}

fn render_node(node: NodeRef<Node>, depth: usize, lines: &mut Vec<String>) {
    match node.value() {
        Node::Element(_) => render_element(node, depth, lines),
        Node::Text(text) => {
            let mut run = text.text.to_string();
            flush_text_run(&mut run, depth, lines);
        }
        Node::Comment(comment) => {
            let content = &*comment.comment;
            lines.push(format!("{}<!--{}-->", INDENT.repeat(depth), content));
        }
        // Document, fragment and doctype nodes have no textual form here.
        _ => {}
    }
}

fn render_element(node: NodeRef<Node>, depth: usize, lines: &mut Vec<String>) {
    let Some(element) = node.value().as_element() else {
        return;
    };
    let pad = INDENT.repeat(depth);
    let name = element.name();
    let attrs = render_attributes(element);

    if VOID_ELEMENTS.contains(&name) {
        lines.push(format!("{pad}<{name}{attrs}/>"));
        return;
    }

    if RAW_TEXT_ELEMENTS.contains(&name) {
        let raw: String = node
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(text.text.to_string()),
                _ => None,
            })
            .collect();
        let raw = raw.trim();
        if raw.is_empty() {
            lines.push(format!("{pad}<{name}{attrs}></{name}>"));
        } else {
            lines.push(format!("{pad}<{name}{attrs}>"));
            for line in raw.lines() {
                lines.push(format!("{}{}", INDENT.repeat(depth + 1), line.trim()));
            }
            lines.push(format!("{pad}</{name}>"));
        }
        return;
    }

    if PRESERVED_WHITESPACE_ELEMENTS.contains(&name) {
        let mut inner = String::new();
        for child in node.children() {
            render_inline(child, &mut inner);
        }
        let mut line = format!("{pad}<{name}{attrs}>");
        if inner.starts_with('\n') {
            // The parser discards one newline right after the opening tag
            line.push('\n');
        }
        line.push_str(&inner);
        line.push_str(&format!("</{name}>"));
        lines.push(line);
        return;
    }

    let mut children = Vec::new();
    let mut text_run = String::new();
    for child in node.children() {
        if let Node::Text(text) = child.value() {
            // Text siblings left adjacent by a detach merge into one run;
            // the removed element boundary counts as whitespace.
            if !text_run.is_empty() {
                text_run.push(' ');
            }
            text_run.push_str(&text.text);
            continue;
        }
        flush_text_run(&mut text_run, depth + 1, &mut children);
        render_node(child, depth + 1, &mut children);
    }
    flush_text_run(&mut text_run, depth + 1, &mut children);

    if children.is_empty() {
        lines.push(format!("{pad}<{name}{attrs}></{name}>"));
    } else {
        lines.push(format!("{pad}<{name}{attrs}>"));
        lines.append(&mut children);
        lines.push(format!("{pad}</{name}>"));
    }
}

/// Serializes a whitespace-preserving subtree without inserting any line
/// structure; text keeps its whitespace verbatim and is still escaped.
fn render_inline(node: NodeRef<Node>, out: &mut String) {
    match node.value() {
        Node::Element(element) => {
            let name = element.name();
            let attrs = render_attributes(element);
            if VOID_ELEMENTS.contains(&name) {
                out.push_str(&format!("<{name}{attrs}/>"));
                return;
            }
            out.push_str(&format!("<{name}{attrs}>"));
            if RAW_TEXT_ELEMENTS.contains(&name) {
                for child in node.children() {
                    if let Node::Text(text) = child.value() {
                        out.push_str(&text.text);
                    }
                }
            } else {
                for child in node.children() {
                    render_inline(child, out);
                }
            }
            out.push_str(&format!("</{name}>"));
        }
        Node::Text(text) => out.push_str(&escape_html(&text.text)),
        Node::Comment(comment) => {
            out.push_str(&format!("<!--{}-->", &*comment.comment));
        }
        _ => {}
    }
}

fn flush_text_run(run: &mut String, depth: usize, lines: &mut Vec<String>) {
    let collapsed = collapse_whitespace(run);
    if !collapsed.is_empty() {
        lines.push(format!("{}{}", INDENT.repeat(depth), escape_html(&collapsed)));
    }
    run.clear();
}

/// Serializes an element's attributes, sorted by name so that the output does
/// not depend on attribute order in the source document.
fn render_attributes(element: &scraper::node::Element) -> String {
    let mut attrs: Vec<(&str, &str)> = element.attrs().collect();
    attrs.sort_by_key(|&(name, _)| name);

    let mut rendered = String::new();
    for (name, value) in attrs {
        rendered.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    rendered
}

fn collapse_whitespace(text: &str) -> String {
    text.split(ASCII_WHITESPACE)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
