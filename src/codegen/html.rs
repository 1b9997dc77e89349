//! HTML generation.
//!
//! Rows become flexbox `row-container` divs; each leaf becomes the semantic
//! element for its type, preceded by an `<!-- id: type -->` comment so the
//! markup can be traced back to the component list.

use std::fmt::Write;

use crate::ir::{Component, ComponentType, ShapeStyle};
use crate::layout::LayoutNode;

const INDENT: &str = "  ";

/// Border width used when a style has a colour but no width.
const DEFAULT_BORDER_WIDTH: u32 = 2;

/// Renders the tree as an HTML fragment wrapped in `<div id="generated-content">`.
pub fn generate_html(root: &LayoutNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &LayoutNode, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        LayoutNode::Root { rows } => {
            let _ = writeln!(out, "{pad}<div id=\"generated-content\">");
            for row in rows {
                write_node(out, row, depth + 1);
            }
            let _ = writeln!(out, "{pad}</div>");
        }
        LayoutNode::Row { leaves } => {
            let _ = writeln!(out, "{pad}<div class=\"row-container\">");
            for leaf in leaves {
                write_node(out, leaf, depth + 1);
            }
            let _ = writeln!(out, "{pad}</div>");
        }
        LayoutNode::Leaf(component) => write_component(out, component, &pad),
    }
}

fn write_component(out: &mut String, component: &Component, pad: &str) {
    let id = escape_html(component.id.as_str());
    let style = component
        .style
        .as_ref()
        .map(style_attribute)
        .unwrap_or_default();
    let text = if component.text.is_empty() {
        component.component_type.fallback_text().to_string()
    } else {
        escape_html(&component.text)
    };

    let _ = writeln!(out, "{pad}<!-- {id}: {} -->", component.component_type);
    let _ = match component.component_type {
        ComponentType::Button => writeln!(out, "{pad}<button class=\"btn\"{style}>{text}</button>"),
        ComponentType::Input => writeln!(
            out,
            "{pad}<input type=\"text\" class=\"input-field\" placeholder=\"{text}\"{style} />"
        ),
        ComponentType::Label => {
            writeln!(out, "{pad}<label class=\"text-label\"{style}>{text}</label>")
        }
        ComponentType::Checkbox => writeln!(
            out,
            "{pad}<div class=\"checkbox-wrapper\"{style}>\n\
             {pad}{INDENT}<input type=\"checkbox\" id=\"{id}\" />\n\
             {pad}{INDENT}<label for=\"{id}\">{text}</label>\n\
             {pad}</div>"
        ),
        ComponentType::Container => writeln!(out, "{pad}<div class=\"card\"{style}></div>"),
    };
}

/// Builds ` style="..."` from canvas attributes, or an empty string.
pub fn style_attribute(style: &ShapeStyle) -> String {
    let mut parts = Vec::new();

    if let Some(fill) = style.fill_color.as_deref().filter(|c| *c != "transparent") {
        parts.push(format!("background-color: {fill}"));
    }
    if let Some(color) = style.border_color.as_deref() {
        let width = style.border_width.unwrap_or(DEFAULT_BORDER_WIDTH);
        let line = style.line_style.unwrap_or_default().css_keyword();
        parts.push(format!("border: {width}px {line} {color}"));
    } else if let Some(line) = style.line_style {
        parts.push(format!("border-style: {}", line.css_keyword()));
    }
    if let Some(radius) = style.border_radius.filter(|r| *r > 0) {
        parts.push(format!("border-radius: {radius}px"));
    }
    if let Some(size) = style.font_size.filter(|s| *s > 0) {
        parts.push(format!("font-size: {size}px"));
    }
    if let Some(color) = style.font_color.as_deref() {
        parts.push(format!("color: {color}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(&parts.join("; ")))
    }
}

/// Escapes the five HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
