//! HTML/CSS generation from a layout tree.
//!
//! The tree handed to [`render`] has already passed the layout coverage
//! check, so every component is rendered exactly once.

pub mod css;
pub mod html;

pub use css::generate_css;
pub use html::{escape_html, generate_html};

use serde::Serialize;

use crate::layout::LayoutNode;

/// Generated markup and stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub html: String,
    pub css: String,
}

impl RenderedPage {
    /// Wraps the page into a standalone HTML document with the CSS inlined.
    pub fn to_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Generated layout</title>\n<style>\n{}</style>\n</head>\n\
             <body>\n{}</body>\n</html>\n",
            self.css, self.html
        )
    }
}

/// Renders a layout tree.
pub fn render(root: &LayoutNode) -> RenderedPage {
    RenderedPage {
        html: generate_html(root),
        css: generate_css(),
    }
}
