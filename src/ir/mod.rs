//! Component model for sketchlayout.
//!
//! This module defines the request-scoped data every pipeline stage passes
//! along: the [`Component`] (a typed, boxed UI element) and its parts, plus
//! the readers and writers for the formats the crate speaks at its edges.
//!
//! # Design Principles
//!
//! 1. **One canonical shape**: image mode and canvas mode both produce the
//!    same [`Component`]; from the layout engine on, nothing knows where a
//!    component came from.
//!
//! 2. **Permissive Construction**: [`BBox`] accepts any integers, so readers
//!    can report a bad shape with its index instead of panicking.
//!
//! # Example
//!
//! ```
//! use sketchlayout::ir::{BBox, Component, ComponentType};
//!
//! let button = Component::new("comp_000", ComponentType::Button, BBox::new(10, 20, 120, 40))
//!     .with_text("Sign in");
//! assert_eq!(button.bbox.area(), 4800);
//! ```

mod bbox;
mod ids;
pub mod io_canvas_json;
pub mod io_csv;
pub mod io_json;
mod model;

// Re-export core types for convenient access
pub use bbox::BBox;
pub use ids::ComponentId;
pub use model::{Component, ComponentType, LineStyle, ShapeStyle};
