//! Terminal view: element document, rendering and input translation.

mod document;
mod input;
mod theme;
mod ui;
#[allow(clippy::module_inception)]
mod view;

pub use document::{Document, Element, ElementId, Icon, ViewError};
pub use input::move_cursor;
pub use theme::{color, glyph};
pub use view::{Elements, Flow, HitMap, MenuItem, SquareElement, View};
