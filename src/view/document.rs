//! Element tree the view paints into, addressed by stable ids.

use std::collections::HashMap;

use derive_getters::Getters;
use derive_more::Display;
use tracing::instrument;

use crate::games::tictactoe::Position;

/// Stable identifier of a UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Menu container.
    Menu,
    /// Drop-down list holding the menu actions.
    MenuItems,
    /// Button opening the menu.
    MenuBtn,
    /// Menu action resetting the current game.
    ResetBtn,
    /// Menu action starting a new round.
    NewRoundBtn,
    /// A board cell.
    Square(Position),
    /// Game-over dialog.
    Modal,
    /// Message inside the dialog.
    ModalText,
    /// Dialog action button.
    ModalBtn,
    /// Turn indicator.
    Turn,
    /// Player 1 win counter.
    P1Wins,
    /// Player 2 win counter.
    P2Wins,
    /// Tie counter.
    Ties,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementId::Menu => write!(f, "menu"),
            ElementId::MenuItems => write!(f, "menu-items"),
            ElementId::MenuBtn => write!(f, "menu-btn"),
            ElementId::ResetBtn => write!(f, "reset-btn"),
            ElementId::NewRoundBtn => write!(f, "new-round-btn"),
            ElementId::Square(pos) => write!(f, "square-{}", pos.square_id()),
            ElementId::Modal => write!(f, "modal"),
            ElementId::ModalText => write!(f, "modal-text"),
            ElementId::ModalBtn => write!(f, "modal-btn"),
            ElementId::Turn => write!(f, "turn"),
            ElementId::P1Wins => write!(f, "p1-wins"),
            ElementId::P2Wins => write!(f, "p2-wins"),
            ElementId::Ties => write!(f, "ties"),
        }
    }
}

impl ElementId {
    /// Every element the view binds to.
    pub fn required() -> Vec<ElementId> {
        let mut ids = vec![
            ElementId::Menu,
            ElementId::MenuItems,
            ElementId::MenuBtn,
            ElementId::ResetBtn,
            ElementId::NewRoundBtn,
        ];
        ids.extend(Position::ALL.into_iter().map(ElementId::Square));
        ids.extend([
            ElementId::Modal,
            ElementId::ModalText,
            ElementId::ModalBtn,
            ElementId::Turn,
            ElementId::P1Wins,
            ElementId::P2Wins,
            ElementId::Ties,
        ]);
        ids
    }
}

/// An icon: icon class plus color class.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Icon {
    /// Icon class, e.g. `fa-x`.
    icon_class: String,
    /// Color class, e.g. `yellow`. Empty for uncolored icons.
    color_class: String,
}

impl Icon {
    /// Creates an icon.
    pub fn new(icon_class: impl Into<String>, color_class: impl Into<String>) -> Self {
        Self {
            icon_class: icon_class.into(),
            color_class: color_class.into(),
        }
    }
}

/// A UI element's visual state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Element {
    /// Static caption, e.g. a box title.
    label: String,
    /// Text content.
    text: String,
    /// Hidden elements are not painted.
    hidden: bool,
    /// Color class applied to the text.
    color_class: Option<String>,
    /// Child icon, if any.
    icon: Option<Icon>,
}

impl Element {
    /// A visible element with a caption and text.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Same element, initially hidden.
    pub fn initially_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Same element with an icon.
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_color_class(&mut self, color_class: Option<String>) {
        self.color_class = color_class;
    }

    /// Replaces the child icon (`None` clears it).
    pub(crate) fn replace_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }
}

/// Error raised while binding the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ViewError {
    /// A required element is absent from the document.
    #[display("Could not find element '{}'", _0)]
    MissingElement(ElementId),
}

impl std::error::Error for ViewError {}

/// The set of elements available to the view.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
}

impl Document {
    /// An empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard game screen with every element in its initial state.
    #[instrument]
    pub fn standard() -> Self {
        let mut doc = Self::empty();
        doc.insert(ElementId::Menu, Element::default());
        doc.insert(ElementId::MenuItems, Element::default().initially_hidden());
        doc.insert(
            ElementId::MenuBtn,
            Element::new("", "Actions").with_icon(Icon::new("fa-chevron-down", "")),
        );
        doc.insert(ElementId::ResetBtn, Element::new("", "Reset"));
        doc.insert(ElementId::NewRoundBtn, Element::new("", "New Round"));
        for pos in Position::ALL {
            doc.insert(ElementId::Square(pos), Element::default());
        }
        doc.insert(ElementId::Modal, Element::default().initially_hidden());
        doc.insert(ElementId::ModalText, Element::default());
        doc.insert(ElementId::ModalBtn, Element::new("", "Play again"));
        doc.insert(ElementId::Turn, Element::default());
        doc.insert(ElementId::P1Wins, Element::new("Player 1", "0 wins"));
        doc.insert(ElementId::P2Wins, Element::new("Player 2", "0 wins"));
        doc.insert(ElementId::Ties, Element::new("Ties", "0 ties"));
        doc
    }

    /// Adds or replaces an element.
    pub fn insert(&mut self, id: ElementId, element: Element) -> Option<Element> {
        self.elements.insert(id, element)
    }

    /// Removes an element.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    /// Looks up an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Takes a required element out of the document.
    pub(crate) fn take(&mut self, id: ElementId) -> Result<Element, ViewError> {
        self.elements
            .remove(&id)
            .ok_or(ViewError::MissingElement(id))
    }
}
