//! Element builders
//!
//! Views describe their output as a tree of `Element`s. Elements are plain
//! descriptions: they become live nodes only when mounted into a
//! [`RenderTree`](crate::tree::RenderTree). `M` is the message type that
//! event handlers produce for the owning application.
//!
//! ```ignore
//! use agency_layout::prelude::*;
//!
//! div()
//!     .class("hero")
//!     .child(heading(1, "Creative Digital Solutions"))
//!     .child(link("/portfolio", "View Our Work"))
//! ```

use std::fmt;
use std::rc::Rc;

use agency_animation::TransitionPreset;
use agency_core::{event_types, Event, EventType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::motion::MotionProps;

/// Kind of form control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Email,
    /// Multi-line text
    Textarea,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Textarea => "textarea",
        }
    }
}

/// What an element is; decides its tag and host behaviour
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Div,
    Nav,
    Main,
    Section,
    Heading(u8),
    Paragraph,
    Span,
    /// In-app link; activating it follows `to` unless prevented
    Link { to: String },
    /// Activating a submit button submits the enclosing form
    Button { submit: bool },
    Form,
    Label,
    Input {
        name: String,
        kind: InputKind,
        required: bool,
    },
    Image { src: String, alt: String },
    /// Single-path vector icon (24×24 view box)
    Svg { path: String },
}

impl ElementKind {
    /// HTML tag name
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Div => "div",
            ElementKind::Nav => "nav",
            ElementKind::Main => "main",
            ElementKind::Section => "section",
            ElementKind::Heading(1) => "h1",
            ElementKind::Heading(2) => "h2",
            ElementKind::Heading(3) => "h3",
            ElementKind::Heading(4) => "h4",
            ElementKind::Heading(5) => "h5",
            ElementKind::Heading(_) => "h6",
            ElementKind::Paragraph => "p",
            ElementKind::Span => "span",
            ElementKind::Link { .. } => "a",
            ElementKind::Button { .. } => "button",
            ElementKind::Form => "form",
            ElementKind::Label => "label",
            ElementKind::Input {
                kind: InputKind::Textarea,
                ..
            } => "textarea",
            ElementKind::Input { .. } => "input",
            ElementKind::Image { .. } => "img",
            ElementKind::Svg { .. } => "svg",
        }
    }

    /// Links, buttons and form controls
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            ElementKind::Link { .. } | ElementKind::Button { .. } | ElementKind::Input { .. }
        )
    }
}

/// Viewport width range an element is shown in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Always,
    /// Shown while the viewport is narrower than the breakpoint (px)
    Below(u32),
    /// Shown from the breakpoint (px) upwards
    From(u32),
}

impl Visibility {
    pub fn shows_at(&self, viewport_width: u32) -> bool {
        match *self {
            Visibility::Always => true,
            Visibility::Below(breakpoint) => viewport_width < breakpoint,
            Visibility::From(breakpoint) => viewport_width >= breakpoint,
        }
    }
}

/// Event handler producing an optional application message
pub type Handler<M> = Rc<dyn Fn(&mut Event) -> Option<M>>;

/// A declarative element description
pub struct Element<M> {
    pub kind: ElementKind,
    pub key: Option<String>,
    pub id: Option<String>,
    pub class: Option<String>,
    pub text: Option<String>,
    pub visibility: Visibility,
    pub motion: Option<MotionProps>,
    pub handlers: SmallVec<[(EventType, Handler<M>); 2]>,
    pub children: Vec<Element<M>>,
}

impl<M> Element<M> {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            key: None,
            id: None,
            class: None,
            text: None,
            visibility: Visibility::Always,
            motion: None,
            handlers: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Identity used by presence slots to tell children apart
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element<M>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element<M>>,
    {
        self.children.extend(children);
        self
    }

    /// Show only while the viewport is narrower than `breakpoint`
    pub fn only_below(mut self, breakpoint: u32) -> Self {
        self.visibility = Visibility::Below(breakpoint);
        self
    }

    /// Show only from `breakpoint` upwards
    pub fn only_from(mut self, breakpoint: u32) -> Self {
        self.visibility = Visibility::From(breakpoint);
        self
    }

    /// Animate this element with full motion props
    pub fn motion(mut self, motion: MotionProps) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Animate this element with a preset
    pub fn animate(self, preset: TransitionPreset) -> Self {
        self.motion(MotionProps::new(preset))
    }

    /// Mark a form control as required (or not)
    pub fn required(mut self, required: bool) -> Self {
        if let ElementKind::Input { required: r, .. } = &mut self.kind {
            *r = required;
        }
        self
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    /// Register a handler for `event_type`
    pub fn on<F>(mut self, event_type: EventType, handler: F) -> Self
    where
        F: Fn(&mut Event) -> Option<M> + 'static,
    {
        self.handlers.push((event_type, Rc::new(handler)));
        self
    }

    pub fn on_click<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Event) -> Option<M> + 'static,
    {
        self.on(event_types::CLICK, handler)
    }

    pub fn on_submit<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Event) -> Option<M> + 'static,
    {
        self.on(event_types::SUBMIT, handler)
    }

    /// Number of elements in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

impl<M> fmt::Debug for Element<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("text", &self.text)
            .field("handlers", &self.handlers.len())
            .field("children", &self.children)
            .finish()
    }
}

// ============================================================================
// Builder functions
// ============================================================================

pub fn div<M>() -> Element<M> {
    Element::new(ElementKind::Div)
}

pub fn nav<M>() -> Element<M> {
    Element::new(ElementKind::Nav)
}

/// The `<main>` landmark
pub fn main_area<M>() -> Element<M> {
    Element::new(ElementKind::Main)
}

pub fn section<M>() -> Element<M> {
    Element::new(ElementKind::Section)
}

pub fn heading<M>(level: u8, text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Heading(level.clamp(1, 6))).text(text)
}

pub fn paragraph<M>(text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Paragraph).text(text)
}

pub fn span<M>() -> Element<M> {
    Element::new(ElementKind::Span)
}

pub fn link<M>(to: impl Into<String>, text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Link { to: to.into() }).text(text)
}

/// A link whose label comes from its children
pub fn anchor<M>(to: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Link { to: to.into() })
}

pub fn button<M>(text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Button { submit: false }).text(text)
}

/// A button labelled by its children (icon buttons)
pub fn icon_button<M>() -> Element<M> {
    Element::new(ElementKind::Button { submit: false })
}

pub fn submit_button<M>(text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Button { submit: true }).text(text)
}

pub fn form<M>() -> Element<M> {
    Element::new(ElementKind::Form)
}

pub fn label<M>(text: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Label).text(text)
}

/// An optional form control
pub fn input<M>(name: impl Into<String>, kind: InputKind) -> Element<M> {
    Element::new(ElementKind::Input {
        name: name.into(),
        kind,
        required: false,
    })
}

pub fn image<M>(src: impl Into<String>, alt: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Image {
        src: src.into(),
        alt: alt.into(),
    })
}

pub fn svg_path<M>(path: impl Into<String>) -> Element<M> {
    Element::new(ElementKind::Svg { path: path.into() })
}
