//! Rendering-surface capability 🖼️
//!
//! The board never talks to a terminal (or anything else) directly. It asks a
//! [`Surface`] to measure elements and to apply styles and content, and the
//! surface decides what that means on screen.

pub mod boxes;
pub mod headless;
pub mod terminal;

use serde::Serialize;

use crate::board::arbiter::DisplayMode;
use crate::board::content::SongEntry;

pub use boxes::{BoxLayout, BoxMetrics, BoxSurface, ElementStyle, TextMeasure};
pub use headless::HeadlessSurface;
pub use terminal::TerminalSurface;

/// Addressable parts of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    /// The whole drawing area the frame is positioned in
    Container,
    /// The bordered list frame
    Frame,
    /// Scrollable region inside the frame
    ScrollViewport,
    /// Sung songs list (lives inside the viewport)
    SungList,
    /// "Now singing" slot
    CurrentSong,
    /// Optional cue shown while a song is playing
    NowPlayingIndicator,
    /// Optional cosmetic overlay tracking the frame corner
    Decoration,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding box in surface pixels, relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// What a surface reports for one element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Measurement {
    /// Rendered box height (border box)
    pub height: f64,
    /// Full scrollable content height, padding included
    pub content_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub bounds: Rect,
    /// False when the element is display-suppressed
    pub displayed: bool,
}

impl Measurement {
    /// Box height plus vertical margins, or 0 when not displayed.
    pub fn outer_height(&self) -> f64 {
        if self.displayed {
            self.height + self.margin_top + self.margin_bottom
        } else {
            0.0
        }
    }
}

/// Position of one rendered list entry, relative to the top of the list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EntryBox {
    pub top: f64,
    pub height: f64,
}

impl EntryBox {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A height-like style value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Length {
    /// Shrink/grow to fit content
    Auto,
    /// Explicitly unconstrained (`max-height: none`)
    Unbounded,
    Px(f64),
}

/// One style mutation. `None` payloads clear the property back to the
/// surface default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StyleProp {
    Height(Option<Length>),
    MaxHeight(Option<Length>),
    PaddingBottom(Option<f64>),
    MarginTop(Option<f64>),
    Display(bool),
    /// Current song stuck to the bottom of the frame
    Pinned(bool),
    ModeClass(Option<DisplayMode>),
    /// Opacity + interactability for overlay-ish elements
    Visible(bool),
    /// Overlay placement: distance from the container's right edge and a
    /// vertical translation from the container's top
    Offset { right: f64, top: f64 },
}

/// Structured content handed to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Entries(Vec<SongEntry>),
    CurrentSong(Option<String>),
}

/// Capability set every concrete surface provides.
///
/// Surfaces with no decoration (or no indicator) return `None` from
/// [`Surface::measure`] for that element and silently ignore writes to it.
pub trait Surface {
    fn measure(&self, element: Element) -> Option<Measurement>;

    /// Entry boxes of the sung list in visual top-to-bottom order.
    fn measure_entries(&self) -> Vec<EntryBox>;

    /// Size of the whole drawable area.
    fn viewport(&self) -> Size;

    fn set_style(&mut self, element: Element, props: &[StyleProp]);

    fn set_content(&mut self, element: Element, content: Content);

    /// Scroll offset of [`Element::ScrollViewport`].
    fn set_scroll_offset(&mut self, offset: f64);

    fn has(&self, element: Element) -> bool {
        self.measure(element).is_some()
    }
}
