//! Shared box model used by the headless and terminal surfaces.
//!
//! Elements stack like this (top to bottom), all inside the container:
//!
//! ```text
//! frame (chrome around it)
//! ├── scroll viewport
//! │   └── sung list (+ list padding)
//! │   (+ viewport padding)
//! └── current song (flows after the viewport, or pinned to the frame bottom)
//! ```
//!
//! Only the line-height / wrapping rules differ between surfaces, and those
//! live behind [`TextMeasure`].

use std::collections::HashMap;

use serde::Serialize;

use super::{Content, Element, EntryBox, Length, Measurement, Rect, Size, StyleProp, Surface};
use crate::board::arbiter::DisplayMode;
use crate::board::content::SongEntry;

/// Turns text into rendered heights for a given content width.
pub trait TextMeasure {
    fn entry_height(&self, entry: &SongEntry, width: f64) -> f64;
    fn current_song_height(&self, text: &str, width: f64) -> f64;
}

/// Fixed geometry of the surface around the flowing content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxMetrics {
    /// Frame top edge, from the container top
    pub frame_top: f64,
    /// Horizontal gap between container and frame (each side)
    pub frame_inset_x: f64,
    /// Border + inner padding above the viewport
    pub chrome_top: f64,
    /// Border + inner padding below the content
    pub chrome_bottom: f64,
    /// Border + inner padding left and right, combined
    pub chrome_x: f64,
    /// Default vertical margins of the current song slot
    pub current_margin_top: f64,
    pub current_margin_bottom: f64,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self {
            frame_top: 100.0,
            frame_inset_x: 80.0,
            chrome_top: 0.0,
            chrome_bottom: 0.0,
            chrome_x: 0.0,
            current_margin_top: 0.0,
            current_margin_bottom: 0.0,
        }
    }
}

/// Style bookkeeping for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementStyle {
    pub height: Option<Length>,
    pub max_height: Option<Length>,
    pub padding_bottom: Option<f64>,
    pub margin_top: Option<f64>,
    pub display: bool,
    pub pinned: bool,
    pub mode: Option<DisplayMode>,
    pub visible: bool,
    pub offset: Option<(f64, f64)>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            height: None,
            max_height: None,
            padding_bottom: None,
            margin_top: None,
            display: true,
            pinned: false,
            mode: None,
            visible: true,
            offset: None,
        }
    }
}

impl ElementStyle {
    pub fn apply(&mut self, prop: StyleProp) {
        match prop {
            StyleProp::Height(v) => self.height = v,
            StyleProp::MaxHeight(v) => self.max_height = v,
            StyleProp::PaddingBottom(v) => self.padding_bottom = v,
            StyleProp::MarginTop(v) => self.margin_top = v,
            StyleProp::Display(v) => self.display = v,
            StyleProp::Pinned(v) => self.pinned = v,
            StyleProp::ModeClass(v) => self.mode = v,
            StyleProp::Visible(v) => self.visible = v,
            StyleProp::Offset { right, top } => self.offset = Some((right, top)),
        }
    }
}

/// Resolved geometry for one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoxLayout {
    pub container: Rect,
    pub frame: Rect,
    pub frame_displayed: bool,
    /// Inner content rect of the frame (chrome removed)
    pub frame_inner: Rect,
    pub viewport: Rect,
    /// Natural height of everything inside the viewport
    pub viewport_content: f64,
    pub list_height: f64,
    pub entries: Vec<EntryBox>,
    pub current: Rect,
    pub current_displayed: bool,
    pub current_margin_top: f64,
    pub current_margin_bottom: f64,
    pub content_width: f64,
}

/// Box-model surface generic over its text measurement.
pub struct BoxSurface<M> {
    measure: M,
    metrics: BoxMetrics,
    size: Size,
    styles: HashMap<Element, ElementStyle>,
    entries: Vec<SongEntry>,
    current: Option<String>,
    scroll_offset: f64,
    with_decoration: bool,
    with_indicator: bool,
}

impl<M: TextMeasure> BoxSurface<M> {
    pub fn new(measure: M, metrics: BoxMetrics, size: Size) -> Self {
        let mut styles = HashMap::new();
        // Nothing is playing until told otherwise
        styles.insert(
            Element::NowPlayingIndicator,
            ElementStyle {
                visible: false,
                ..ElementStyle::default()
            },
        );
        Self {
            measure,
            metrics,
            size,
            styles,
            entries: Vec::new(),
            current: None,
            scroll_offset: 0.0,
            with_decoration: true,
            with_indicator: true,
        }
    }

    pub fn without_decoration(mut self) -> Self {
        self.with_decoration = false;
        self
    }

    pub fn without_indicator(mut self) -> Self {
        self.with_indicator = false;
        self
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_metrics(&mut self, metrics: BoxMetrics) {
        self.metrics = metrics;
    }

    pub fn metrics(&self) -> &BoxMetrics {
        &self.metrics
    }

    pub fn text_measure(&self) -> &M {
        &self.measure
    }

    pub fn style(&self, element: Element) -> ElementStyle {
        self.styles.get(&element).cloned().unwrap_or_default()
    }

    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn current_song(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Raw offset as last written by the board.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Offset clamped to what the viewport can actually scroll.
    pub fn effective_scroll_offset(&self) -> f64 {
        let layout = self.layout();
        let max = (layout.viewport_content - layout.viewport.height()).max(0.0);
        self.scroll_offset.clamp(0.0, max)
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        self.style(Element::Frame).mode
    }

    fn exists(&self, element: Element) -> bool {
        match element {
            Element::Decoration => self.with_decoration,
            Element::NowPlayingIndicator => self.with_indicator,
            _ => true,
        }
    }

    pub fn layout(&self) -> BoxLayout {
        let m = &self.metrics;
        let container = Rect::new(0.0, 0.0, self.size.width, self.size.height);

        let frame_style = self.style(Element::Frame);
        let viewport_style = self.style(Element::ScrollViewport);
        let list_style = self.style(Element::SungList);
        let current_style = self.style(Element::CurrentSong);

        let frame_left = m.frame_inset_x;
        let frame_right = (self.size.width - m.frame_inset_x).max(frame_left);
        let content_width = (frame_right - frame_left - m.chrome_x).max(0.0);

        // 1. Sung list: entries stack, padding at the end
        let mut entries = Vec::with_capacity(self.entries.len());
        let mut cursor = 0.0;
        for entry in &self.entries {
            let height = self.measure.entry_height(entry, content_width);
            entries.push(EntryBox {
                top: cursor,
                height,
            });
            cursor += height;
        }
        let list_height = cursor + list_style.padding_bottom.unwrap_or(0.0);

        // 2. Viewport
        let viewport_content = list_height + viewport_style.padding_bottom.unwrap_or(0.0);
        let mut viewport_height = match viewport_style.height {
            Some(Length::Px(h)) => h.max(0.0),
            _ => viewport_content,
        };
        if let Some(Length::Px(max)) = viewport_style.max_height {
            viewport_height = viewport_height.min(max.max(0.0));
        }

        // 3. Current song
        let current_displayed = current_style.display && self.current.is_some();
        let current_height = match (&self.current, current_displayed) {
            (Some(text), true) => self.measure.current_song_height(text, content_width),
            _ => 0.0,
        };
        let current_margin_top = current_style.margin_top.unwrap_or(m.current_margin_top);
        let current_margin_bottom = m.current_margin_bottom;
        let current_flow = if current_displayed && !current_style.pinned {
            current_margin_top + current_height + current_margin_bottom
        } else {
            0.0
        };

        // 4. Frame
        let frame_displayed = frame_style.display;
        let inner_height = match frame_style.height {
            Some(Length::Px(h)) => h.max(0.0),
            _ => viewport_height + current_flow,
        };
        let inner_height = match frame_style.max_height {
            Some(Length::Px(max)) => inner_height.min(max.max(0.0)),
            _ => inner_height,
        };

        if !frame_displayed {
            return BoxLayout {
                container,
                frame: Rect::ZERO,
                frame_displayed: false,
                frame_inner: Rect::ZERO,
                viewport: Rect::ZERO,
                viewport_content,
                list_height,
                entries,
                current: Rect::ZERO,
                current_displayed,
                current_margin_top,
                current_margin_bottom,
                content_width,
            };
        }

        let frame_top = m.frame_top;
        let inner_top = frame_top + m.chrome_top;
        let inner_bottom = inner_top + inner_height;
        let frame = Rect::new(frame_left, frame_top, frame_right, inner_bottom + m.chrome_bottom);
        let inner_left = frame_left + m.chrome_x / 2.0;
        let frame_inner = Rect::new(inner_left, inner_top, inner_left + content_width, inner_bottom);

        let viewport = Rect::new(
            frame_inner.left,
            inner_top,
            frame_inner.right,
            inner_top + viewport_height,
        );

        let current = if !current_displayed {
            Rect::ZERO
        } else if current_style.pinned {
            let bottom = inner_bottom - current_margin_bottom;
            Rect::new(frame_inner.left, bottom - current_height, frame_inner.right, bottom)
        } else {
            let top = viewport.bottom + current_margin_top;
            Rect::new(frame_inner.left, top, frame_inner.right, top + current_height)
        };

        BoxLayout {
            container,
            frame,
            frame_displayed,
            frame_inner,
            viewport,
            viewport_content,
            list_height,
            entries,
            current,
            current_displayed,
            current_margin_top,
            current_margin_bottom,
            content_width,
        }
    }
}

impl<M: TextMeasure> Surface for BoxSurface<M> {
    fn measure(&self, element: Element) -> Option<Measurement> {
        if !self.exists(element) {
            return None;
        }
        let layout = self.layout();
        let style = self.style(element);
        let measurement = match element {
            Element::Container => Measurement {
                height: layout.container.height(),
                content_height: layout.container.height(),
                bounds: layout.container,
                displayed: true,
                ..Measurement::default()
            },
            Element::Frame => Measurement {
                height: layout.frame.height(),
                content_height: layout.frame.height(),
                bounds: layout.frame,
                displayed: layout.frame_displayed,
                ..Measurement::default()
            },
            Element::ScrollViewport => Measurement {
                height: layout.viewport.height(),
                content_height: layout.viewport_content,
                bounds: layout.viewport,
                displayed: layout.frame_displayed,
                ..Measurement::default()
            },
            Element::SungList => Measurement {
                height: layout.list_height,
                content_height: layout.list_height,
                bounds: Rect::new(
                    layout.viewport.left,
                    layout.viewport.top,
                    layout.viewport.right,
                    layout.viewport.top + layout.list_height,
                ),
                displayed: layout.frame_displayed,
                ..Measurement::default()
            },
            Element::CurrentSong => Measurement {
                height: layout.current.height(),
                content_height: layout.current.height(),
                margin_top: layout.current_margin_top,
                margin_bottom: layout.current_margin_bottom,
                bounds: layout.current,
                displayed: layout.current_displayed,
            },
            Element::NowPlayingIndicator => Measurement {
                bounds: layout.current,
                displayed: style.visible,
                ..Measurement::default()
            },
            Element::Decoration => {
                let bounds = match style.offset {
                    Some((right, top)) => {
                        let edge = layout.container.right - right;
                        Rect::new(edge, top, edge, top)
                    }
                    None => Rect::ZERO,
                };
                Measurement {
                    bounds,
                    displayed: style.visible,
                    ..Measurement::default()
                }
            }
        };
        Some(measurement)
    }

    fn measure_entries(&self) -> Vec<EntryBox> {
        self.layout().entries
    }

    fn viewport(&self) -> Size {
        self.size
    }

    fn set_style(&mut self, element: Element, props: &[StyleProp]) {
        if !self.exists(element) {
            return;
        }
        let style = self.styles.entry(element).or_default();
        for prop in props {
            style.apply(*prop);
        }
    }

    fn set_content(&mut self, element: Element, content: Content) {
        match (element, content) {
            (Element::SungList, Content::Entries(entries)) => self.entries = entries,
            (Element::CurrentSong, Content::CurrentSong(text)) => self.current = text,
            (element, content) => {
                tracing::debug!(?element, ?content, "content ignored by element");
            }
        }
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}
