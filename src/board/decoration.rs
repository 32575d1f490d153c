//! Keeps the cosmetic overlay glued to the frame's bottom-right corner.

use serde::Serialize;

use crate::app::config::DisplayConfig;
use crate::surface::{Element, StyleProp, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DecorationUpdate {
    /// No decoration (or no frame) on this surface
    Missing,
    /// Frame is hidden, so is the decoration
    Hidden,
    Placed { right: f64, top: f64 },
}

/// Recompute the decoration position from fresh frame/container boxes.
pub fn sync_decoration<S: Surface>(surface: &mut S, config: &DisplayConfig) -> DecorationUpdate {
    if !surface.has(Element::Decoration) {
        return DecorationUpdate::Missing;
    }
    let (Some(frame), Some(container)) = (
        surface.measure(Element::Frame),
        surface.measure(Element::Container),
    ) else {
        return DecorationUpdate::Missing;
    };

    if !frame.displayed {
        surface.set_style(Element::Decoration, &[StyleProp::Visible(false)]);
        return DecorationUpdate::Hidden;
    }

    let right = (container.bounds.right - frame.bounds.right) - config.decoration_inset;
    let top = (frame.bounds.bottom - container.bounds.top) - config.decoration_overlap;

    surface.set_style(
        Element::Decoration,
        &[StyleProp::Visible(true), StyleProp::Offset { right, top }],
    );
    tracing::trace!(right, top, "decoration placed");
    DecorationUpdate::Placed { right, top }
}
