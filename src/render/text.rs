use std::borrow::Cow;

use crate::foundation::core::Rgba;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::FontRequest;

/// Family used when no font name is set, and appended as a fallback when one is.
const SYSTEM_FAMILY: &str = "system-ui";

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgba> for TextBrushRgba8 {
    fn from(c: Rgba) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        Self { r, g, b, a }
    }
}

/// CSS-style family list for a font request: the requested family first, then the system font.
pub(crate) fn font_stack_source(font: &FontRequest) -> String {
    match font.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            format!("\"{}\", {SYSTEM_FAMILY}", name.replace('"', ""))
        }
        _ => SYSTEM_FAMILY.to_string(),
    }
}

/// Stateful helper for building Parley text layouts against the system font collection.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape plain text with the requested font and wrap it to `max_width_px`.
    pub(crate) fn layout_in_box(
        &mut self,
        text: &str,
        font: &FontRequest,
        brush: TextBrushRgba8,
        max_width_px: f32,
    ) -> SketchResult<parley::Layout<TextBrushRgba8>> {
        let size_px = font.size as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SketchError::usage("font size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font_stack_source(font))),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
