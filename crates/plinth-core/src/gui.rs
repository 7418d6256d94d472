//! Editor traits and a minimal drawing surface.
//!
//! The host owns the editor returned by `create_editor` and drives it from
//! its UI thread. The windowing toolkit is reached through [`Canvas`]; a
//! [`DisplayList`] records drawing for headless hosts and tests.

use std::sync::{Arc, Weak};

use crate::config::PluginConfig;
use crate::types::{Rect, Size};

// =========================================================================
// Colour / Justification
// =========================================================================

/// 32-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour(pub u32);

impl Colour {
    /// Opaque black.
    pub const BLACK: Colour = Colour(0xff00_0000);
    /// Opaque white.
    pub const WHITE: Colour = Colour(0xffff_ffff);
    /// Fully transparent.
    pub const TRANSPARENT: Colour = Colour(0);

    /// From a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Colour(argb)
    }

    /// Opaque colour from components.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Colour(0xff00_0000 | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// Whether the colour is fully opaque.
    pub const fn is_opaque(&self) -> bool {
        self.alpha() == 0xff
    }
}

/// Horizontal placement of text inside its area. Text is always vertically
/// centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    Left,
    #[default]
    Centred,
    Right,
}

// =========================================================================
// Canvas
// =========================================================================

/// Drawing surface handed to [`Editor::render`].
pub trait Canvas {
    /// Fill the whole surface.
    fn fill_all(&mut self, colour: Colour);

    /// Colour for subsequent text.
    fn set_colour(&mut self, colour: Colour);

    /// Font height in pixels for subsequent text.
    fn set_font_height(&mut self, height: f32);

    /// Draw text inside `area`, shrinking it to fit in at most `max_lines`.
    fn draw_fitted_text(
        &mut self,
        text: &str,
        area: Rect,
        justification: Justification,
        max_lines: u32,
    );
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillAll(Colour),
    SetColour(Colour),
    SetFontHeight(f32),
    DrawFittedText {
        text: String,
        area: Rect,
        justification: Justification,
        max_lines: u32,
    },
}

/// Canvas that records commands instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DrawFittedText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn fill_all(&mut self, colour: Colour) {
        self.commands.push(DrawCommand::FillAll(colour));
    }

    fn set_colour(&mut self, colour: Colour) {
        self.commands.push(DrawCommand::SetColour(colour));
    }

    fn set_font_height(&mut self, height: f32) {
        self.commands.push(DrawCommand::SetFontHeight(height));
    }

    fn draw_fitted_text(
        &mut self,
        text: &str,
        area: Rect,
        justification: Justification,
        max_lines: u32,
    ) {
        self.commands.push(DrawCommand::DrawFittedText {
            text: text.to_string(),
            area,
            justification,
            max_lines,
        });
    }
}

// =========================================================================
// Editor
// =========================================================================

/// Size constraints for the editor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConstraints {
    /// Minimum size.
    pub min: Size,
    /// Maximum size.
    pub max: Size,
    /// Whether the editor is resizable.
    pub resizable: bool,
}

impl EditorConstraints {
    /// Fixed-size editor.
    pub const fn fixed(size: Size) -> Self {
        Self {
            min: size,
            max: size,
            resizable: false,
        }
    }
}

impl Default for EditorConstraints {
    fn default() -> Self {
        Self {
            min: Size::new(400, 300),
            max: Size::new(1600, 1200),
            resizable: true,
        }
    }
}

/// What an editor gets from the plugin that created it.
///
/// Holds the parameters weakly: an open editor never keeps a released
/// plugin alive, and every access checks the plugin still exists.
pub struct EditorContext<P> {
    parameters: Weak<P>,
    config: &'static PluginConfig,
}

impl<P> EditorContext<P> {
    /// Context observing `parameters`.
    pub fn new(parameters: &Arc<P>, config: &'static PluginConfig) -> Self {
        Self {
            parameters: Arc::downgrade(parameters),
            config,
        }
    }

    /// Strong handle to the parameters, `None` once the plugin is gone.
    pub fn parameters(&self) -> Option<Arc<P>> {
        self.parameters.upgrade()
    }

    /// Whether the plugin still exists.
    pub fn is_attached(&self) -> bool {
        self.parameters.strong_count() > 0
    }

    /// Static plugin metadata.
    pub fn config(&self) -> &'static PluginConfig {
        self.config
    }
}

impl<P> Clone for EditorContext<P> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            config: self.config,
        }
    }
}

impl<P> std::fmt::Debug for EditorContext<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("plugin", &self.config.name)
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A plugin editor.
///
/// Created by the plugin, owned and driven by the host on its UI thread.
pub trait Editor: Send {
    /// Initial size.
    fn size(&self) -> Size;

    /// Size constraints.
    fn constraints(&self) -> EditorConstraints {
        EditorConstraints::default()
    }

    /// Paint the editor. Must be idempotent.
    fn render(&self, canvas: &mut dyn Canvas);

    /// Position child content inside `bounds` after a resize.
    fn layout(&mut self, bounds: Rect);

    /// Whether the plugin that created this editor still exists.
    fn is_attached(&self) -> bool;

    /// Called when the host shows the editor.
    fn opened(&mut self) {}

    /// Called when the host hides the editor.
    fn closed(&mut self) {}
}
