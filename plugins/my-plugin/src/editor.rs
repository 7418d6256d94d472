//! Placeholder editor: a filled background with the plugin name centred.

use plinth::prelude::*;

use crate::MyPluginParameters;

/// Default editor size.
pub const EDITOR_SIZE: Size = Size::new(400, 300);

pub const BACKGROUND: Colour = Colour::from_argb(0xff32_3e44);
pub const LABEL_COLOUR: Colour = Colour::WHITE;
pub const LABEL_HEIGHT: f32 = 24.0;
pub const LABEL: &str = "My Plugin";

pub struct MyPluginEditor {
    context: EditorContext<MyPluginParameters>,
    bounds: Rect,
}

impl MyPluginEditor {
    pub fn new(context: EditorContext<MyPluginParameters>) -> Self {
        Self {
            context,
            bounds: Rect::from_size(EDITOR_SIZE),
        }
    }

    /// Bounds from the last layout pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Editor for MyPluginEditor {
    fn size(&self) -> Size {
        EDITOR_SIZE
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_all(BACKGROUND);
        canvas.set_colour(LABEL_COLOUR);
        canvas.set_font_height(LABEL_HEIGHT);
        canvas.draw_fitted_text(LABEL, self.bounds.local(), Justification::Centred, 1);
    }

    fn layout(&mut self, bounds: Rect) {
        // no child controls yet
        self.bounds = bounds;
    }

    fn is_attached(&self) -> bool {
        self.context.is_attached()
    }

    fn opened(&mut self) {
        log::debug!("{}: editor opened", self.context.config().name);
    }

    fn closed(&mut self) {
        log::debug!("{}: editor closed", self.context.config().name);
    }
}
