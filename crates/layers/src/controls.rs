use scene::MapContext;

/// Multiplier applied by one zoom button press.
pub const ZOOM_STEP: f64 = 2.0;

/// Zoom/reset/visibility buttons overlaid on the map.
#[derive(Debug)]
pub struct MapControls<C> {
    ctx: C,
}

impl<C: MapContext> MapControls<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }

    pub fn zoom_in(&mut self) {
        let zoom = self.ctx.state().zoom * ZOOM_STEP;
        self.ctx.set_zoom(zoom);
    }

    pub fn zoom_out(&mut self) {
        let zoom = self.ctx.state().zoom / ZOOM_STEP;
        self.ctx.set_zoom(zoom);
    }

    /// Back to the world view with nothing selected.
    pub fn reset(&mut self) {
        self.ctx.select_country(None);
    }

    pub fn toggle_unselected(&mut self) {
        self.ctx.toggle_show_unselected();
    }

    pub fn show_unselected(&self) -> bool {
        self.ctx.state().show_unselected
    }
}
