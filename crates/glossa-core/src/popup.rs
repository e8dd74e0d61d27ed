use glossa_types::PopupAnchor;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PopupSize {
    pub width: u32,
    pub height: u32,
}

/// Gap between the anchor point and the popup's top edge
const ANCHOR_OFFSET_Y: i32 = 10;

/// Popup top-left corner for a selection anchored at `anchor`, clamped so
/// the fixed-size popup stays inside the viewport.
pub fn clamp_origin(anchor: PopupAnchor, viewport: Viewport, popup: PopupSize) -> (i32, i32) {
    let left = anchor.x.min(viewport.width as i32 - popup.width as i32);
    let top = (anchor.y + ANCHOR_OFFSET_Y).min(viewport.height as i32 - popup.height as i32);

    (left, top)
}
