use ratatui::layout::Rect;

/// Split `area` into body and a 3-row footer.
pub fn layout_regions(area: Rect) -> (Rect, Rect) {
    let footer_height = 3.min(area.height);
    let body = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.saturating_sub(footer_height),
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    (body, footer)
}

/// Rect of at most `width` x `height` centered in `area`.
pub fn centered_rect_by_size(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
