//! Page geometry. Layout works in millimetres from the top-left corner;
//! conversion to PDF user space (points, bottom-left origin) happens only
//! when operations are emitted.

pub const MM_TO_PT: f32 = 72.0 / 25.4;
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const MARGIN_LEFT_MM: f32 = 10.0;
pub const MARGIN_RIGHT_MM: f32 = 10.0;
pub const MARGIN_TOP_MM: f32 = 10.0;
/// Content crossing this distance from the bottom edge moves to a new page.
pub const BREAK_MARGIN_MM: f32 = 20.0;

/// Horizontal padding inside a text cell.
pub const CELL_PADDING_MM: f32 = 1.0;

pub fn mm(v: f32) -> f32 {
    v * MM_TO_PT
}

/// Converts a top-down y coordinate in millimetres into PDF user space.
pub fn pdf_y(top_mm: f32) -> f32 {
    (PAGE_HEIGHT_MM - top_mm) * MM_TO_PT
}

pub fn content_width_mm() -> f32 {
    PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM
}

pub fn page_break_y_mm() -> f32 {
    PAGE_HEIGHT_MM - BREAK_MARGIN_MM
}
