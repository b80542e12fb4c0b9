//! Flowing page layout.
//!
//! `PageCanvas` keeps a top-down cursor in millimetres and appends PDF
//! content operations for the current page. Every page gets the branded
//! header when it is opened and the footer when the canvas is finished.
//! Any cell that would cross the break line opens a new page first.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use super::logo::LogoImage;
use super::metrics::{FontFace, FontMetricTable};
use super::style::{Branding, BulletStyle, DocumentStyle, Rgb};
use super::text::{encode_win_ansi, sanitize, wrap_text};
use super::units::{
    content_width_mm, mm, page_break_y_mm, pdf_y, CELL_PADDING_MM, MARGIN_LEFT_MM,
    MARGIN_RIGHT_MM, MARGIN_TOP_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PT_TO_MM,
};

pub const BODY_SIZE_PT: f32 = 11.0;
pub const TITLE_LINE_MM: f32 = 10.0;
pub const BODY_LINE_MM: f32 = 8.0;
pub const SECTION_GAP_MM: f32 = 5.0;

const LOGO_X_MM: f32 = 10.0;
const LOGO_Y_MM: f32 = 10.0;
const LOGO_WIDTH_MM: f32 = 40.0;
const COMPANY_BLOCK_X_MM: f32 = 120.0;
const COMPANY_BLOCK_SIZE_PT: f32 = 12.0;
const HEADER_GAP_MM: f32 = 10.0;
const FOOTER_OFFSET_MM: f32 = 15.0;
const FOOTER_SIZE_PT: f32 = 9.0;
const DIVIDER_WIDTH_MM: f32 = 0.5;

/// Resource name of the logo image XObject.
pub const LOGO_RESOURCE: &str = "Im1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A titled block of bullet lines.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub title: &'a str,
    pub lines: Vec<String>,
    pub bullet: BulletStyle,
    pub divider: Option<Rgb>,
}

pub struct PageCanvas<'a> {
    style: &'a DocumentStyle,
    branding: &'a Branding,
    logo: Option<&'a LogoImage>,
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl<'a> PageCanvas<'a> {
    /// Creates the canvas with its first page already opened.
    pub fn new(style: &'a DocumentStyle, branding: &'a Branding, logo: Option<&'a LogoImage>) -> Self {
        let mut canvas = Self {
            style,
            branding,
            logo,
            pages: Vec::new(),
            y: MARGIN_TOP_MM,
        };
        canvas.add_page();
        canvas
    }

    pub fn style(&self) -> &DocumentStyle {
        self.style
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[cfg(test)]
    pub fn cursor_y(&self) -> f32 {
        self.y
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = MARGIN_TOP_MM;
        self.draw_header();
    }

    fn draw_header(&mut self) {
        if let Some(logo) = self.logo {
            let height = logo.height_for_width(LOGO_WIDTH_MM);
            self.draw_logo(LOGO_X_MM, LOGO_Y_MM, LOGO_WIDTH_MM, height);
        }

        let block_width = PAGE_WIDTH_MM - MARGIN_RIGHT_MM - COMPANY_BLOCK_X_MM;
        let mut top = MARGIN_TOP_MM;
        let lines = self.branding.company_block().map(str::to_owned);
        for line in &lines {
            self.place_text(
                line,
                FontFace::Bold,
                COMPANY_BLOCK_SIZE_PT,
                Rgb::BLACK,
                Align::Right,
                (COMPANY_BLOCK_X_MM, block_width),
                top,
                BODY_LINE_MM,
            );
            top += BODY_LINE_MM;
        }
        self.y = top + HEADER_GAP_MM;
    }

    fn draw_logo(&mut self, x: f32, top: f32, width: f32, height: f32) {
        let ops = self.current_ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                mm(width).into(),
                0.into(),
                0.into(),
                mm(height).into(),
                mm(x).into(),
                pdf_y(top + height).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(LOGO_RESOURCE.as_bytes().to_vec())]));
        ops.push(Operation::new("Q", vec![]));
    }

    fn current_ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn metrics(&self, face: FontFace) -> &'static FontMetricTable {
        self.style.font.metrics(face)
    }

    /// Breaks to a new page when a cell of `height` no longer fits.
    fn reserve(&mut self, height: f32) {
        if self.y + height > page_break_y_mm() {
            self.add_page();
        }
    }

    /// Emits one line of already-wrapped text inside the cell
    /// `(x, width) x (top, height)`, vertically centered.
    #[allow(clippy::too_many_arguments)]
    fn place_text(
        &mut self,
        text: &str,
        face: FontFace,
        size_pt: f32,
        color: Rgb,
        align: Align,
        (x, width): (f32, f32),
        top: f32,
        height: f32,
    ) -> f32 {
        let text = sanitize(text);
        let text_width = self.metrics(face).measure_mm(&text, size_pt);
        let text_x = match align {
            Align::Left => x + CELL_PADDING_MM,
            Align::Right => x + width - CELL_PADDING_MM - text_width,
            Align::Center => x + (width - text_width) / 2.0,
        };
        let baseline = top + height / 2.0 + 0.3 * size_pt * PT_TO_MM;

        if !text.is_empty() {
            let [r, g, b] = color.unit();
            let ops = self.current_ops();
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(face.resource_name().as_bytes().to_vec()), size_pt.into()],
            ));
            ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            ops.push(Operation::new("Td", vec![mm(text_x).into(), pdf_y(baseline).into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(&text), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
        text_width
    }

    /// Single-line cell across the content width, then moves to the next line.
    pub fn cell(&mut self, text: &str, face: FontFace, size_pt: f32, height: f32) {
        self.reserve(height);
        let top = self.y;
        self.place_text(
            text,
            face,
            size_pt,
            Rgb::BLACK,
            Align::Left,
            (MARGIN_LEFT_MM, content_width_mm()),
            top,
            height,
        );
        self.y += height;
    }

    /// Like [`cell`](Self::cell) with a rule under the text.
    pub fn underlined_cell(&mut self, text: &str, face: FontFace, size_pt: f32, height: f32) {
        self.reserve(height);
        let top = self.y;
        let width = self.place_text(
            text,
            face,
            size_pt,
            Rgb::BLACK,
            Align::Left,
            (MARGIN_LEFT_MM, content_width_mm()),
            top,
            height,
        );
        let size_mm = size_pt * PT_TO_MM;
        let rule_y = top + height / 2.0 + 0.3 * size_mm + 0.1 * size_mm;
        let x = MARGIN_LEFT_MM + CELL_PADDING_MM;
        self.stroke_line(x, x + width, rule_y, 0.05 * size_mm, Rgb::BLACK);
        self.y += height;
    }

    /// Wrapped paragraph; every wrapped line is its own cell of `line_height`.
    pub fn multi_cell(&mut self, text: &str, face: FontFace, size_pt: f32, line_height: f32) {
        let text = sanitize(text);
        let max_width = content_width_mm() - 2.0 * CELL_PADDING_MM;
        for line in wrap_text(&text, max_width, self.metrics(face), size_pt) {
            self.cell(&line, face, size_pt, line_height);
        }
    }

    /// Vertical gap without drawing.
    pub fn line_break(&mut self, height: f32) {
        self.y += height;
    }

    /// Full-width colored rule at the cursor followed by a section gap.
    ///
    /// Breaks the page first unless a title line fits under the rule.
    pub fn divider(&mut self, color: Rgb) {
        self.reserve(SECTION_GAP_MM + TITLE_LINE_MM);
        let right = PAGE_WIDTH_MM - MARGIN_RIGHT_MM;
        let y = self.y;
        self.stroke_line(MARGIN_LEFT_MM, right, y, DIVIDER_WIDTH_MM, color);
        self.line_break(SECTION_GAP_MM);
    }

    fn stroke_line(&mut self, x1: f32, x2: f32, y: f32, width_mm: f32, color: Rgb) {
        let [r, g, b] = color.unit();
        let ops = self.current_ops();
        ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new("w", vec![mm(width_mm).into()]));
        ops.push(Operation::new("m", vec![mm(x1).into(), pdf_y(y).into()]));
        ops.push(Operation::new("l", vec![mm(x2).into(), pdf_y(y).into()]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Divider, bold `TITLE:` line, bulleted wrapped lines, trailing gap.
    pub fn section(&mut self, section: &Section<'_>) {
        if let Some(color) = section.divider {
            self.divider(color);
        }
        self.cell(&format!("{}:", section.title), FontFace::Bold, BODY_SIZE_PT, TITLE_LINE_MM);
        let prefix = section.bullet.prefix();
        for line in &section.lines {
            // Leading whitespace nests the entry: it goes before the bullet.
            let body = line.trim_start();
            let indent = &line[..line.len() - body.len()];
            self.multi_cell(
                &format!("{indent}{prefix}{body}"),
                FontFace::Regular,
                BODY_SIZE_PT,
                BODY_LINE_MM,
            );
        }
        self.line_break(SECTION_GAP_MM);
    }

    /// Stamps the footer on every page and hands back the page contents.
    pub fn finish(mut self) -> Vec<Vec<Operation>> {
        let tagline = self.branding.tagline.clone();
        let top = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM;
        let pages = std::mem::take(&mut self.pages);
        let mut finished = Vec::with_capacity(pages.len());

        for ops in pages {
            self.pages = vec![ops];
            self.place_text(
                &tagline,
                FontFace::Italic,
                FOOTER_SIZE_PT,
                Rgb::FOOTER_GREY,
                Align::Center,
                (MARGIN_LEFT_MM, content_width_mm()),
                top,
                TITLE_LINE_MM,
            );
            finished.extend(self.pages.drain(..));
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tj_count(ops: &[Operation]) -> usize {
        ops.iter().filter(|op| op.operator == "Tj").count()
    }

    #[test]
    fn test_new_canvas_has_header_and_cursor_below_it() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let canvas = PageCanvas::new(&style, &branding, None);
        assert_eq!(canvas.page_count(), 1);
        // 10mm top + 4 lines * 8mm + 10mm gap
        assert!((canvas.cursor_y() - 52.0).abs() < 1e-4);
    }

    #[test]
    fn test_overflow_opens_new_page_with_header() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let mut canvas = PageCanvas::new(&style, &branding, None);
        for i in 0..40 {
            canvas.cell(&format!("Line {i}"), FontFace::Regular, BODY_SIZE_PT, BODY_LINE_MM);
        }
        assert!(canvas.page_count() >= 2);
        let pages = canvas.finish();
        // Second page starts with the four company lines.
        let second = &pages[1];
        assert!(tj_count(second) >= 4 + 1);
    }

    #[test]
    fn test_finish_stamps_one_footer_per_page() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let mut canvas = PageCanvas::new(&style, &branding, None);
        canvas.add_page();
        let pages = canvas.finish();
        assert_eq!(pages.len(), 2);
        for page in &pages {
            // header (4) + footer (1)
            assert_eq!(tj_count(page), 5);
        }
    }

    #[test]
    fn test_section_without_divider_draws_no_rule() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let mut canvas = PageCanvas::new(&style, &branding, None);
        canvas.section(&Section {
            title: "EXCLUSIONS",
            lines: vec!["Permit fees".to_string()],
            bullet: BulletStyle::Dash,
            divider: None,
        });
        let pages = canvas.finish();
        assert!(!pages[0].iter().any(|op| op.operator == "S"));
    }

    #[test]
    fn test_section_with_divider_strokes_in_color() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let mut canvas = PageCanvas::new(&style, &branding, None);
        canvas.section(&Section {
            title: "GAS",
            lines: vec![],
            bullet: BulletStyle::Dash,
            divider: Some(Rgb::RED),
        });
        let pages = canvas.finish();
        let stroke = pages[0]
            .iter()
            .find(|op| op.operator == "RG")
            .expect("divider color");
        let red = stroke.operands[0].as_float().unwrap();
        assert!((red - 204.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_divider_moves_to_next_page_with_its_title() {
        let style = DocumentStyle::default();
        let branding = Branding::default();
        let mut canvas = PageCanvas::new(&style, &branding, None);
        // Room for the rule and its gap, not for the title under it.
        canvas.y = page_break_y_mm() - SECTION_GAP_MM;
        canvas.section(&Section {
            title: "PLUMBING",
            lines: vec![],
            bullet: BulletStyle::Dash,
            divider: Some(Rgb::RED),
        });
        assert_eq!(canvas.page_count(), 2);
        let pages = canvas.finish();
        assert!(!pages[0].iter().any(|op| op.operator == "S"));
        assert!(pages[1].iter().any(|op| op.operator == "S"));
        // header (4) + title + footer (1)
        assert_eq!(tj_count(&pages[1]), 6);
    }
}
