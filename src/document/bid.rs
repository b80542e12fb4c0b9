//! Bid proposal layout.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::canvas::{Section, BODY_SIZE_PT, SECTION_GAP_MM, TITLE_LINE_MM};
use super::format::{format_currency, format_long_date};
use super::metrics::FontFace;
use super::style::BulletStyle;
use super::{ComposeError, DocumentComposer, RenderedDocument};
use crate::domain::BidRecord;

pub const SCOPE_TITLE: &str = "SCOPE OF WORK - PLUMBING & GAS";

const PLUMBING_LEAD: &str = "Furnish and install all rough-in and finish plumbing for:";

const PLUMBING_SCOPE: [&str; 5] = [
    "Provide and install water heater (electric or gas)",
    "Distribution of hot and cold lines throughout building",
    "DWV (drain, waste, vent) system per code",
    "ADA-compliant fixtures throughout",
    "Final fixture connection and system testing",
];

const GAS_SCOPE: [&str; 3] = [
    "Install gas line to water heater location (if gas WH is selected)",
    "Test and pressure-check line to code",
    "Coordinate with utility for tie-in",
];

const INCLUSIONS: [&str; 4] = [
    "Commercial-grade fixtures (e.g., Kohler/Delta/Sloan or equivalent)",
    "All hangers, straps, valves, and related materials",
    "Coordination with GC and other trades",
    "As-built drawings and final inspection walk",
];

const EXCLUSIONS: [&str; 4] = [
    "Core drilling through structural concrete (unless noted)",
    "Fire sprinklers, HVAC, or low-voltage",
    "Permit fees (assumed by GC)",
    "Trenching or tie-ins beyond 10\u{2019} of building",
];

const TOTAL_NOTE: &str = "(Includes labor, materials, and standard commercial fixtures)";
const THANK_YOU: &str =
    "Thank you for the opportunity to bid this project. We look forward to working with you.";
const SIGNATURE_RULE: &str = "_________________________";
const BLANK_DATE: &str = "Date: ___________________";

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

impl DocumentComposer {
    /// Renders a bid proposal. Sections always appear in the same order:
    /// header, scope (plumbing, gas), inclusions, exclusions, total, terms,
    /// sign-off, signatures.
    pub fn render_bid(
        &self,
        record: &BidRecord,
        render_date: NaiveDate,
    ) -> Result<RenderedDocument, ComposeError> {
        let today = format_long_date(render_date);
        let signature_date = if record.signature_date.trim().is_empty() {
            today.clone()
        } else {
            record.signature_date.trim().to_string()
        };
        let total = record.total_amount.max(Decimal::ZERO);
        let bullet = self.style().bullet;
        let dividers = &self.style().dividers;
        let branding = self.branding();

        let plumbing: Vec<String> = std::iter::once(PLUMBING_LEAD.to_string())
            .chain(record.fixtures.iter().map(|fixture| format!("  - {fixture}")))
            .chain(owned(&PLUMBING_SCOPE))
            .collect();

        let title = format!("Bid Proposal - {}", record.project_name);
        tracing::info!(
            project_name = %record.project_name,
            fixtures = record.fixtures.len(),
            terms = record.terms.len(),
            total = %total,
            "Rendering bid"
        );

        self.compose(&title, record.logo.as_deref(), |canvas| {
            for line in [
                format!("Date: {today}"),
                format!("Project: {}", record.project_name),
                format!("Location: {}", record.location),
                format!("Prepared For: {}", record.client_name),
            ] {
                canvas.cell(&line, FontFace::Bold, BODY_SIZE_PT, TITLE_LINE_MM);
            }
            canvas.line_break(SECTION_GAP_MM);

            canvas.underlined_cell(SCOPE_TITLE, FontFace::Bold, BODY_SIZE_PT, TITLE_LINE_MM);
            canvas.section(&Section {
                title: "PLUMBING",
                lines: plumbing,
                bullet,
                divider: dividers.plumbing,
            });
            canvas.section(&Section {
                title: "GAS",
                lines: owned(&GAS_SCOPE),
                bullet,
                divider: dividers.gas,
            });
            canvas.section(&Section {
                title: "INCLUSIONS",
                lines: owned(&INCLUSIONS),
                bullet,
                divider: dividers.inclusions,
            });
            canvas.section(&Section {
                title: "EXCLUSIONS",
                lines: owned(&EXCLUSIONS),
                bullet,
                divider: dividers.exclusions,
            });

            canvas.cell(
                &format!("TOTAL BID: {}", format_currency(total)),
                FontFace::Bold,
                BODY_SIZE_PT,
                TITLE_LINE_MM,
            );
            canvas.cell(TOTAL_NOTE, FontFace::Regular, BODY_SIZE_PT, TITLE_LINE_MM);
            canvas.line_break(SECTION_GAP_MM);

            canvas.section(&Section {
                title: "TERMS",
                lines: record.terms.clone(),
                bullet,
                divider: dividers.terms,
            });

            canvas.multi_cell(THANK_YOU, FontFace::Regular, BODY_SIZE_PT, TITLE_LINE_MM);
            canvas.line_break(SECTION_GAP_MM);
            canvas.section(&Section {
                title: &branding.signoff,
                lines: vec![
                    branding.signer_name.clone(),
                    branding.signer_title.clone(),
                    branding.company_name.clone(),
                    branding.phone.clone(),
                ],
                bullet: BulletStyle::None,
                divider: None,
            });

            canvas.section(&Section {
                title: "Authorized Signature",
                lines: vec![
                    SIGNATURE_RULE.to_string(),
                    "Signature".to_string(),
                    format!("Date: {signature_date}"),
                ],
                bullet: BulletStyle::None,
                divider: None,
            });
            canvas.section(&Section {
                title: "Client/GC Approval",
                lines: vec![
                    SIGNATURE_RULE.to_string(),
                    "Client Signature".to_string(),
                    BLANK_DATE.to_string(),
                ],
                bullet: BulletStyle::None,
                divider: None,
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::logo::tests::sample_png;
    use crate::document::style::{DocumentStyle, Rgb};
    use crate::document::testing::{all_strings, has_image_xobject, page_strings};
    use crate::document::Branding;

    fn render_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn sample_record() -> BidRecord {
        BidRecord {
            project_name: "Main Street Clinic".to_string(),
            location: "Lehi, UT".to_string(),
            client_name: "Summit Builders".to_string(),
            total_amount: Decimal::new(1234560, 2),
            fixtures: vec!["(4) Water closets".to_string(), "(2) Lavatories".to_string()],
            terms: vec!["Net 30".to_string()],
            signature_date: String::new(),
            logo: None,
        }
    }

    fn position(strings: &[String], needle: &str) -> usize {
        strings
            .iter()
            .position(|s| s == needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in {strings:?}"))
    }

    #[test]
    fn test_render_bid_produces_parseable_pdf() {
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&sample_record(), render_date()).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        assert!(doc.page_count >= 1);
        assert!(doc.warnings.is_empty());
        let strings = all_strings(&doc.bytes);
        assert!(strings.contains(&"Date: October 16, 2026".to_string()));
        assert!(strings.contains(&"Project: Main Street Clinic".to_string()));
        assert!(strings.contains(&"TOTAL BID: $12,345.60".to_string()));
        assert!(strings.contains(&"  - - (4) Water closets".to_string()));
        assert!(strings.contains(&"- Net 30".to_string()));
    }

    #[test]
    fn test_render_bid_is_byte_identical_for_same_input() {
        let composer = DocumentComposer::default();
        let first = composer.render_bid(&sample_record(), render_date()).unwrap();
        let second = composer.render_bid(&sample_record(), render_date()).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_render_date_changes_output() {
        let composer = DocumentComposer::default();
        let first = composer.render_bid(&sample_record(), render_date()).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let second = composer.render_bid(&sample_record(), other_day).unwrap();
        assert_ne!(first.bytes, second.bytes);
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&sample_record(), render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        let order = [
            "Date: October 16, 2026",
            SCOPE_TITLE,
            "PLUMBING:",
            "GAS:",
            "INCLUSIONS:",
            "EXCLUSIONS:",
            "TOTAL BID: $12,345.60",
            "TERMS:",
            "- Iron Plumbing Utah:",
            "Authorized Signature:",
            "Client/GC Approval:",
        ];
        let positions: Vec<usize> = order.iter().map(|s| position(&strings, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_empty_fixtures_and_terms_keep_boilerplate() {
        let mut record = sample_record();
        record.fixtures.clear();
        record.terms.clear();
        record.project_name.clear();
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&record, render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        for needle in [
            "PLUMBING:",
            "- Furnish and install all rough-in and finish plumbing for:",
            "- Final fixture connection and system testing",
            "GAS:",
            "- Coordinate with utility for tie-in",
            "INCLUSIONS:",
            "EXCLUSIONS:",
            "- Permit fees (assumed by GC)",
            "TERMS:",
            "Project: ",
        ] {
            assert!(strings.contains(&needle.to_string()), "missing {needle:?}");
        }
    }

    #[test]
    fn test_curly_apostrophe_is_sanitized() {
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&sample_record(), render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        assert!(strings.contains(&"- Trenching or tie-ins beyond 10' of building".to_string()));
    }

    #[test]
    fn test_signature_dates() {
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&sample_record(), render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        assert!(strings.contains(&"Date: ___________________".to_string()));
        let stamped = strings.iter().filter(|s| *s == "Date: October 16, 2026").count();
        assert_eq!(stamped, 2, "header and authorized signature");

        let mut record = sample_record();
        record.signature_date = "November 1, 2026".to_string();
        let doc = composer.render_bid(&record, render_date()).unwrap();
        assert!(all_strings(&doc.bytes).contains(&"Date: November 1, 2026".to_string()));
    }

    #[test]
    fn test_long_fixture_list_paginates_with_header_and_footer() {
        let mut record = sample_record();
        record.fixtures = (1..=60).map(|i| format!("Fixture {i}")).collect();
        let composer = DocumentComposer::default();
        let doc = composer.render_bid(&record, render_date()).unwrap();
        assert!(doc.page_count >= 3, "got {} pages", doc.page_count);

        let pages = page_strings(&doc.bytes);
        assert_eq!(pages.len(), doc.page_count);
        for page in &pages {
            assert_eq!(page[0], "IRON PLUMBING SERVICES");
            let footers = page.iter().filter(|s| *s == "Iron Strength, Fluid Precision").count();
            assert_eq!(footers, 1);
        }
    }

    #[test]
    fn test_negative_total_is_clamped() {
        let mut record = sample_record();
        record.total_amount = Decimal::new(-5, 0);
        let doc = DocumentComposer::default().render_bid(&record, render_date()).unwrap();
        assert!(all_strings(&doc.bytes).contains(&"TOTAL BID: $0.00".to_string()));
    }

    #[test]
    fn test_invalid_logo_is_skipped_with_warning() {
        let mut record = sample_record();
        record.logo = Some(b"not an image".to_vec());
        let doc = DocumentComposer::default().render_bid(&record, render_date()).unwrap();
        assert_eq!(doc.warnings.len(), 1);
        assert!(!has_image_xobject(&doc.bytes));
        assert!(all_strings(&doc.bytes).contains(&"TOTAL BID: $12,345.60".to_string()));
    }

    #[test]
    fn test_png_logo_is_embedded() {
        let mut record = sample_record();
        record.logo = Some(sample_png(60, 30));
        let doc = DocumentComposer::default().render_bid(&record, render_date()).unwrap();
        assert!(doc.warnings.is_empty());
        assert!(has_image_xobject(&doc.bytes));
    }

    #[test]
    fn test_dot_bullets_and_custom_divider() {
        let mut style = DocumentStyle::default();
        style.bullet = BulletStyle::Dot;
        style.dividers.exclusions = Some(Rgb(10, 20, 30));
        let composer = DocumentComposer::new(style, Branding::default());
        let doc = composer.render_bid(&sample_record(), render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        // WinAnsi 0x95 is the bullet glyph.
        assert!(strings.contains(&"\u{95} Net 30".to_string()));
        assert!(!strings.contains(&"- Net 30".to_string()));
    }
}
