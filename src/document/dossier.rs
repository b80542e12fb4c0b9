//! Project dossier layout: a one-glance summary of the job for the field crew.

use chrono::NaiveDate;

use super::canvas::{Section, BODY_SIZE_PT, SECTION_GAP_MM, TITLE_LINE_MM};
use super::format::format_long_date;
use super::metrics::FontFace;
use super::style::BulletStyle;
use super::{ComposeError, DocumentComposer, RenderedDocument};
use crate::domain::DossierRecord;

pub const DOSSIER_TITLE: &str = "PROJECT DOSSIER";
const TITLE_SIZE_PT: f32 = 14.0;
const NO_FIXTURES: &str = "No fixtures listed";

impl DocumentComposer {
    pub fn render_dossier(
        &self,
        record: &DossierRecord,
        render_date: NaiveDate,
    ) -> Result<RenderedDocument, ComposeError> {
        let today = format_long_date(render_date);
        let bullet = self.style().bullet;
        let dividers = &self.style().dividers;

        let mut fixture_lines = Vec::with_capacity(record.fixtures.len() + 1);
        if record.fixtures.is_empty() {
            fixture_lines.push(NO_FIXTURES.to_string());
        } else {
            fixture_lines.push(format!("Total fixtures: {}", record.fixtures.len()));
            fixture_lines.extend(record.fixtures.iter().map(|fixture| format!("  {fixture}")));
        }

        let title = format!("Project Dossier - {}", record.project_name);
        tracing::info!(
            project_name = %record.project_name,
            fixtures = record.fixtures.len(),
            contact = record.contact.is_some(),
            "Rendering dossier"
        );

        self.compose(&title, record.logo.as_deref(), |canvas| {
            canvas.cell(DOSSIER_TITLE, FontFace::Bold, TITLE_SIZE_PT, TITLE_LINE_MM);
            for line in [
                format!("Date: {today}"),
                format!("Project: {}", record.project_name),
                format!("Location: {}", record.location),
                format!("Client: {}", record.client_name),
            ] {
                canvas.cell(&line, FontFace::Bold, BODY_SIZE_PT, TITLE_LINE_MM);
            }
            canvas.line_break(SECTION_GAP_MM);

            canvas.section(&Section {
                title: "FIXTURE SUMMARY",
                lines: fixture_lines,
                bullet,
                divider: dividers.plumbing,
            });

            if let Some(contact) = &record.contact {
                canvas.section(&Section {
                    title: "PROJECT CONTACT",
                    lines: vec![
                        format!("Name: {}", contact.name),
                        format!("Role: {}", contact.role),
                        format!("Phone: {}", contact.phone),
                        format!("Email: {}", contact.email),
                    ],
                    bullet: BulletStyle::None,
                    divider: dividers.inclusions,
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::logo::tests::sample_png;
    use crate::document::testing::{all_strings, has_image_xobject};
    use crate::domain::Contact;

    fn render_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 6).unwrap()
    }

    fn sample_record() -> DossierRecord {
        DossierRecord {
            project_name: "Cedar Hills Duplex".to_string(),
            location: "Cedar Hills, UT".to_string(),
            client_name: "Wasatch Homes".to_string(),
            fixtures: vec!["Kitchen sink".to_string(), "Tub/shower".to_string()],
            contact: Some(Contact {
                name: "Dana Reyes".to_string(),
                role: "Superintendent".to_string(),
                phone: "801-555-0100".to_string(),
                email: "dana@example.com".to_string(),
            }),
            logo: None,
        }
    }

    #[test]
    fn test_render_dossier_contents() {
        let doc = DocumentComposer::default()
            .render_dossier(&sample_record(), render_date())
            .unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        let strings = all_strings(&doc.bytes);
        for needle in [
            "PROJECT DOSSIER",
            "Date: October 6, 2026",
            "Client: Wasatch Homes",
            "FIXTURE SUMMARY:",
            "- Total fixtures: 2",
            "  - Tub/shower",
            "PROJECT CONTACT:",
            "Role: Superintendent",
            "Email: dana@example.com",
        ] {
            assert!(strings.contains(&needle.to_string()), "missing {needle:?} in {strings:?}");
        }
    }

    #[test]
    fn test_dossier_without_fixtures_or_contact() {
        let mut record = sample_record();
        record.fixtures.clear();
        record.contact = None;
        let doc = DocumentComposer::default().render_dossier(&record, render_date()).unwrap();
        let strings = all_strings(&doc.bytes);
        assert!(strings.contains(&"- No fixtures listed".to_string()));
        assert!(!strings.contains(&"PROJECT CONTACT:".to_string()));
    }

    #[test]
    fn test_dossier_is_deterministic_and_takes_logo() {
        let mut record = sample_record();
        record.logo = Some(sample_png(20, 20));
        let composer = DocumentComposer::default();
        let first = composer.render_dossier(&record, render_date()).unwrap();
        let second = composer.render_dossier(&record, render_date()).unwrap();
        assert_eq!(first.bytes, second.bytes);
        assert!(has_image_xobject(&first.bytes));
    }
}
