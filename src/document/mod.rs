//! Document composer: lays out bid proposals and project dossiers as PDF.
//!
//! The composer is stateless apart from its configuration. The render date
//! is always passed in, never read from the clock, so output is
//! reproducible.

pub mod bid;
pub mod canvas;
pub mod dossier;
pub mod format;
pub mod logo;
pub mod metrics;
pub mod pdf;
pub mod style;
pub mod text;
pub mod units;

use thiserror::Error;

use canvas::PageCanvas;
use logo::{LogoImage, StagedLogo};
pub use style::{Branding, DocumentStyle};

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished document plus anything that was skipped along the way.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentComposer {
    style: DocumentStyle,
    branding: Branding,
}

impl DocumentComposer {
    pub fn new(style: DocumentStyle, branding: Branding) -> Self {
        Self { style, branding }
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Shared render pipeline. The logo, if any, is staged to a temp file
    /// that lives until this call returns. A logo that cannot be loaded is
    /// logged, reported as a warning and left out; it never fails the
    /// document.
    fn compose<F>(&self, title: &str, logo: Option<&[u8]>, layout: F) -> Result<RenderedDocument, ComposeError>
    where
        F: FnOnce(&mut PageCanvas<'_>),
    {
        let mut warnings = Vec::new();

        let staged = match logo {
            Some(bytes) => match StagedLogo::stage(bytes) {
                Ok(staged) => Some(staged),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping logo");
                    warnings.push(e.to_string());
                    None
                }
            },
            None => None,
        };
        let image: Option<LogoImage> = staged.as_ref().and_then(|s| match s.load() {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(error = %e, path = %s.path().display(), "Skipping logo");
                warnings.push(e.to_string());
                None
            }
        });

        let mut canvas = PageCanvas::new(&self.style, &self.branding, image.as_ref());
        layout(&mut canvas);
        let page_count = canvas.page_count();
        let pages = canvas.finish();

        let bytes = pdf::assemble(pages, self.style.font, image.as_ref(), title)?;
        drop(staged);

        tracing::debug!(
            title = %title,
            page_count,
            size = bytes.len(),
            logo = image.is_some(),
            "Composed document"
        );

        Ok(RenderedDocument {
            bytes,
            page_count,
            warnings,
        })
    }
}
