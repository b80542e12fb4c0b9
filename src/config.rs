use anyhow::{anyhow, Context, Result};
use std::env;

use crate::document::metrics::FontFamily;
use crate::document::style::{BulletStyle, Rgb};
use crate::document::{Branding, DocumentStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Uploads
    pub max_upload_bytes: usize,

    // Estimator
    pub estimate_session_ttl_seconds: u64,

    // Documents
    pub document_style: DocumentStyle,
    pub branding: Branding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 5 * 1024 * 1024, // 5 MiB
            estimate_session_ttl_seconds: 3600, // 1 hour
            document_style: DocumentStyle::default(),
            branding: Branding::default(),
        }
    }
}

fn parse_divider(key: &str, value: Option<String>, default: Option<Rgb>) -> Result<Option<Rgb>> {
    let Some(value) = value else {
        return Ok(default);
    };
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Rgb::parse_hex(&value)
        .map(Some)
        .ok_or_else(|| anyhow!("{key} must be #RRGGBB or 'none', got '{value}'"))
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or(defaults.server_addr);

        // CORS
        let cors_allow_origins = match lookup("CORS_ALLOW_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_allow_origins,
        };

        // Uploads
        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => v.trim().parse().context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => defaults.max_upload_bytes,
        };

        // Estimator
        let estimate_session_ttl_seconds = match lookup("ESTIMATE_SESSION_TTL_SECONDS") {
            Some(v) => v
                .trim()
                .parse()
                .context("ESTIMATE_SESSION_TTL_SECONDS must be a number of seconds")?,
            None => defaults.estimate_session_ttl_seconds,
        };

        // Documents
        let style_defaults = defaults.document_style;
        let font = match lookup("DOCUMENT_FONT") {
            Some(v) => v.parse::<FontFamily>().map_err(|e| anyhow!("DOCUMENT_FONT: {e}"))?,
            None => style_defaults.font,
        };
        let bullet = match lookup("DOCUMENT_BULLET") {
            Some(v) => v.parse::<BulletStyle>().map_err(|e| anyhow!("DOCUMENT_BULLET: {e}"))?,
            None => style_defaults.bullet,
        };
        let palette = style_defaults.dividers;
        let mut dividers = palette.clone();
        dividers.plumbing = parse_divider(
            "DIVIDER_COLOR_PLUMBING",
            lookup("DIVIDER_COLOR_PLUMBING"),
            palette.plumbing,
        )?;
        dividers.gas = parse_divider("DIVIDER_COLOR_GAS", lookup("DIVIDER_COLOR_GAS"), palette.gas)?;
        dividers.inclusions = parse_divider(
            "DIVIDER_COLOR_INCLUSIONS",
            lookup("DIVIDER_COLOR_INCLUSIONS"),
            palette.inclusions,
        )?;
        dividers.exclusions = parse_divider(
            "DIVIDER_COLOR_EXCLUSIONS",
            lookup("DIVIDER_COLOR_EXCLUSIONS"),
            palette.exclusions,
        )?;
        dividers.terms =
            parse_divider("DIVIDER_COLOR_TERMS", lookup("DIVIDER_COLOR_TERMS"), palette.terms)?;

        let brand = defaults.branding;
        let branding = Branding {
            company_name: lookup("COMPANY_NAME").unwrap_or(brand.company_name),
            address: lookup("COMPANY_ADDRESS").unwrap_or(brand.address),
            email: lookup("COMPANY_EMAIL").unwrap_or(brand.email),
            phone: lookup("COMPANY_PHONE").unwrap_or(brand.phone),
            tagline: lookup("COMPANY_TAGLINE").unwrap_or(brand.tagline),
            signoff: lookup("COMPANY_SIGNOFF").unwrap_or(brand.signoff),
            signer_name: lookup("SIGNER_NAME").unwrap_or(brand.signer_name),
            signer_title: lookup("SIGNER_TITLE").unwrap_or(brand.signer_title),
        };

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            max_upload_bytes,
            estimate_session_ttl_seconds,
            document_style: DocumentStyle {
                font,
                bullet,
                dividers,
            },
            branding,
        })
    }
}
