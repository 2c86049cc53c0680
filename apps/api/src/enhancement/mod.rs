//! Enhancement: templated rewrites of resume snippets.
//!
//! Default: `TemplateEnhancer` (fixed phrase tables plus a random pick, no model call).
//! `AppState` holds an `Arc<dyn Enhancer>`, chosen at startup.

pub mod handlers;
pub mod templates;

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnhanceError {
    #[error("Content cannot be empty")]
    EmptyContent,
}

/// Resume section a snippet belongs to. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Summary,
    Experience,
    Other,
}

impl Section {
    pub fn from_label(label: &str) -> Self {
        match label {
            "summary" => Section::Summary,
            "experience" => Section::Experience,
            _ => Section::Other,
        }
    }
}

/// Rewrites `content` for `section`, drawing randomness from `rng`.
/// Blank content (after trimming) is rejected; the untrimmed text is used otherwise.
pub fn enhance_with_rng<R: Rng + ?Sized>(
    section: &str,
    content: &str,
    rng: &mut R,
) -> Result<String, EnhanceError> {
    if content.trim().is_empty() {
        return Err(EnhanceError::EmptyContent);
    }
    Ok(templates::render(&Section::from_label(section), content, rng))
}

/// The enhancer trait. Implement this to swap backends without touching
/// the endpoint or handler code.
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(&self, section: &str, content: &str) -> Result<String, EnhanceError>;

    /// Short backend name, logged at startup.
    fn backend(&self) -> &'static str;
}

/// Template-based enhancer over the fixed phrase tables.
pub struct TemplateEnhancer {
    rng: Mutex<StdRng>,
}

impl TemplateEnhancer {
    pub fn new() -> Self {
        TemplateEnhancer {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        TemplateEnhancer {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for TemplateEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Enhancer for TemplateEnhancer {
    async fn enhance(&self, section: &str, content: &str) -> Result<String, EnhanceError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        enhance_with_rng(section, content, &mut *rng)
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}
