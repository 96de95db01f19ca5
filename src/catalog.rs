//! Format Catalog
//!
//! Ordered, immutable list of ad scenarios the product photo is composited into.
//! The built-in catalog has ten entries; nothing downstream depends on that count.

use crate::error::AppError;
use crate::types::FormatId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ad scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdFormatSpec {
    pub id: FormatId,
    pub label: String,
    pub prompt: String,
}

impl AdFormatSpec {
    pub fn new(id: FormatId, label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

/// Validated, ordered set of formats with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    formats: Vec<AdFormatSpec>,
}

impl Catalog {
    pub fn new(formats: Vec<AdFormatSpec>) -> Result<Self, AppError> {
        if formats.is_empty() {
            return Err(AppError::Config(
                "Catalog must contain at least one format".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for format in &formats {
            if !seen.insert(format.id) {
                return Err(AppError::Config(format!(
                    "Duplicate format id {} in catalog",
                    format.id
                )));
            }
            if format.prompt.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "Format {} ({}) has an empty prompt",
                    format.id, format.label
                )));
            }
        }
        Ok(Self { formats })
    }

    /// The ten stock scenarios.
    pub fn builtin() -> Self {
        Self {
            formats: builtin_formats(),
        }
    }

    pub fn formats(&self) -> &[AdFormatSpec] {
        &self.formats
    }

    pub fn get(&self, id: FormatId) -> Option<&AdFormatSpec> {
        self.formats.iter().find(|f| f.id == id)
    }

    pub fn ids(&self) -> Vec<FormatId> {
        self.formats.iter().map(|f| f.id).collect()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AdFormatSpec> {
        self.formats.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a AdFormatSpec;
    type IntoIter = std::slice::Iter<'a, AdFormatSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.formats.iter()
    }
}

fn builtin_formats() -> Vec<AdFormatSpec> {
    vec![
        AdFormatSpec::new(
            1,
            "Times Square Billboard",
            "Place the product from the uploaded image onto a massive, glowing digital billboard in Times Square, New York, at night. The scene should be vibrant, crowded, and full of energy, with realistic lighting effects on the product.",
        ),
        AdFormatSpec::new(
            2,
            "Luxury Magazine Ad",
            "Create a full-page ad for a high-end luxury lifestyle magazine featuring the product from the uploaded image. The style should be elegant and minimalist, with sophisticated typography and a clean, muted background.",
        ),
        AdFormatSpec::new(
            3,
            "Urban Bus Stop",
            "Integrate the product from the uploaded image into a poster ad at a modern, glass-paneled bus stop on a rainy city street. The reflections of city lights on the wet glass and pavement should be visible.",
        ),
        AdFormatSpec::new(
            4,
            "Cozy Coffee Shop",
            "Place the product from the uploaded image naturally on a rustic wooden table inside a cozy, warm coffee shop. A steaming latte in a ceramic mug and an open book should be next to it, creating a relaxed atmosphere.",
        ),
        AdFormatSpec::new(
            5,
            "Social Media Flat Lay",
            "Generate an aesthetic social media post from a top-down perspective (flat lay). The product from the uploaded image should be the centerpiece, surrounded by complementary items like flowers, a camera, and a notebook on a clean background.",
        ),
        AdFormatSpec::new(
            6,
            "Subway Train Interior",
            "Create an advertisement featuring the product from the uploaded image placed on a poster inside a brightly lit, clean subway car. The ad should be above the windows where real subway ads are typically located.",
        ),
        AdFormatSpec::new(
            7,
            "Vintage Newspaper Ad",
            "Design a vintage, black-and-white newspaper advertisement for the product in the uploaded image. The style should be reminiscent of the 1950s, with classic serif fonts and a slightly aged, textured paper background.",
        ),
        AdFormatSpec::new(
            8,
            "In-Store Retail Display",
            "Showcase the product from the uploaded image on a premium, well-lit retail display shelf inside a modern, high-end concept store. The product should look enticing and be the clear focus.",
        ),
        AdFormatSpec::new(
            9,
            "Art Gallery Exhibit",
            "Present the product from the uploaded image as if it were a modern art piece in a minimalist, white-walled art gallery. It should be placed on a sleek white pedestal and illuminated by a spotlight.",
        ),
        AdFormatSpec::new(
            10,
            "Mountain Peak Summit",
            "Place the product from the uploaded image on a rock at the summit of a majestic, snow-capped mountain at sunrise. The scene should feel adventurous and inspiring, with golden light hitting the peaks.",
        ),
    ]
}
