//! Gallery view model.
//!
//! Pure mapping from a [`SessionSnapshot`] to what a view renders: one card
//! per catalog entry, zoom only when an image exists, and a download link
//! with a filesystem-safe name.

use crate::catalog::{AdFormatSpec, Catalog};
use crate::session::{GenerationResult, GenerationStatus, SessionSnapshot};
use crate::types::{EncodedImage, FormatId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardState {
    Idle,
    Loading,
    Failed { message: String },
    Ready { image: EncodedImage },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub filename: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryCard {
    pub format_id: FormatId,
    pub label: String,
    pub state: CardState,
}

impl GalleryCard {
    fn new(format: &AdFormatSpec, result: Option<&GenerationResult>) -> Self {
        let state = match result {
            None => CardState::Idle,
            Some(result) => match (result.status, &result.image) {
                (GenerationStatus::Idle, _) => CardState::Idle,
                (GenerationStatus::Pending, _) => CardState::Loading,
                (GenerationStatus::Succeeded, Some(image)) => CardState::Ready {
                    image: image.clone(),
                },
                (GenerationStatus::Succeeded, None) | (GenerationStatus::Failed, _) => {
                    CardState::Failed {
                        message: result
                            .error
                            .clone()
                            .unwrap_or_else(|| crate::error::FALLBACK_GENERATION_MESSAGE.to_string()),
                    }
                }
            },
        };
        Self {
            format_id: format.id,
            label: format.label.clone(),
            state,
        }
    }

    pub fn can_zoom(&self) -> bool {
        matches!(self.state, CardState::Ready { .. })
    }

    pub fn download(&self) -> Option<DownloadLink> {
        match &self.state {
            CardState::Ready { image } => Some(DownloadLink {
                filename: download_filename(&self.label, &image.media_type),
                href: image.to_data_uri(),
            }),
            _ => None,
        }
    }
}

/// Zoomed view of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoomView {
    pub format_id: FormatId,
    pub title: String,
    pub src: String,
}

/// Everything a view needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub banner: Option<String>,
    pub product: Option<EncodedImage>,
    pub visible: bool,
    pub cards: Vec<GalleryCard>,
}

impl GalleryView {
    /// Cards are in catalog order; their position never depends on completion order.
    pub fn build(catalog: &Catalog, snapshot: &SessionSnapshot) -> Self {
        let cards = catalog
            .iter()
            .map(|format| GalleryCard::new(format, snapshot.result(format.id)))
            .collect();
        Self {
            banner: snapshot.global_error.clone(),
            product: snapshot.image.clone(),
            visible: gallery_visible(snapshot),
            cards,
        }
    }

    pub fn card(&self, format_id: FormatId) -> Option<&GalleryCard> {
        self.cards.iter().find(|c| c.format_id == format_id)
    }

    /// Zoom is only offered for cards that hold an image.
    pub fn zoom(&self, format_id: FormatId) -> Option<ZoomView> {
        let card = self.card(format_id)?;
        match &card.state {
            CardState::Ready { image } => Some(ZoomView {
                format_id,
                title: card.label.clone(),
                src: image.to_data_uri(),
            }),
            _ => None,
        }
    }
}

/// Shown while generating, or once an image is active and some card left Idle.
/// Hidden for an attempt that ended in a session-level error.
pub fn gallery_visible(snapshot: &SessionSnapshot) -> bool {
    if snapshot.global_error.is_some() && !snapshot.in_flight {
        return false;
    }
    snapshot.in_flight
        || (snapshot.image.is_some()
            && snapshot
                .results
                .iter()
                .any(|r| r.status != GenerationStatus::Idle))
}

/// `Times Square Billboard` + `image/png` -> `times_square_billboard.png`
pub fn download_filename(label: &str, media_type: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", stem, extension_for(media_type))
}

fn extension_for(media_type: &str) -> String {
    let subtype = media_type
        .split(';')
        .next()
        .and_then(|essence| essence.split('/').nth(1))
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "png".to_string());
    match subtype.as_str() {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        _ => subtype,
    }
}
