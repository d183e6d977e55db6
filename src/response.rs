use crate::{
    catalog::MenuOption,
    entity::EpisodeRecord,
    error::{CoreError, CoreResult},
};
use serde::Serialize;

pub const MEDIA_ICON_ALT: &str = "RW Logo";
pub const MENU_IMAGE_ALT: &str = "RW Podcast Logo";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    #[serde(rename = "accessibilityText")]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayableMedia {
    pub display_title: String,
    pub audio_url: String,
    pub description: String,
    pub icon: Image,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub option: MenuOption,
    pub title: String,
    pub synonyms: Vec<String>,
    pub description: String,
    pub image: Image,
}

/// Shapes resolved episodes into what the assistant plays or lists.
#[derive(Debug, Clone)]
pub struct PlaybackResponseBuilder {
    brand_icon_url: String,
    media_alt: String,
    menu_alt: String,
}

impl PlaybackResponseBuilder {
    pub fn new(brand_icon_url: &str) -> Self {
        PlaybackResponseBuilder {
            brand_icon_url: brand_icon_url.to_string(),
            media_alt: MEDIA_ICON_ALT.to_string(),
            menu_alt: MENU_IMAGE_ALT.to_string(),
        }
    }

    pub fn with_alt_text(mut self, media_alt: &str, menu_alt: &str) -> Self {
        self.media_alt = media_alt.to_string();
        self.menu_alt = menu_alt.to_string();
        self
    }

    fn image(&self, alt: &str) -> Image {
        Image {
            url: self.brand_icon_url.clone(),
            alt: alt.to_string(),
        }
    }

    pub fn to_playable_media(&self, record: &EpisodeRecord) -> CoreResult<PlayableMedia> {
        let invalid = |reason: String| CoreError::InvalidRecord {
            title: record.title.clone(),
            reason,
        };
        if !record.has_audio() {
            return Err(invalid("missing audio url".to_string()));
        }
        let audio_url = record.audio_url.trim();
        // relative urls fail to parse without a base
        url::Url::parse(audio_url)
            .map_err(|e| invalid(format!("audio url '{}': {}", audio_url, e)))?;

        Ok(PlayableMedia {
            display_title: record.title.clone(),
            audio_url: audio_url.to_string(),
            description: record.description.clone(),
            icon: self.image(&self.media_alt),
        })
    }

    pub fn to_menu_entry(
        &self,
        record: &EpisodeRecord,
        option: MenuOption,
        synonyms: Vec<String>,
    ) -> MenuEntry {
        MenuEntry {
            option,
            title: record.title.clone(),
            synonyms,
            description: record.description.clone(),
            image: self.image(&self.menu_alt),
        }
    }

    /// One entry per menu slot, in feed order. Extra records are ignored.
    pub fn to_menu_list(&self, records: &[EpisodeRecord]) -> Vec<MenuEntry> {
        records
            .iter()
            .zip(MenuOption::ALL.iter())
            .enumerate()
            .map(|(i, (ep, option))| {
                self.to_menu_entry(ep, *option, vec![format!("Podcast {}", i + 1)])
            })
            .collect()
    }
}
