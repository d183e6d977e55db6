use crate::model::Item;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct EpisodeRecord {
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub pub_date: String,
    /// 0 is the most recent episode. Assigned by the catalog from feed position.
    pub published_order: usize,
}

impl EpisodeRecord {
    pub fn has_audio(&self) -> bool {
        !self.audio_url.trim().is_empty()
    }
}

impl From<Item> for EpisodeRecord {
    fn from(item: Item) -> Self {
        EpisodeRecord {
            title: item.title.trim().to_string(),
            description: item.description.trim().to_string(),
            audio_url: item.enclosure.url.trim().to_string(),
            pub_date: item.pub_date,
            published_order: 0,
        }
    }
}
