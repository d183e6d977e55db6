use crate::{
    client::FeedSnapshot,
    entity::EpisodeRecord,
    error::{CoreError, CoreResult},
};

/// Slots of the "latest episodes" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    First,
    Second,
    Third,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::First, MenuOption::Second, MenuOption::Third];

    pub fn ordinal(self) -> usize {
        match self {
            MenuOption::First => 0,
            MenuOption::Second => 1,
            MenuOption::Third => 2,
        }
    }

    pub fn from_ordinal(n: usize) -> Option<Self> {
        MenuOption::ALL.get(n).copied()
    }

    /// Key the option is sent back with when the user picks it.
    pub fn key(self) -> &'static str {
        match self {
            MenuOption::First => "episode_one",
            MenuOption::Second => "episode_two",
            MenuOption::Third => "episode_three",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        MenuOption::ALL.iter().copied().find(|o| o.key() == key)
    }

    pub fn spoken(self) -> &'static str {
        match self {
            MenuOption::First => "one",
            MenuOption::Second => "two",
            MenuOption::Third => "three",
        }
    }
}

/// One fetched feed, held for the length of a single turn.
#[derive(Debug, Clone, Default)]
pub struct EpisodeCatalog {
    episodes: FeedSnapshot,
}

impl EpisodeCatalog {
    pub fn new(snapshot: FeedSnapshot) -> Self {
        let episodes = snapshot
            .into_iter()
            .enumerate()
            .map(|(i, mut ep)| {
                ep.published_order = i;
                if !ep.has_audio() {
                    log::warn!("episode {} '{}' has no audio url", i, ep.title);
                }
                ep
            })
            .collect::<Vec<EpisodeRecord>>();
        EpisodeCatalog { episodes }
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn by_ordinal(&self, n: usize) -> CoreResult<&EpisodeRecord> {
        self.episodes.get(n).ok_or(CoreError::NotFound {
            ordinal: n,
            len: self.episodes.len(),
        })
    }

    pub fn latest(&self) -> CoreResult<&EpisodeRecord> {
        self.episodes.first().ok_or(CoreError::EmptyFeed)
    }

    /// Position-based: if the feed moved on since the menu was shown, the
    /// slot now points at whatever sits there. Missing slots play the latest.
    pub fn by_menu_option(&self, option: MenuOption) -> CoreResult<&EpisodeRecord> {
        match self.by_ordinal(option.ordinal()) {
            Ok(ep) => Ok(ep),
            Err(_) => {
                log::debug!("menu option {:?} out of range, using latest", option);
                self.latest()
            }
        }
    }

    /// Unknown keys resolve to the latest episode.
    pub fn by_option_key(&self, key: &str) -> CoreResult<(MenuOption, &EpisodeRecord)> {
        let option = MenuOption::from_key(key).unwrap_or_else(|| {
            log::debug!("unknown menu option '{}', using latest", key);
            MenuOption::First
        });
        let ep = self.by_menu_option(option)?;
        Ok((MenuOption::from_ordinal(ep.published_order).unwrap_or(MenuOption::First), ep))
    }

    /// First title, in feed order, containing `subject` (case-insensitive).
    /// Falls back to the latest episode for an empty or unmatched subject.
    pub fn by_subject_match(&self, subject: &str) -> CoreResult<&EpisodeRecord> {
        let latest = self.latest()?;
        if subject.is_empty() {
            return Ok(latest);
        }
        let needle = subject.to_uppercase();
        match self
            .episodes
            .iter()
            .find(|ep| ep.title.to_uppercase().contains(&needle))
        {
            Some(ep) => Ok(ep),
            None => {
                log::info!(
                    "no episode about '{}', using latest '{}' ({})",
                    subject,
                    latest.title,
                    latest.pub_date
                );
                Ok(latest)
            }
        }
    }

    /// The episodes a menu is built from: up to three, most recent first.
    pub fn menu_slice(&self) -> &[EpisodeRecord] {
        let n = self.episodes.len().min(MenuOption::ALL.len());
        &self.episodes[..n]
    }
}
