use crate::{
    catalog::EpisodeCatalog,
    client::FeedSource,
    error::{CoreError, CoreResult},
    response::{MenuEntry, PlayableMedia, PlaybackResponseBuilder},
};

pub const FEED_ERROR: &str = "An Error Occurred Parsing the RSS Feed, Try Again Later";
pub const NO_MEDIA: &str = "So sorry, this device does not support media playback!";
pub const GREETING: &str = "Greetings, Learner!";
pub const PLAY_LATEST_PROMPT: &str = "Would you like to play the latest episode?";
pub const HELP: &str =
    "You can say 'play latest episode' or 'play an episode about a subject' such as kotlin or iOS.";
pub const FALLBACK: &str =
    "Sorry, I didn't catch that. You can say 'play latest episode' or 'play an episode about a subject'.";
pub const MENU_TITLE: &str = "Latest Episodes";
pub const SUGGESTIONS: [&str; 3] = ["Latest episode", "Episode about Kotlin", "Episode about iOS"];

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Welcome { screen: bool, audio: bool },
    LatestConfirmation { confirmed: bool },
    EpisodeOption { key: String },
    PlayLatest,
    PlayAbout { subject: String },
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuList {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

/// What one turn says back to the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Turn {
    pub speech: Vec<String>,
    pub media: Option<PlayableMedia>,
    pub list: Option<MenuList>,
    pub confirmation: Option<String>,
    pub suggestions: Vec<String>,
    pub expect_response: bool,
}

impl Turn {
    fn ask(text: &str) -> Self {
        Turn {
            speech: vec![text.to_string()],
            expect_response: true,
            ..Default::default()
        }
    }

    fn close(text: &str) -> Self {
        Turn {
            speech: vec![text.to_string()],
            expect_response: false,
            ..Default::default()
        }
    }

    fn play(intro: &str, media: PlayableMedia) -> Self {
        Turn {
            media: Some(media),
            ..Turn::close(intro)
        }
    }
}

pub struct IntentRouter<S: FeedSource> {
    source: S,
    feed_url: String,
    builder: PlaybackResponseBuilder,
}

impl<S: FeedSource> IntentRouter<S> {
    pub fn new(source: S, feed_url: &str, builder: PlaybackResponseBuilder) -> Self {
        IntentRouter {
            source,
            feed_url: feed_url.to_string(),
            builder,
        }
    }

    /// Every turn fetches its own snapshot. Failures close the conversation.
    pub async fn handle(&self, intent: &Intent) -> Turn {
        log::info!("handling {:?}", intent);
        let result = match intent {
            Intent::Welcome { audio: false, screen: false } => Ok(Turn::close(NO_MEDIA)),
            Intent::Welcome { screen: false, .. } => Ok(Turn {
                confirmation: Some(PLAY_LATEST_PROMPT.to_string()),
                ..Turn::ask(GREETING)
            }),
            Intent::Welcome { .. } => self.menu().await,
            Intent::LatestConfirmation { confirmed: true } | Intent::PlayLatest => {
                self.play_latest().await
            }
            Intent::LatestConfirmation { confirmed: false } => Ok(Turn::ask(HELP)),
            Intent::EpisodeOption { key } => self.play_option(key).await,
            Intent::PlayAbout { subject } => self.play_about(subject).await,
            Intent::Unknown(name) => {
                log::warn!("no handler for intent '{}'", name);
                Ok(Turn::ask(FALLBACK))
            }
        };
        result.unwrap_or_else(|e| {
            log::error!("{:?} failed: {}", intent, e);
            Turn::close(FEED_ERROR)
        })
    }

    async fn catalog(&self) -> CoreResult<EpisodeCatalog> {
        let snapshot = self.source.fetch(&self.feed_url).await?;
        log::debug!("fetched {} episodes from {}", snapshot.len(), self.feed_url);
        Ok(EpisodeCatalog::new(snapshot))
    }

    async fn menu(&self) -> CoreResult<Turn> {
        let catalog = self.catalog().await?;
        let entries = self.builder.to_menu_list(catalog.menu_slice());
        if entries.is_empty() {
            return Err(CoreError::EmptyFeed);
        }
        Ok(Turn {
            list: Some(MenuList {
                title: MENU_TITLE.to_string(),
                entries,
            }),
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            ..Turn::ask("Here are the three latest episodes!")
        })
    }

    async fn play_latest(&self) -> CoreResult<Turn> {
        let catalog = self.catalog().await?;
        let media = self.builder.to_playable_media(catalog.latest()?)?;
        Ok(Turn::play("Here is the latest episode", media))
    }

    async fn play_option(&self, key: &str) -> CoreResult<Turn> {
        let catalog = self.catalog().await?;
        let (option, ep) = catalog.by_option_key(key)?;
        let media = self.builder.to_playable_media(ep)?;
        Ok(Turn::play(&format!("Here is episode {}", option.spoken()), media))
    }

    async fn play_about(&self, subject: &str) -> CoreResult<Turn> {
        let catalog = self.catalog().await?;
        let ep = catalog.by_subject_match(subject)?;
        let media = self.builder.to_playable_media(ep)?;
        Ok(Turn::play(&ep.title, media))
    }
}
