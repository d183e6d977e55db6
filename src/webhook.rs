//! Dialogflow fulfillment request and Actions on Google response payloads.
//!
//! Only the fields the router reads or writes are modelled; everything else
//! in the request is ignored.

use crate::{
    response::{Image, PlayableMedia},
    router::{Intent, MenuList, Turn},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

pub const CAP_SCREEN: &str = "actions.capability.SCREEN_OUTPUT";
pub const CAP_AUDIO: &str = "actions.capability.MEDIA_RESPONSE_AUDIO";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub response_id: String,
    pub query_result: QueryResult,
    #[serde(default)]
    pub original_detect_intent_request: OriginalRequest,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    pub intent: IntentInfo,
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct IntentInfo {
    pub display_name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OriginalRequest {
    pub source: String,
    pub payload: Payload,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Payload {
    pub surface: Surface,
    pub inputs: Vec<Input>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Surface {
    pub capabilities: Vec<Capability>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Capability {
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Input {
    pub intent: String,
    pub arguments: Vec<Argument>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Argument {
    pub name: String,
    pub text_value: Option<String>,
    pub bool_value: Option<bool>,
}

impl WebhookRequest {
    fn has_capability(&self, name: &str) -> bool {
        self.original_detect_intent_request
            .payload
            .surface
            .capabilities
            .iter()
            .any(|c| c.name == name)
    }

    fn argument(&self, name: &str) -> Option<&Argument> {
        self.original_detect_intent_request
            .payload
            .inputs
            .iter()
            .flat_map(|i| i.arguments.iter())
            .find(|a| a.name == name)
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.query_result.parameters.get(name).and_then(Value::as_str)
    }

    pub fn intent(&self) -> Intent {
        match self.query_result.intent.display_name.as_str() {
            "Welcome Intent" => Intent::Welcome {
                screen: self.has_capability(CAP_SCREEN),
                audio: self.has_capability(CAP_AUDIO),
            },
            "play_latest_episode_confirmation" => Intent::LatestConfirmation {
                confirmed: self
                    .argument("CONFIRMATION")
                    .and_then(|a| a.bool_value)
                    .unwrap_or(false),
            },
            "get_episode_option" => Intent::EpisodeOption {
                key: self
                    .argument("OPTION")
                    .and_then(|a| a.text_value.as_deref())
                    .or_else(|| self.parameter("OPTION"))
                    .unwrap_or_default()
                    .to_string(),
            },
            "play_the_latest_episode" => Intent::PlayLatest,
            "play_an_episode_about" => Intent::PlayAbout {
                subject: self.parameter("Subject").unwrap_or_default().to_string(),
            },
            other => Intent::Unknown(other.to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct WebhookResponse {
    pub payload: ResponsePayload,
}

#[derive(Serialize, Debug)]
pub struct ResponsePayload {
    pub google: GooglePayload,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayload {
    pub expect_user_response: bool,
    pub rich_response: RichResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_intent: Option<SystemIntent>,
}

#[derive(Serialize, Debug)]
pub struct RichResponse {
    pub items: Vec<RichItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum RichItem {
    SimpleResponse(SimpleResponse),
    MediaResponse(MediaResponse),
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub media_type: String,
    pub media_objects: Vec<MediaObject>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MediaObject {
    pub name: String,
    pub description: String,
    pub content_url: String,
    pub icon: Image,
}

#[derive(Serialize, Debug)]
pub struct Suggestion {
    pub title: String,
}

#[derive(Serialize, Debug)]
pub struct SystemIntent {
    pub intent: String,
    pub data: Value,
}

impl From<PlayableMedia> for MediaResponse {
    fn from(media: PlayableMedia) -> Self {
        MediaResponse {
            media_type: "AUDIO".to_string(),
            media_objects: vec![MediaObject {
                name: media.display_title,
                description: media.description,
                content_url: media.audio_url,
                icon: media.icon,
            }],
        }
    }
}

fn list_intent(list: MenuList) -> SystemIntent {
    let items = list
        .entries
        .into_iter()
        .map(|e| {
            json!({
                "optionInfo": { "key": e.option.key(), "synonyms": e.synonyms },
                "title": e.title,
                "description": e.description,
                "image": e.image,
            })
        })
        .collect::<Vec<Value>>();
    SystemIntent {
        intent: "actions.intent.OPTION".to_string(),
        data: json!({
            "@type": "type.googleapis.com/google.actions.v2.OptionValueSpec",
            "listSelect": { "title": list.title, "items": items },
        }),
    }
}

fn confirmation_intent(prompt: String) -> SystemIntent {
    SystemIntent {
        intent: "actions.intent.CONFIRMATION".to_string(),
        data: json!({
            "@type": "type.googleapis.com/google.actions.v2.ConfirmationValueSpec",
            "dialogSpec": { "requestConfirmationText": prompt },
        }),
    }
}

impl From<Turn> for WebhookResponse {
    fn from(turn: Turn) -> Self {
        let mut items = turn
            .speech
            .into_iter()
            .map(|text_to_speech| RichItem::SimpleResponse(SimpleResponse { text_to_speech }))
            .collect::<Vec<RichItem>>();
        if let Some(media) = turn.media {
            items.push(RichItem::MediaResponse(media.into()));
        }
        // a list wins over a confirmation; the router never asks for both
        let system_intent = turn
            .list
            .map(list_intent)
            .or_else(|| turn.confirmation.map(confirmation_intent));

        WebhookResponse {
            payload: ResponsePayload {
                google: GooglePayload {
                    expect_user_response: turn.expect_response,
                    rich_response: RichResponse {
                        items,
                        suggestions: turn
                            .suggestions
                            .into_iter()
                            .map(|title| Suggestion { title })
                            .collect(),
                    },
                    system_intent,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{tests::episodes, MenuOption};
    use crate::response::PlaybackResponseBuilder;

    fn request(v: Value) -> WebhookRequest {
        serde_json::from_value(v).expect("bad request json")
    }

    #[test]
    fn welcome_capabilities() {
        let req = request(json!({
            "responseId": "abc",
            "queryResult": { "queryText": "talk to my podcast", "intent": { "displayName": "Welcome Intent" } },
            "originalDetectIntentRequest": {
                "source": "google",
                "payload": {
                    "surface": { "capabilities": [
                        { "name": "actions.capability.AUDIO_OUTPUT" },
                        { "name": "actions.capability.MEDIA_RESPONSE_AUDIO" }
                    ] }
                }
            }
        }));
        assert_eq!(req.intent(), Intent::Welcome { screen: false, audio: true });
    }

    #[test]
    fn capability_without_name() {
        let req = request(json!({
            "queryResult": { "intent": { "displayName": "Welcome Intent" } },
            "originalDetectIntentRequest": { "payload": { "surface": { "capabilities": [
                {},
                { "name": "actions.capability.SCREEN_OUTPUT" }
            ] } } }
        }));
        assert_eq!(req.intent(), Intent::Welcome { screen: true, audio: false });
    }

    #[test]
    fn option_and_confirmation_arguments() {
        let req = request(json!({
            "queryResult": { "intent": { "displayName": "get_episode_option" } },
            "originalDetectIntentRequest": { "payload": { "inputs": [
                { "intent": "actions.intent.OPTION",
                  "arguments": [ { "name": "OPTION", "textValue": "episode_two" } ] }
            ] } }
        }));
        assert_eq!(
            req.intent(),
            Intent::EpisodeOption {
                key: "episode_two".to_string()
            }
        );

        let req = request(json!({
            "queryResult": { "intent": { "displayName": "play_latest_episode_confirmation" } },
            "originalDetectIntentRequest": { "payload": { "inputs": [
                { "arguments": [ { "name": "CONFIRMATION", "boolValue": true } ] }
            ] } }
        }));
        assert_eq!(req.intent(), Intent::LatestConfirmation { confirmed: true });
    }

    #[test]
    fn subject_parameter() {
        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "play_an_episode_about" },
                "parameters": { "Subject": "kotlin" }
            }
        }));
        assert_eq!(
            req.intent(),
            Intent::PlayAbout {
                subject: "kotlin".to_string()
            }
        );
        let req = request(json!({
            "queryResult": { "intent": { "displayName": "Default Fallback Intent" } }
        }));
        assert_eq!(req.intent(), Intent::Unknown("Default Fallback Intent".to_string()));
    }

    #[test]
    fn media_turn_json() {
        let eps = episodes(&["Kotlin Basics"]);
        let media = PlaybackResponseBuilder::new("https://cdn.example.com/logo.png")
            .to_playable_media(&eps[0])
            .unwrap();
        let turn = Turn {
            speech: vec!["Here is the latest episode".to_string()],
            media: Some(media),
            ..Default::default()
        };
        let v = serde_json::to_value(WebhookResponse::from(turn)).unwrap();
        let google = &v["payload"]["google"];
        assert_eq!(google["expectUserResponse"], json!(false));
        let items = &google["richResponse"]["items"];
        assert_eq!(
            items[0]["simpleResponse"]["textToSpeech"],
            json!("Here is the latest episode")
        );
        let obj = &items[1]["mediaResponse"]["mediaObjects"][0];
        assert_eq!(obj["name"], json!("Kotlin Basics"));
        assert_eq!(obj["contentUrl"], json!("https://cdn.example.com/0.mp3"));
        assert_eq!(obj["icon"]["accessibilityText"], json!("RW Logo"));
        assert!(google.get("systemIntent").is_none());
        assert!(google["richResponse"].get("suggestions").is_none());
    }

    #[test]
    fn list_turn_json() {
        let builder = PlaybackResponseBuilder::new("https://cdn.example.com/logo.png");
        let turn = Turn {
            speech: vec!["Here are the three latest episodes!".to_string()],
            list: Some(MenuList {
                title: "Latest Episodes".to_string(),
                entries: builder.to_menu_list(&episodes(&["a", "b", "c", "d"])),
            }),
            suggestions: vec!["Latest episode".to_string()],
            expect_response: true,
            ..Default::default()
        };
        let v = serde_json::to_value(WebhookResponse::from(turn)).unwrap();
        let google = &v["payload"]["google"];
        assert_eq!(google["systemIntent"]["intent"], json!("actions.intent.OPTION"));
        let items = &google["systemIntent"]["data"]["listSelect"]["items"];
        assert_eq!(items.as_array().map(|a| a.len()), Some(3));
        assert_eq!(items[2]["optionInfo"]["key"], json!(MenuOption::Third.key()));
        assert_eq!(items[2]["optionInfo"]["synonyms"], json!(["Podcast 3"]));
        assert_eq!(
            google["richResponse"]["suggestions"][0]["title"],
            json!("Latest episode")
        );
    }

    #[test]
    fn confirmation_turn_json() {
        let turn = Turn {
            speech: vec!["Greetings, Learner!".to_string()],
            confirmation: Some("Would you like to play the latest episode?".to_string()),
            expect_response: true,
            ..Default::default()
        };
        let v = serde_json::to_value(WebhookResponse::from(turn)).unwrap();
        let si = &v["payload"]["google"]["systemIntent"];
        assert_eq!(si["intent"], json!("actions.intent.CONFIRMATION"));
        assert_eq!(
            si["data"]["dialogSpec"]["requestConfirmationText"],
            json!("Would you like to play the latest episode?")
        );
    }
}
