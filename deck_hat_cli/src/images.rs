//! Card image lookup through Scryfall's fuzzy "named card" endpoint.

use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::error::LookupError;

const SCRYFALL_NAMED_URL: &str = "https://api.scryfall.com/cards/named";

#[derive(Debug, Deserialize)]
struct ImageUris {
    normal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CardFace {
    image_uris: Option<ImageUris>,
}

#[derive(Debug, Deserialize)]
struct Card {
    image_uris: Option<ImageUris>,
    #[serde(default)]
    card_faces: Vec<CardFace>,
}

impl Card {
    /// Double-faced cards carry images per face only; the first face with one wins.
    fn normal_image(self) -> Option<String> {
        self.image_uris
            .and_then(|u| u.normal)
            .or_else(|| {
                self.card_faces
                    .into_iter()
                    .find_map(|f| f.image_uris.and_then(|u| u.normal))
            })
    }
}

fn image_from_json(body: &str) -> Option<String> {
    serde_json::from_str::<Card>(body).ok()?.normal_image()
}

pub struct CardImages {
    client: reqwest::blocking::Client,
}

impl CardImages {
    pub fn new() -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("deck_hat_cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    pub fn image_url(&self, deck: &str) -> Result<String, LookupError> {
        let response = self
            .client
            .get(SCRYFALL_NAMED_URL)
            .query(&[("fuzzy", deck)])
            .send()?;
        if !response.status().is_success() {
            return Err(LookupError::NotFound(deck.to_string()));
        }
        let body = response.text()?;
        image_from_json(&body).ok_or_else(|| LookupError::NotFound(deck.to_string()))
    }

    /// Human-readable line for the draw output. Never fails.
    pub fn describe(&self, deck: &str) -> String {
        match self.image_url(deck) {
            Ok(url) => format!("{deck}: {url}"),
            Err(e) => {
                warn!("image lookup for {deck:?} failed: {e}");
                format!("No image found for '{deck}'.")
            }
        }
    }
}
