use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde_json::json;

use crate::store::remote::{DocumentStore, StoreError};
use crate::store::schema::{UserDocument, WordSlot};

/// `DocumentStore` over a small JSON document API:
/// `GET/PATCH {base}/users/{id}` (whole-document creating merge) and
/// `PATCH {base}/users/{id}/vocabulary/{word}` / `.../settings` (targeted).
/// A 404 on a targeted PATCH means the parent document is missing.
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn user_url(&self, user: &str) -> String {
        format!("{}/users/{user}", self.base_url)
    }

    fn classify(response: Response, path: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::MissingPath(path.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Denied(path.to_string()))
            }
            _ => Err(StoreError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            }),
        }
    }

    fn patch(&self, url: &str, path: &str, body: serde_json::Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(url)
            .json(&body)
            .send()
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;
        Self::classify(response, path).map(|_| ())
    }
}

impl DocumentStore for HttpStore {
    fn load_document(&self, user: &str) -> Result<Option<UserDocument>, StoreError> {
        let url = self.user_url(user);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        // A missing document is an empty state, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::classify(response, &format!("users/{user}"))?;
        let doc = response
            .json::<UserDocument>()
            .map_err(|e| StoreError::Encoding(e.to_string()))?;
        Ok(Some(doc))
    }

    fn write_word_slot(&self, user: &str, word: &str, slot: WordSlot) -> Result<(), StoreError> {
        let url = format!("{}/vocabulary/{word}", self.user_url(user));
        self.patch(
            &url,
            &format!("users/{user}/vocabulary/{word}"),
            json!({ "s": slot.s, "f": slot.f }),
        )
    }

    fn create_with_word_slot(
        &self,
        user: &str,
        word: &str,
        slot: WordSlot,
    ) -> Result<(), StoreError> {
        self.patch(
            &self.user_url(user),
            &format!("users/{user}"),
            json!({ "vocabulary": { word: { "s": slot.s, "f": slot.f } } }),
        )
    }

    fn write_theme_setting(&self, user: &str, theme_index: usize) -> Result<(), StoreError> {
        let url = format!("{}/settings", self.user_url(user));
        self.patch(
            &url,
            &format!("users/{user}/settings"),
            json!({ "theme_index": theme_index }),
        )
    }

    fn create_with_theme_setting(&self, user: &str, theme_index: usize) -> Result<(), StoreError> {
        self.patch(
            &self.user_url(user),
            &format!("users/{user}"),
            json!({ "settings": { "theme_index": theme_index } }),
        )
    }
}
