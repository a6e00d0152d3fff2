//! Serde shapes of the API replies the bot reads. All page queries use
//! `formatversion=2`, where `pages` is an array and flags are booleans.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::StoreError;

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Turns an `{"error": {...}}` reply into [`StoreError::Api`] and decodes
/// anything else as `T`.
pub fn decode<T: serde::de::DeserializeOwned>(mut value: Value) -> Result<T, StoreError> {
    if let Some(error) = value.get_mut("error").map(Value::take) {
        let error: ApiError = serde_json::from_value(error)?;
        return Err(StoreError::Api {
            code: error.code,
            info: error.info,
        });
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse<Q> {
    pub query: Q,
}

#[derive(Debug, Deserialize)]
pub struct TokensQuery {
    pub tokens: Tokens,
}

#[derive(Debug, Deserialize)]
pub struct Tokens {
    pub logintoken: Option<String>,
    pub csrftoken: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub login: LoginResult,
}

#[derive(Debug, Deserialize)]
pub struct LoginResult {
    pub result: String,
    #[serde(default)]
    pub reason: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UserInfoQuery {
    pub userinfo: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub random: Vec<RandomPage>,
}

#[derive(Debug, Deserialize)]
pub struct RandomPage {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub redirect: bool,
    #[serde(default)]
    pub revisions: Vec<Revision>,
    #[serde(default)]
    pub pageprops: Option<PageProps>,
}

impl Page {
    /// Main-slot wikitext of the first returned revision.
    pub fn content(&self) -> Option<&str> {
        self.revisions
            .first()
            .map(|rev| rev.slots.main.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    pub slots: Slots,
}

#[derive(Debug, Deserialize)]
pub struct Slots {
    pub main: Slot,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PageProps {
    pub wikibase_item: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditResponse {
    pub edit: EditResult,
}

#[derive(Debug, Deserialize)]
pub struct EditResult {
    pub result: String,
    /// Set when the submitted text equals the current revision: `true` with
    /// `formatversion=2`, an empty string in the legacy format.
    #[serde(default)]
    pub nochange: Option<Value>,
    #[serde(rename = "newrevid")]
    pub new_revision: Option<u64>,
}

impl EditResult {
    pub fn is_nochange(&self) -> bool {
        self.nochange
            .as_ref()
            .is_some_and(|flag| *flag != Value::Bool(false))
    }
}

#[derive(Debug, Deserialize)]
pub struct ClaimsResponse {
    #[serde(default)]
    pub claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Deserialize)]
pub struct Claim {
    pub mainsnak: Snak,
}

#[derive(Debug, Deserialize)]
pub struct Snak {
    pub datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
pub struct DataValue {
    pub value: Value,
}
