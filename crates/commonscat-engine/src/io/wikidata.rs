use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

use super::responses::{ClaimsResponse, decode};
use super::{StoreError, WikiClient};

/// The "Commons category" property.
pub const COMMONS_CATEGORY_PROPERTY: &str = "P373";

pub struct WikidataClient {
    http: Client,
    api_url: String,
}

impl WikidataClient {
    pub fn new(api_url: impl Into<String>, user_agent: &str) -> Result<Self, StoreError> {
        Ok(Self {
            http: Client::builder().user_agent(user_agent).build()?,
            api_url: api_url.into(),
        })
    }

    /// First P373 claim value of an item.
    pub fn commons_category(&self, item: &str) -> Result<Option<String>, StoreError> {
        let reply: Value = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "wbgetclaims"),
                ("entity", item),
                ("property", COMMONS_CATEGORY_PROPERTY),
                ("format", "json"),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(first_string_claim(decode(reply)?, COMMONS_CATEGORY_PROPERTY))
    }
}

fn first_string_claim(claims: ClaimsResponse, property: &str) -> Option<String> {
    claims
        .claims
        .get(property)?
        .first()?
        .mainsnak
        .datavalue
        .as_ref()?
        .value
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolves an article title to its Commons category: page props on the
/// wiki give the Wikidata item, whose P373 claim holds the category.
pub struct CommonsCategoryLookup<'a> {
    pub wiki: &'a WikiClient,
    pub wikidata: &'a WikidataClient,
}

impl CommonsCategoryLookup<'_> {
    pub fn lookup(&self, title: &str) -> Result<Option<String>, StoreError> {
        let Some(item) = self.wiki.wikibase_item(title)? else {
            debug!("{title} has no Wikidata item");
            return Ok(None);
        };
        self.wikidata.commons_category(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> ClaimsResponse {
        decode(value).unwrap()
    }

    #[test]
    fn picks_first_claim() {
        let reply = claims(json!({"claims": {"P373": [
            {"mainsnak": {"datavalue": {"value": "Eiffel Tower", "type": "string"}}},
            {"mainsnak": {"datavalue": {"value": "Tour Eiffel", "type": "string"}}}
        ]}}));
        assert_eq!(
            first_string_claim(reply, COMMONS_CATEGORY_PROPERTY).as_deref(),
            Some("Eiffel Tower")
        );
    }

    #[test]
    fn no_claims_is_none() {
        assert_eq!(first_string_claim(claims(json!({"claims": {}})), "P373"), None);
        assert_eq!(first_string_claim(claims(json!({})), "P373"), None);
    }

    #[test]
    fn novalue_snak_is_none() {
        let reply = claims(json!({"claims": {"P373": [
            {"mainsnak": {"snaktype": "novalue", "property": "P373"}}
        ]}}));
        assert_eq!(first_string_claim(reply, "P373"), None);
    }

    #[test]
    fn blank_value_is_none() {
        let reply = claims(json!({"claims": {"P373": [
            {"mainsnak": {"datavalue": {"value": "  ", "type": "string"}}}
        ]}}));
        assert_eq!(first_string_claim(reply, "P373"), None);
    }
}
