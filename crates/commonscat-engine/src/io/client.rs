use log::{debug, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::StoreError;
use super::responses::{
    EditResponse, EditResult, LoginResponse, PagesQuery, QueryResponse, RandomQuery, TokensQuery,
    UserInfoQuery, decode,
};

/// Attempts at drawing a random article before giving up on redirects.
pub const DEFAULT_RANDOM_ATTEMPTS: usize = 5;

const TEMPLATE_NAMESPACE: &str = "Template:";

/// A logged-in (or anonymous) session against one wiki's `api.php`.
///
/// The underlying client keeps a cookie store, so the session established by
/// [`WikiClient::login`] is reused by every later request.
pub struct WikiClient {
    http: Client,
    api_url: String,
    random_attempts: usize,
}

impl WikiClient {
    pub fn new(api_url: impl Into<String>, user_agent: &str) -> Result<Self, StoreError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            random_attempts: DEFAULT_RANDOM_ATTEMPTS,
        })
    }

    pub fn with_random_attempts(mut self, attempts: usize) -> Self {
        self.random_attempts = attempts.max(1);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, StoreError> {
        let reply: Value = self
            .http
            .get(&self.api_url)
            .query(&[("format", "json")])
            .query(params)
            .send()?
            .error_for_status()?
            .json()?;
        decode(reply)
    }

    fn post<T: DeserializeOwned>(&self, form: &[(&str, &str)]) -> Result<T, StoreError> {
        let mut fields = form.to_vec();
        fields.push(("format", "json"));
        let reply: Value = self
            .http
            .post(&self.api_url)
            .form(&fields)
            .send()?
            .error_for_status()?
            .json()?;
        decode(reply)
    }

    /// Runs the login-token handshake and returns the name the wiki reports
    /// for the new session.
    pub fn login(&self, username: &str, password: &str) -> Result<String, StoreError> {
        let tokens: QueryResponse<TokensQuery> =
            self.get(&[("action", "query"), ("meta", "tokens"), ("type", "login")])?;
        let login_token = tokens
            .query
            .tokens
            .logintoken
            .ok_or(StoreError::Missing("login token"))?;

        let reply: LoginResponse = self.post(&[
            ("action", "login"),
            ("lgname", username),
            ("lgpassword", password),
            ("lgtoken", login_token.as_str()),
        ])?;
        if reply.login.result != "Success" {
            let reason = reply
                .login
                .reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| reply.login.result.clone());
            return Err(StoreError::Login(reason));
        }

        let whoami: QueryResponse<UserInfoQuery> =
            self.get(&[("action", "query"), ("meta", "userinfo")])?;
        info!("Logged in as: {}", whoami.query.userinfo.name);
        Ok(whoami.query.userinfo.name)
    }

    pub fn csrf_token(&self) -> Result<String, StoreError> {
        let tokens: QueryResponse<TokensQuery> =
            self.get(&[("action", "query"), ("meta", "tokens")])?;
        tokens
            .query
            .tokens
            .csrftoken
            .ok_or(StoreError::Missing("csrf token"))
    }

    pub fn is_redirect(&self, title: &str) -> Result<bool, StoreError> {
        let reply: QueryResponse<PagesQuery> = self.get(&[
            ("action", "query"),
            ("titles", title),
            ("formatversion", "2"),
        ])?;
        Ok(reply.query.pages.iter().any(|page| page.redirect))
    }

    /// Draws random main-namespace titles until one is not a redirect.
    pub fn random_article(&self) -> Result<String, StoreError> {
        for _ in 0..self.random_attempts {
            let reply: QueryResponse<RandomQuery> = self.get(&[
                ("action", "query"),
                ("list", "random"),
                ("rnnamespace", "0"),
                ("rnlimit", "1"),
            ])?;
            let title = reply
                .query
                .random
                .into_iter()
                .next()
                .ok_or(StoreError::Missing("random title"))?
                .title;
            if !self.is_redirect(&title)? {
                return Ok(title);
            }
            debug!("Skipping redirect {title}");
        }
        Err(StoreError::NoArticle(self.random_attempts))
    }

    /// Current wikitext of a page, `None` when the page does not exist.
    pub fn fetch_page(&self, title: &str) -> Result<Option<String>, StoreError> {
        let reply: QueryResponse<PagesQuery> = self.get(&[
            ("action", "query"),
            ("prop", "revisions"),
            ("titles", title),
            ("rvslots", "main"),
            ("rvprop", "content"),
            ("formatversion", "2"),
        ])?;
        let Some(page) = reply.query.pages.into_iter().next() else {
            return Ok(None);
        };
        if page.missing || page.invalid {
            return Ok(None);
        }
        Ok(page.content().map(str::to_string))
    }

    /// Text of `Template:<name>`.
    pub fn fetch_template(&self, name: &str) -> Result<Option<String>, StoreError> {
        self.fetch_page(&template_title(name))
    }

    /// The Wikidata item id linked to a page, if any.
    pub fn wikibase_item(&self, title: &str) -> Result<Option<String>, StoreError> {
        let reply: QueryResponse<PagesQuery> = self.get(&[
            ("action", "query"),
            ("prop", "pageprops"),
            ("titles", title),
            ("formatversion", "2"),
        ])?;
        Ok(reply
            .query
            .pages
            .into_iter()
            .find_map(|page| page.pageprops.and_then(|props| props.wikibase_item)))
    }

    /// Saves `text` as a bot edit, asserting the session is still logged in.
    pub fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<EditResult, StoreError> {
        let token = self.csrf_token()?;
        let reply: EditResponse = self.post(&[
            ("action", "edit"),
            ("title", title),
            ("text", text),
            ("summary", summary),
            ("token", token.as_str()),
            ("assert", "user"),
            ("bot", "1"),
            ("formatversion", "2"),
        ])?;
        info!("Edit: {} {:?}", reply.edit.result, reply.edit.new_revision);
        Ok(reply.edit)
    }
}

/// `Template:<name>`, unless the name already carries the namespace.
pub fn template_title(name: &str) -> String {
    let name = name.trim();
    if name
        .get(..TEMPLATE_NAMESPACE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TEMPLATE_NAMESPACE))
    {
        name.to_string()
    } else {
        format!("{TEMPLATE_NAMESPACE}{name}")
    }
}
