//! A thin client for the Mailjet v3 REST API.
//! Only the contact, list management and list metadata endpoints are used.

use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Client, Method, StatusCode, Url,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::{MailjetConfig, SubscribeMode},
    utils,
    web::types::WaitlistEmail,
};

#[derive(Debug, Clone, Copy, Serialize)]
pub enum ContactAction {
    /// Adds the contact unless it has previously unsubscribed.
    #[serde(rename = "addnoforce")]
    AddNoForce,
}

/// Everything needed to talk to one Mailjet list.
#[derive(Debug)]
pub struct MailjetCredentials {
    authorization: HeaderValue,
    list_id: String,
}

impl MailjetCredentials {
    pub fn new(api_key: &SecretString, secret_key: &SecretString, list_id: String) -> Result<Self> {
        let encoded = utils::b64_encode(format!(
            "{}:{}",
            api_key.expose_secret(),
            secret_key.expose_secret()
        ));
        let mut authorization = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| Error::InvalidCredentials)?;
        authorization.set_sensitive(true);

        Ok(MailjetCredentials {
            authorization,
            list_id,
        })
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }
}

#[derive(Debug)]
pub struct MailjetClient {
    http_client: Client,
    base_url: Url,
    subscribe_mode: SubscribeMode,
    credentials: Option<MailjetCredentials>,
}

impl MailjetClient {
    pub fn new<S: AsRef<str>>(
        base_url: S,
        credentials: Option<MailjetCredentials>,
        subscribe_mode: SubscribeMode,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        // `Url::join` drops the last path segment unless it ends with a slash.
        let base_url = base_url.as_ref();
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)
        } else {
            Url::parse(&format!("{base_url}/"))
        }
        .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(MailjetClient {
            http_client,
            base_url,
            subscribe_mode,
            credentials,
        })
    }

    /// Builds the client from config. Missing secrets are not an error here,
    /// they only get reported once somebody asks for the waitlist.
    pub fn from_config(config: &MailjetConfig) -> Result<Self> {
        let credentials = match (&config.api_key, &config.secret_key, &config.list_id) {
            (Some(api_key), Some(secret_key), Some(list_id)) => Some(MailjetCredentials::new(
                api_key,
                secret_key,
                list_id.clone(),
            )?),
            _ => {
                warn!(
                    "{:<20} - Missing environment variables: {}",
                    "mailjet client",
                    config.missing_secrets().join(", ")
                );
                None
            }
        };

        Self::new(
            &config.base_url,
            credentials,
            config.subscribe_mode,
            config.timeout(),
        )
    }

    /// Returns a handle to the configured list, or `Error::MissingCredentials`.
    pub fn waitlist(&self) -> Result<Waitlist<'_>> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(Error::MissingCredentials)?;

        Ok(Waitlist {
            client: self,
            credentials,
        })
    }
}

/// A credentialed view of the Mailjet list that backs the waitlist.
#[derive(Debug, Clone, Copy)]
pub struct Waitlist<'a> {
    client: &'a MailjetClient,
    credentials: &'a MailjetCredentials,
}

impl Waitlist<'_> {
    /// Puts `email` on the list, using the configured `SubscribeMode`.
    pub async fn subscribe(&self, email: &WaitlistEmail) -> Result<()> {
        match self.client.subscribe_mode {
            SubscribeMode::TwoStep => {
                self.create_contact(email).await?;
                self.manage_contact(email).await
            }
            SubscribeMode::Batch => self.manage_many_contacts(email).await,
        }
    }

    /// Current `SubscriberCount` of the list, 0 if Mailjet leaves it out.
    pub async fn subscriber_count(&self) -> Result<u64> {
        let path = format!("contactslist/{}", self.credentials.list_id());
        let resp = self
            .send(Method::GET, &path, Option::<&()>::None)
            .await?
            .error_for_vendor_status()?;

        let list: ContactsListResponse = serde_json::from_value(resp.payload)?;
        let count = list
            .data
            .into_iter()
            .next()
            .and_then(|data| data.subscriber_count)
            .unwrap_or(0);

        Ok(count)
    }

    /// Mailjet answers with a 400 if the contact already exists, which is fine for us:
    /// the list subscription that follows decides the outcome.
    async fn create_contact(&self, email: &WaitlistEmail) -> Result<()> {
        let body = ContactBody {
            email: email.as_ref(),
            is_excluded_from_campaigns: false,
        };
        let resp = self.send(Method::POST, "contact", Some(&body)).await?;
        debug!(
            status = resp.status.as_u16(),
            "Contact creation response: {}", resp.payload
        );

        Ok(())
    }

    async fn manage_contact(&self, email: &WaitlistEmail) -> Result<()> {
        let path = format!("contactslist/{}/managecontact", self.credentials.list_id());
        let body = ManageContactBody {
            email: email.as_ref(),
            action: ContactAction::AddNoForce,
        };
        let resp = self.send(Method::POST, &path, Some(&body)).await?;
        debug!(
            status = resp.status.as_u16(),
            "List subscription response: {}", resp.payload
        );

        resp.error_for_vendor_status()?;
        Ok(())
    }

    async fn manage_many_contacts(&self, email: &WaitlistEmail) -> Result<()> {
        let path = format!(
            "contactslist/{}/managemanycontacts",
            self.credentials.list_id()
        );
        let body = ManageManyContactsBody {
            action: ContactAction::AddNoForce,
            contacts: [ContactBody {
                email: email.as_ref(),
                is_excluded_from_campaigns: false,
            }],
        };
        let resp = self.send(Method::POST, &path, Some(&body)).await?;
        debug!(
            status = resp.status.as_u16(),
            "Batch list subscription response: {}", resp.payload
        );

        resp.error_for_vendor_status()?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<VendorResponse> {
        let url = self
            .client
            .base_url
            .join(path)
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let mut req = self
            .client
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, self.credentials.authorization.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let raw = resp.bytes().await?;
        let payload = if raw.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&raw)?
        };

        Ok(VendorResponse { status, payload })
    }
}

struct VendorResponse {
    status: StatusCode,
    payload: Value,
}

impl VendorResponse {
    fn error_for_vendor_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::Rejected {
                status: self.status,
                payload: self.payload,
            })
        }
    }
}

// ###################################
// ->   WIRE FORMAT
// ###################################
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ContactBody<'a> {
    email: &'a str,
    is_excluded_from_campaigns: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ManageContactBody<'a> {
    email: &'a str,
    action: ContactAction,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ManageManyContactsBody<'a> {
    action: ContactAction,
    contacts: [ContactBody<'a>; 1],
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContactsListResponse {
    #[serde(default)]
    data: Vec<ContactsListData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContactsListData {
    #[serde(default)]
    subscriber_count: Option<u64>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("mailjet credentials are not configured")]
    MissingCredentials,
    #[error("mailjet credentials can't be used as a header value")]
    InvalidCredentials,
    #[error("mailjet rejected the request with status {status}: {payload}")]
    Rejected { status: StatusCode, payload: Value },
    #[error("url parsing error: {0}")]
    UrlParsing(String),

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("failed to parse the mailjet response: {0}")]
    Deser(#[from] serde_json::Error),
}
