//! Contacts API client.

use std::future::Future;

use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use contact_book_core::{Contact, ContactFields, ContactId};

use crate::error::ClientError;

/// Operations the view needs from the contacts API.
///
/// [`HttpContactApi`] talks to a running server; tests substitute an
/// in-memory implementation.
pub trait ContactApi {
    /// `GET /contacts`
    fn list(&self) -> impl Future<Output = Result<Vec<Contact>, ClientError>> + Send;

    /// `GET /contacts/{id}`
    fn get(&self, id: ContactId) -> impl Future<Output = Result<Contact, ClientError>> + Send;

    /// `POST /contacts`
    fn create(
        &self,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<Contact, ClientError>> + Send;

    /// `PUT /contacts/{id}`
    fn update(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<Contact, ClientError>> + Send;

    /// `DELETE /contacts/{id}`, returning the server's confirmation message.
    fn delete(&self, id: ContactId) -> impl Future<Output = Result<String, ClientError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    message: String,
}

/// `reqwest`-backed [`ContactApi`].
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: Client,
    base_url: Url,
}

impl HttpContactApi {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `base_url` may include a routing prefix, e.g. `http://host/api`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base_url` does not parse.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Without a trailing slash `join` would replace the prefix segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// The normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn contacts_url(&self) -> Result<Url, ClientError> {
        Ok(self.base_url.join("contacts")?)
    }

    fn contact_url(&self, id: ContactId) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("contacts/{id}"))?)
    }

    /// Turn a non-success response into `ClientError::Api`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };

        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl ContactApi for HttpContactApi {
    async fn list(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self.client.get(self.contacts_url()?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get(&self, id: ContactId) -> Result<Contact, ClientError> {
        let response = self.client.get(self.contact_url(id)?).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, fields: &ContactFields) -> Result<Contact, ClientError> {
        let response = self
            .client
            .post(self.contacts_url()?)
            .json(fields)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: ContactId, fields: &ContactFields) -> Result<Contact, ClientError> {
        let response = self
            .client
            .put(self.contact_url(id)?)
            .json(fields)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: ContactId) -> Result<String, ClientError> {
        let response = self.client.delete(self.contact_url(id)?).send().await?;
        let body: DeleteBody = Self::check(response).await?.json().await?;
        Ok(body.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_without_prefix() {
        let api = HttpContactApi::new("http://localhost:3001").unwrap();
        assert_eq!(
            api.contacts_url().unwrap().as_str(),
            "http://localhost:3001/contacts"
        );
        assert_eq!(
            api.contact_url(ContactId::new(7)).unwrap().as_str(),
            "http://localhost:3001/contacts/7"
        );
    }

    #[test]
    fn test_urls_keep_routing_prefix() {
        let api = HttpContactApi::new("http://localhost:3001/api").unwrap();
        assert_eq!(api.base_url().as_str(), "http://localhost:3001/api/");
        assert_eq!(
            api.contact_url(ContactId::new(7)).unwrap().as_str(),
            "http://localhost:3001/api/contacts/7"
        );

        let api = HttpContactApi::new("http://localhost:3001/api/").unwrap();
        assert_eq!(
            api.contacts_url().unwrap().as_str(),
            "http://localhost:3001/api/contacts"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpContactApi::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
