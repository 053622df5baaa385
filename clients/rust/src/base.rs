use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

const CYCLE_SECRET_HEADER: &str = "zelo-cycle-secret";

#[derive(Debug)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    Unauthorized,
    BadClientData,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    address: String,
    api_key: Option<String>,
    client: Client,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            api_key: None,
            client: Client::new(),
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        if !api_key.is_empty() {
            self.api_key = Some(api_key);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.address, path)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(api_key) => builder.header(CYCLE_SECRET_HEADER, api_key),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        res: reqwest::Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            let variant = match status {
                StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
                StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            let message = res.text().await.unwrap_or_default();
            return Err(APIError { variant, message });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: format!("{}", e),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .prepare(self.client.get(&self.url(&path)))
            .send()
            .await
            .map_err(|e| APIError {
                variant: APIErrorVariant::Network,
                message: format!("{}", e),
            })?;
        self.handle_response(res, expected_status_code).await
    }

    pub async fn post<S: Serialize, T: DeserializeOwned>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .prepare(self.client.post(&self.url(&path)))
            .json(&body)
            .send()
            .await
            .map_err(|e| APIError {
                variant: APIErrorVariant::Network,
                message: format!("{}", e),
            })?;
        self.handle_response(res, expected_status_code).await
    }
}
