use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::RwLock;
use tracing::debug;

/// HTTP verbs the backend contract uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request body encodings
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    /// Multipart form fields, used only by login
    Form(Vec<(String, String)>),
}

/// A single call against the backend, relative to the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            payload: Payload::Empty,
        }
    }

    pub fn post(path: &str, payload: Payload) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            payload,
        }
    }
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Boundary between the client and the network.
///
/// Implementations own the session cookie; the client never sees it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one attempt. `Err` means the exchange never completed.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String>;

    /// Forget the session cookie
    fn clear_session(&self);
}

/// reqwest-backed transport with an in-memory cookie store
pub struct HttpTransport {
    http_client: RwLock<HttpClient>,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            http_client: RwLock::new(Self::build_client()?),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_client() -> Result<HttpClient, String> {
        HttpClient::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))
    }

    /// Snapshot of the current client; the guard is released before any await
    fn client(&self) -> HttpClient {
        match self.http_client.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let url = self.url(&request.path);
        let client = self.client();

        let builder = match request.method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
        };

        let builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Form(fields) => {
                let form = fields
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                builder.multipart(form)
            }
        };

        debug!("{:?} {}", request.method, url);

        let response = builder
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        debug!("{} -> {}", url, status);
        Ok(RawResponse { status, body })
    }

    fn clear_session(&self) {
        // A fresh client comes with an empty cookie jar
        match Self::build_client() {
            Ok(fresh) => match self.http_client.write() {
                Ok(mut guard) => *guard = fresh,
                Err(poisoned) => *poisoned.into_inner() = fresh,
            },
            Err(e) => tracing::warn!("Could not reset session: {}", e),
        }
    }
}

#[cfg(test)]
pub mod fake {
    //! Scripted transport for tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<VecDeque<Result<RawResponse, String>>>,
        requests: Mutex<Vec<ApiRequest>>,
        cleared: AtomicUsize,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response with the given status and JSON body
        pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
            self.responses.lock().unwrap().push_back(Ok(RawResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        /// Queue a response with a raw, possibly non-JSON, body
        pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
            self.responses.lock().unwrap().push_back(Ok(RawResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        /// Queue a transport failure
        pub fn fail(&self, reason: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(reason.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last_request(&self) -> Option<ApiRequest> {
            self.requests.lock().unwrap().last().cloned()
        }

        pub fn sessions_cleared(&self) -> usize {
            self.cleared.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        }

        fn clear_session(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }
    }
}
