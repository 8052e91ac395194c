// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A local stand-in for the Mailgun API that records every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use base64::Engine;
use mailgun_mcp::config::MailgunConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const API_KEY: &str = "test-key";
pub const DOMAIN: &str = "example.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: Vec<(String, String)>,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeMailgun {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakeMailgun {
    /// Answers every request with `status` and `body`.
    pub async fn replying(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status: StatusCode::from_u16(status).expect("status code"),
            body: body.to_owned(),
            requests: Arc::clone(&requests),
        };

        let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind fake mailgun");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new().fallback(record).with_state(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake mailgun serve");
        });

        Self { base_url: format!("http://{addr}"), requests, handle }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> MailgunConfig {
        MailgunConfig::new(API_KEY, DOMAIN)
            .and_then(|config| config.with_api_base_url(&self.base_url))
            .expect("config")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for FakeMailgun {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let header_value = |name: header::HeaderName| {
        headers.get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
    };
    let form = url::form_urlencoded::parse(body.as_bytes()).into_owned().collect();

    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method,
        path: uri.path().to_owned(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        form,
    });

    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body.clone())
}

pub fn expected_basic_auth() -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("api:{API_KEY}"));
    format!("Basic {encoded}")
}

/// A port that was free a moment ago and has nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    listener.local_addr().expect("local addr").port()
}
