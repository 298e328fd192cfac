//! Shared helpers for the integration tests: a mock `Transport` and canned
//! responses.

#![allow(dead_code)]

use mockall::mock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use sxcu::transport::{Request, Response, Transport};
use sxcu::{ClientConfig, SxcuClient, SxcuService};

mock! {
    pub Http {}

    impl Transport for Http {
        fn send(&self, request: Request) -> sxcu::Result<Response>;
    }
}

pub fn response(status: u16, body: &str) -> Response {
    Response {
        status,
        headers: HeaderMap::from_iter([(CONTENT_TYPE, HeaderValue::from_static("application/json"))]),
        body: body.to_string(),
    }
}

/// Mock answering every request with `status` and `body`.
pub fn answering(status: u16, body: &'static str) -> MockHttp {
    let mut http = MockHttp::new();
    http.expect_send()
        .returning(move |_| Ok(response(status, body)));
    http
}

pub fn client(config: ClientConfig, http: MockHttp) -> SxcuClient {
    SxcuClient::with_transport(config, Arc::new(http))
}

pub fn service(http: MockHttp) -> SxcuService {
    SxcuService::with_transport(Arc::new(http))
}
