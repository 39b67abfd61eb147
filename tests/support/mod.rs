//! Shared fixtures for gateway behaviour tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use geckogate_core::{
    CredentialRotator, HttpClient, HttpError, HttpRequest, HttpResponse, MarketGateway,
    RequestPacer,
};
use tokio::time::Instant;

/// Fake transport that answers by request path and records every call.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<HashMap<String, Result<HttpResponse, HttpError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: HttpRequest,
    pub at: Instant,
}

impl RecordedCall {
    pub fn api_key(&self) -> Option<&str> {
        self.request
            .headers
            .get("x-cg-demo-api-key")
            .map(String::as_str)
    }
}

impl ScriptedHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: &str) {
        self.script(path, Ok(HttpResponse::ok_json(body)));
    }

    pub fn respond_status(&self, path: &str, status: u16, body: &str) {
        self.script(path, Ok(HttpResponse::with_status(status, body)));
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.script(path, Err(HttpError::new(message)));
    }

    fn script(&self, path: &str, response: Result<HttpResponse, HttpError>) {
        self.routes
            .lock()
            .expect("routes should not be poisoned")
            .insert(path.to_owned(), response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("calls should not be poisoned")
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.request.path)
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .lock()
            .expect("routes should not be poisoned")
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "no route scripted")));

        self.calls
            .lock()
            .expect("calls should not be poisoned")
            .push(RecordedCall {
                request,
                at: Instant::now(),
            });

        Box::pin(async move { response })
    }
}

pub fn gateway(client: &Arc<ScriptedHttpClient>, keys: &[&str], interval_ms: u64) -> MarketGateway {
    let rotator = CredentialRotator::new(keys.iter().copied()).expect("test keys are valid");
    let pacer = RequestPacer::spawn(Duration::from_millis(interval_ms));
    let transport: Arc<dyn HttpClient> = client.clone();
    MarketGateway::new(rotator, pacer, transport)
}

pub fn market_row(id: &str, price: f64, max_supply: Option<f64>) -> String {
    let max_supply = max_supply.map_or_else(|| String::from("null"), |v| v.to_string());
    format!(
        r#"{{
            "id": "{id}",
            "symbol": "{symbol}",
            "name": "{name}",
            "image": "https://assets.example.test/{id}.png",
            "current_price": {price},
            "market_cap": {market_cap},
            "market_cap_rank": 1,
            "price_change_percentage_24h": 1.5,
            "price_change_percentage_7d_in_currency": -0.5,
            "circulating_supply": 1000.0,
            "total_supply": 2000.0,
            "max_supply": {max_supply},
            "last_updated": "2024-04-01T12:00:00.000Z",
            "sparkline_in_7d": {{ "price": [1.0, 2.0, 3.0] }}
        }}"#,
        symbol = &id[..3.min(id.len())],
        name = id.to_uppercase(),
        market_cap = price * 1000.0,
    )
}

pub fn markets_body(rows: &[String]) -> String {
    format!("[{}]", rows.join(","))
}

pub fn details_body(id: &str, max_supply: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "symbol": "xyz",
            "name": "Some Coin",
            "image": {{ "large": "https://assets.example.test/{id}-large.png" }},
            "market_cap_rank": 42,
            "categories": ["Layer 1 (L1)"],
            "description": {{ "en": "A coin used in tests." }},
            "links": {{ "homepage": ["https://example.test", ""] }},
            "last_updated": "2024-04-01T12:00:00.000Z",
            "market_data": {{
                "current_price": {{ "usd": 12.5 }},
                "market_cap": {{ "usd": 125000.0 }},
                "price_change_percentage_24h": 2.0,
                "price_change_percentage_7d_in_currency": {{ "usd": 5.0 }},
                "circulating_supply": 10000.0,
                "total_supply": null,
                "max_supply": {max_supply}
            }}
        }}"#
    )
}
