//! Shared fakes for the external collaborators

use async_trait::async_trait;
use news_market_agent::contract::{ContractInvoker, MarketCall, TxHash};
use news_market_agent::evaluator::{CompletionProvider, CompletionRequest};
use news_market_agent::news::FeedClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves fixed JSON bodies by URL; unknown URLs fail
#[derive(Default)]
pub struct CannedFeeds {
    pub bodies: HashMap<String, Value>,
}

impl CannedFeeds {
    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }
}

#[async_trait]
impl FeedClient for CannedFeeds {
    async fn get_json(&self, url: &str, _params: &[(String, String)]) -> anyhow::Result<Value> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }
}

/// Replies with one fixed completion and records every request
pub struct ScriptedProvider {
    pub reply: String,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Canned Sina feed body; `ctime` is Beijing local time
pub fn sina_body(items: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(title, ctime)| {
            json!({
                "title": title,
                "description": format!("About {title}"),
                "url": format!("https://news.sina.example/{}", title.replace(' ', "-")),
                "ctime": ctime
            })
        })
        .collect();
    json!({ "newslist": items })
}

/// Records calls and fails those whose question is listed
#[derive(Default)]
pub struct RecordingInvoker {
    pub fail_questions: Vec<String>,
    pub calls: Mutex<Vec<MarketCall>>,
}

#[async_trait]
impl ContractInvoker for RecordingInvoker {
    async fn invoke(&self, call: &MarketCall) -> anyhow::Result<TxHash> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call.clone());
            calls.len()
        };
        if self.fail_questions.contains(&call.question) {
            anyhow::bail!("insufficient funds");
        }
        Ok(format!("0xtx{n}"))
    }
}

pub fn newsapi_body(articles: &[(&str, &str)]) -> Value {
    let articles: Vec<Value> = articles
        .iter()
        .map(|(title, published_at)| {
            json!({
                "source": { "name": "Wire" },
                "title": title,
                "description": format!("About {title}"),
                "url": format!("https://wire.example/{}", title.replace(' ', "-")),
                "publishedAt": published_at
            })
        })
        .collect();
    json!({ "status": "ok", "articles": articles })
}

pub fn evaluation(id: i64, question: &str, hours: f64, settlement: &str) -> Value {
    json!({
        "id": id,
        "title": format!("News {id}"),
        "scores": {
            "verifiability": 8,
            "timeline": 7,
            "publicInterest": 6,
            "nonTriviality": 5,
            "totalScore": 26
        },
        "recommendation": "Good market",
        "suggestedQuestion": question,
        "tradingDurationHours": hours,
        "settlementTimestamp": settlement
    })
}
