//! news-market-agent: turns breaking news into prediction markets
//!
//! This library provides the core components for:
//! - Collecting and merging headlines from several news feeds
//! - Scoring news for market suitability through a chat-completion service
//! - Selecting markets and deriving on-chain contract parameters
//! - Sequential market-creation submission (paper or relay)
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod evaluator;
pub mod news;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod telemetry;
