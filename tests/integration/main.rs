//! Integration tests

mod aggregation_test;
mod config_test;
mod pipeline_test;
mod support;
