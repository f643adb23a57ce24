//! Evaluator response extraction
//!
//! Model replies often wrap the JSON object in prose or code fences. Only the
//! span from the first `{` to the last `}` is parsed.

use super::EvaluationBatch;
use crate::error::{PipelineError, Result};

/// Locate the outermost JSON object candidate in free-form text
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse an evaluation batch out of a raw model reply
pub fn parse_batch(raw: &str) -> Result<EvaluationBatch> {
    let json = extract_json_object(raw).ok_or_else(|| {
        PipelineError::MalformedEvaluatorResponse("no JSON object found in response".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| PipelineError::MalformedEvaluatorResponse(format!("invalid JSON: {e}")))
}
