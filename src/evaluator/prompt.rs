//! Evaluator prompt text

use super::NewsDigest;

/// Fixed system instruction
pub const SYSTEM_PROMPT: &str = "You are a prediction market analyst. Evaluate news items for prediction markets.
Score every item from 0 to 10 on verifiability, timeline clarity, public interest and non-triviality.
For each selected news item, you must determine:
1. A trading duration in hours (how long people can place predictions)
2. A settlement timestamp (when the outcome will be determined)
Choose reasonable durations based on the event type:
- Sports events: typically 24-48 hours for trading, settlement right after the event
- Political events: longer trading periods (72-168 hours), clear settlement dates
- Technology/Business announcements: medium trading periods (48-96 hours)";

/// Build the user instruction embedding the news digests and the reply shape
pub fn build_user_prompt(digests: &[NewsDigest], target_count: usize) -> String {
    // Serializing plain strings and integers cannot fail
    let news_json = serde_json::to_string_pretty(digests).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Analyze ALL of these news items ({count} items) for prediction market potential.
Then select the top {target} most suitable items.

News items to analyze:
{news}

Return a JSON object with this exact structure:
{{
  "evaluations": [
    {{
      "id": number,
      "title": string,
      "scores": {{
        "verifiability": number (0-10),
        "timeline": number (0-10),
        "publicInterest": number (0-10),
        "nonTriviality": number (0-10),
        "totalScore": number (sum of all scores)
      }},
      "recommendation": string,
      "suggestedQuestion": string,
      "tradingDurationHours": number,
      "settlementTimestamp": string (ISO format timestamp)
    }}
  ],
  "selectedIds": [array of {target} ids with highest total scores]
}}

For the settlementTimestamp, provide a specific ISO timestamp when the outcome will be known.
For tradingDurationHours, specify how many hours the market should remain open for predictions."#,
        count = digests.len(),
        target = target_count,
        news = news_json,
    )
}
