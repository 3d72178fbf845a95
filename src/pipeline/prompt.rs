/// Build the instruction that turns a user query into an intent.
pub fn build_intent_prompt(user_query: &str) -> String {
    format!(
        r#"Extract filtering intent from the user query.

Rules:
- Only extract fields explicitly mentioned
- Do not infer or guess
- If a field is missing, return null
- Output valid JSON only, with no surrounding text

Schema:
{{
  "state": string | null,
  "min_total": number | null
}}

<query>
{user_query}
</query>"#
    )
}

/// Build the instruction that extracts orders from one chunk of raw text.
pub fn build_extraction_prompt(chunk: &str) -> String {
    format!(
        r#"You extract order data from unstructured text.

Rules:
- Extract only explicitly stated fields
- Do not infer missing values
- If a field is missing, return null
- Output valid JSON only, with no surrounding text

Schema:
{{
  "orders": [
    {{
      "orderId": string | null,
      "buyer": string | null,
      "state": string | null,
      "total": number | null
    }}
  ]
}}

<text>
{chunk}
</text>"#
    )
}
