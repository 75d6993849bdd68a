use serde_json::{Map, Value};

/// Parse a request body based on Content-Type header. An empty body is an empty object.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    match content_type {
        Some(ct) if ct.contains("application/json") => {
            serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))
        }
        Some(ct) if ct.contains("application/x-www-form-urlencoded") => {
            parse_form_urlencoded(body)
        }
        // Try JSON first, then form-urlencoded
        _ => serde_json::from_slice(body)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}")),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}
