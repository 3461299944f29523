//! JSON parsing for extraction responses
//!
//! Model responses sometimes wrap the JSON payload in extra text; the parser
//! scans for the outermost object before deserializing. Required fields are
//! enforced here in code — a response that omits one is a contract violation,
//! never silently defaulted.

use serde_json::Value;

use crate::error::{Error, Result};

use super::types::ExtractedStatement;

/// Parse an extracted statement from the model's text response
pub fn parse_statement_response(response: &str) -> Result<ExtractedStatement> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    let json_str = match (start, end) {
        (Some(s), Some(e)) if s < e => &response[s..=e],
        _ => {
            return Err(Error::InvalidData(
                "No JSON found in extraction response".into(),
            ))
        }
    };

    let value: Value = serde_json::from_str(json_str).map_err(|e| {
        let truncated = if json_str.len() > 200 {
            format!("{}...", &json_str[..200])
        } else {
            json_str.to_string()
        };
        Error::InvalidData(format!(
            "Invalid JSON in extraction response: {} | Raw: {}",
            e, truncated
        ))
    })?;

    let monthly_volume = require_number(&value, "monthly_volume")?;
    let monthly_fees = require_number(&value, "monthly_fees")?;
    let current_rate = require_number(&value, "current_rate_percentage")?;
    let current_terminal_count = require_count(&value, "current_terminal_count")?;

    // The schema demands a 0-1 decimal; a percentage like 2.8 here means the
    // model ignored the contract, and rescaling would hide that.
    if !(0.0..=1.0).contains(&current_rate) {
        return Err(Error::InvalidData(format!(
            "current_rate_percentage must be a 0-1 decimal, got {}",
            current_rate
        )));
    }

    Ok(ExtractedStatement {
        monthly_volume,
        monthly_fees,
        current_rate,
        current_terminal_count,
    })
}

fn require_number(value: &Value, field: &'static str) -> Result<f64> {
    let field_value = value.get(field).ok_or(Error::MissingField(field))?;
    field_value
        .as_f64()
        .ok_or_else(|| Error::InvalidData(format!("Field {} is not a number", field)))
}

fn require_count(value: &Value, field: &'static str) -> Result<u32> {
    let field_value = value.get(field).ok_or(Error::MissingField(field))?;
    let count = field_value
        .as_u64()
        .ok_or_else(|| Error::InvalidData(format!("Field {} is not an integer", field)))?;
    u32::try_from(count)
        .map_err(|_| Error::InvalidData(format!("Field {} is out of range: {}", field, count)))
}
