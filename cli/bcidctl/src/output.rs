//! Output rendering.

use bcid::{Bcid, Decoded};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliError;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// JSON document.
    Json,
}

#[derive(Serialize)]
struct GeneratedOutput<'a> {
    ids: &'a [Bcid],
}

/// Render generated identifiers, one per line in text mode.
pub fn render_generated(ids: &[Bcid], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(ids
            .iter()
            .map(Bcid::as_str)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&GeneratedOutput { ids })?),
    }
}

/// Render decoded fields.
pub fn render_decoded(decoded: &Decoded, format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(decoded)?);
    }

    let mut lines = vec![
        format!("Prefix: {}", decoded.prefix()),
        format!("Type: {}", decoded.layout()),
        format!("Machine ID: {}", decoded.machine_id()),
    ];

    match decoded {
        Decoded::Chronological {
            timestamp,
            random_value,
            ..
        } => {
            lines.push(format!("Timestamp: {}", timestamp.value()));
            if let Some(at) = timestamp.to_datetime() {
                lines.push(format!(
                    "Time: {}",
                    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
                ));
            }
            lines.push(format!("Random Value: {random_value}"));
        }
        Decoded::Random { random_part, .. } => {
            lines.push(format!("Random Part: {random_part}"));
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcid::CompactTimestamp;

    fn chronological() -> Decoded {
        Decoded::Chronological {
            prefix: "TEST".to_string(),
            timestamp: CompactTimestamp::new(2023122510300000).unwrap(),
            machine_id: 1,
            random_value: 4242,
        }
    }

    #[test]
    fn test_render_chronological_text() {
        let text = render_decoded(&chronological(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Prefix: TEST\n\
             Type: chronological\n\
             Machine ID: 1\n\
             Timestamp: 2023122510300000\n\
             Time: 2023-12-25T10:30:00.000Z\n\
             Random Value: 4242"
        );
    }

    #[test]
    fn test_render_random_text() {
        let decoded = Decoded::Random {
            prefix: "TEST".to_string(),
            machine_id: 7,
            random_part: "x".repeat(25),
        };
        let text = render_decoded(&decoded, OutputFormat::Text).unwrap();
        assert!(text.contains("Type: random"));
        assert!(text.ends_with(&format!("Random Part: {}", "x".repeat(25))));
    }

    #[test]
    fn test_render_decoded_json() {
        let json = render_decoded(&chronological(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "chronological");
        assert_eq!(value["timestamp"], 2023122510300000u64);
        assert_eq!(value["random_value"], 4242);
    }

    #[test]
    fn test_render_generated() {
        let ids = vec![
            Bcid::parse("TESTaab9xQ3mZkLp0wYe7RtUvBn2Hc4s").unwrap(),
            Bcid::parse("TESTaac9xQ3mZkLp0wYe7RtUvBn2Hc4s").unwrap(),
        ];
        let text = render_generated(&ids, OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 2);

        let json = render_generated(&ids, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ids"][1], "TESTaac9xQ3mZkLp0wYe7RtUvBn2Hc4s");
    }
}
