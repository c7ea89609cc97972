//! Decoder for c2ffi declaration streams.
//!
//! The whole stream is read into memory and split into typed definitions.
//! Records whose top-level tag is not `typedef`, `struct` or `function`
//! (enums, globals, unions, ...) are counted and dropped. Records without a
//! string tag are counted under [`MISSING_TAG`].

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::context::RunStats;
use super::errors::DecodeError;
use super::types::Definition;

/// Tally key for records that carry no string `tag` member.
pub const MISSING_TAG: &str = "<missing>";

/// Definitions decoded from one stream.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStream {
    /// Known definitions, in input order
    pub definitions: Vec<Definition>,

    /// Counters started while decoding; only unknown tags are filled in
    pub stats: RunStats,
}

impl DefinitionStream {
    /// Total records seen, known or not.
    pub fn record_count(&self) -> usize {
        self.definitions.len() + self.stats.unknown_tags.values().sum::<usize>()
    }
}

/// Decoder for declaration streams.
#[derive(Debug, Default)]
pub struct DefinitionDecoder;

impl DefinitionDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        DefinitionDecoder
    }

    /// Decode a declaration file.
    pub fn decode_file(&self, path: &Path) -> Result<DefinitionStream> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read declarations: {}", path.display()))?;

        self.decode_str(&content)
            .with_context(|| format!("failed to decode declarations: {}", path.display()))
    }

    /// Decode a stream read to its end.
    pub fn decode_reader(&self, mut reader: impl Read) -> Result<DefinitionStream> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("failed to read declaration stream")?;

        Ok(self.decode_str(&content)?)
    }

    /// Decode stream content.
    pub fn decode_str(&self, content: &str) -> Result<DefinitionStream, DecodeError> {
        let value: Value = serde_json::from_str(content).map_err(DecodeError::Json)?;
        self.decode_value(value)
    }

    /// Decode an already parsed JSON document.
    pub fn decode_value(&self, value: Value) -> Result<DefinitionStream, DecodeError> {
        let records = match value {
            Value::Array(records) => records,
            other => {
                return Err(DecodeError::NotAnArray {
                    found: json_kind(&other),
                })
            }
        };

        let mut stream = DefinitionStream::default();
        for (index, record) in records.into_iter().enumerate() {
            let tag = record
                .get("tag")
                .and_then(Value::as_str)
                .unwrap_or(MISSING_TAG)
                .to_string();

            match tag.as_str() {
                "typedef" | "struct" | "function" => {
                    let def: Definition = serde_json::from_value(record)
                        .map_err(|source| DecodeError::Record { index, tag, source })?;
                    stream.definitions.push(def);
                }
                _ => {
                    if !stream.stats.unknown_tags.contains_key(&tag) {
                        tracing::info!("ignoring `{}` records", tag);
                    }
                    let name = record.get("name").and_then(Value::as_str).unwrap_or("");
                    tracing::debug!("ignoring `{}` record {} `{}`", tag, index, name);
                    stream.stats.record_unknown_tag(&tag);
                }
            }
        }

        tracing::debug!(
            "decoded {} definitions ({} ignored)",
            stream.definitions.len(),
            stream.record_count() - stream.definitions.len()
        );

        Ok(stream)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
