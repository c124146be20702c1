//! Document loading.
//!
//! This module converts JSON and YAML documents into [`Node`] trees so they
//! can be searched. Containers are identified by their location in the
//! document (`$`, `$.user`, `$.pets[0]`); scalars by their text (`Sergey`,
//! `27`, `true`, `null`). An empty string scalar is identified as `""` so
//! that every id stays non-empty.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use tracing::debug;

use super::error::NodeError;
use super::node::{Children, Node, NodeKind};
use crate::pattern::PathStep;

/// Id given to empty string scalars.
pub const EMPTY_STRING_ID: &str = "\"\"";

/// Document formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    /// Try JSON first, then YAML.
    Auto,
}

impl Format {
    /// Picks a format from a file name, ignoring a trailing `.gz`.
    ///
    /// - `data.json`, `data.json.gz` → `Json`
    /// - `data.yaml`, `data.yml.gz` → `Yaml`
    /// - anything else → `Auto`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);
        if base.ends_with(".json") {
            Format::Json
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Auto
        }
    }
}

/// Loads a JSON or YAML file, decompressing it first when the name ends in
/// `.gz`.
///
/// # Errors
///
/// Fails if the file cannot be read or decompressed, or does not parse in
/// the detected format.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    let format = Format::from_path(path);
    debug!(path = %path.display(), ?format, gzipped = is_gzipped, "loading document");
    parse_str(&content, format)
}

/// Reads a document from standard input.
///
/// Gzip input is recognised by its magic bytes; the format is always
/// detected automatically.
pub fn load_from_stdin() -> Result<Node> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_str(&content, Format::Auto)
        .context("Failed to parse stdin: input is neither valid JSON nor valid YAML")
}

/// Parses document text in the given format.
pub fn parse_str(content: &str, format: Format) -> Result<Node> {
    match format {
        Format::Json => parse_json(content),
        Format::Yaml => parse_yaml(content),
        Format::Auto => parse_json(content).or_else(|_| parse_yaml(content)),
    }
}

pub fn parse_json(content: &str) -> Result<Node> {
    let value: JsonValue = serde_json::from_str(content).context("Failed to parse JSON")?;
    Ok(from_json_value(&value)?)
}

pub fn parse_yaml(content: &str) -> Result<Node> {
    let value: YamlValue = serde_yaml::from_str(content).context("Failed to parse YAML")?;
    Ok(from_yaml_value(&value)?)
}

/// Converts a `serde_json::Value` into a tree rooted at `$`.
pub fn from_json_value(value: &JsonValue) -> Result<Node, NodeError> {
    convert_json(value, "$")
}

/// Converts a `serde_yaml::Value` into a tree rooted at `$`.
///
/// Tags are dropped. Non-string mapping keys are rendered as YAML text.
pub fn from_yaml_value(value: &YamlValue) -> Result<Node, NodeError> {
    convert_yaml(value, "$")
}

fn child_location(location: &str, step: PathStep<'_>) -> String {
    format!("{}{}", location, step)
}

fn scalar_id(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_STRING_ID
    } else {
        text
    }
}

fn convert_json(value: &JsonValue, location: &str) -> Result<Node, NodeError> {
    match value {
        JsonValue::Null => Node::leaf("null"),
        JsonValue::Bool(b) => Node::leaf(b.to_string()),
        JsonValue::Number(n) => Node::leaf(n.to_string()),
        JsonValue::String(s) => Node::leaf(scalar_id(s)),
        JsonValue::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    convert_json(item, &child_location(location, PathStep::Index(index)))
                        .map(Arc::new)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Node::build(NodeKind::Array, location, Children::Sequence(children))
        }
        JsonValue::Object(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, item) in map {
                let child = convert_json(item, &child_location(location, PathStep::Key(key)))?;
                entries.insert(key.clone(), Arc::new(child));
            }
            Node::build(NodeKind::Object, location, Children::Mapping(entries))
        }
    }
}

fn convert_yaml(value: &YamlValue, location: &str) -> Result<Node, NodeError> {
    match value {
        YamlValue::Null => Node::leaf("null"),
        YamlValue::Bool(b) => Node::leaf(b.to_string()),
        YamlValue::Number(n) => Node::leaf(n.to_string()),
        YamlValue::String(s) => Node::leaf(scalar_id(s)),
        YamlValue::Sequence(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    convert_yaml(item, &child_location(location, PathStep::Index(index)))
                        .map(Arc::new)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Node::build(NodeKind::Array, location, Children::Sequence(children))
        }
        YamlValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, item) in map {
                let key = yaml_key(key);
                let child = convert_yaml(item, &child_location(location, PathStep::Key(&key)))?;
                entries.insert(key, Arc::new(child));
            }
            Node::build(NodeKind::Object, location, Children::Mapping(entries))
        }
        YamlValue::Tagged(tagged) => convert_yaml(&tagged.value, location),
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip file (file may be corrupted)")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip data from stdin")?;
    Ok(content)
}
