//! Build parameter lists and their merge with `.config` values.
//!
//! Parameters arrive on the command line as a single string:
//!
//! ```text
//! KEY:::"VALUE"***OTHER:::"VALUE 2"
//! ```
//!
//! Entries are separated by `***` and split on the first `:::`. The
//! `params` command merges them with the declarations of the inputs and
//! emits three views of the result: a `.config`, a CMake fragment and JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::dotconfig::{self, ConfigFile, ConfigLine};
use crate::error::Result;
use crate::output;
use crate::verbose::{Timer, vprintln};

const ENTRY_SEPARATOR: &str = "***";
const KEY_SEPARATOR: &str = ":::";

/// Ordered `KEY -> value` list parsed from `--params`.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamList {
    entries: Vec<(String, String)>,
}

impl ParamList {
    /// Parse the `***` / `:::` list. Entries without `:::` are skipped.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        for entry in text.split(ENTRY_SEPARATOR) {
            let Some((key, value)) = entry.trim().split_once(KEY_SEPARATOR) else {
                continue;
            };
            list.insert(key, value.trim_matches('"'));
        }
        list
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Entries in first-seen key order, as `(key, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A merged value, typed from how it was written in the `.config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(u64),
}

impl ParamValue {
    /// Type a raw `.config` value: quoted → string, `y` → true, decimal
    /// digits → integer, anything else (hex, bare words) → string as written.
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with('"') {
            return Self::Str(raw.trim_matches('"').to_string());
        }
        if raw == "y" {
            return Self::Bool(true);
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse() {
                return Self::Int(n);
            }
        }
        Self::Str(raw.to_string())
    }

    /// Text used inside `set(KEY "...")`.
    pub fn cmake_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Bool(true) => "y".to_string(),
            Self::Bool(false) => "n".to_string(),
            Self::Int(n) => n.to_string(),
        }
    }
}

/// Parameters merged with `.config` declarations, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    /// Seed a set with every `-p` entry as a string value.
    pub fn from_params(params: &ParamList) -> Self {
        Self {
            entries: params
                .iter()
                .map(|(k, v)| (k.to_string(), ParamValue::Str(v.to_string())))
                .collect(),
        }
    }

    /// Insert or overwrite; an existing key keeps its position.
    pub fn set(&mut self, key: &str, value: ParamValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Number of distinct keys.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// `set(KEY "VALUE")` lines.
    pub fn cmake_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, v)| format!("set({k} \"{}\")", v.cmake_text()))
            .collect()
    }

    /// Pretty JSON object with 4-space indentation and literal UTF-8.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Serialize for ParamSet {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The three files written by [`generate`], derived from one output stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamOutputs {
    pub config: PathBuf,
    pub cmake: PathBuf,
    pub json: PathBuf,
}

impl ParamOutputs {
    /// `<stem>.config`, `<stem>.cmake`, `<stem>.json`. The suffix is appended,
    /// not substituted, so `build/params.v1` yields `build/params.v1.cmake`.
    pub fn from_stem(stem: &Path) -> Self {
        let with = |ext: &str| {
            let mut s = stem.as_os_str().to_os_string();
            s.push(ext);
            PathBuf::from(s)
        };
        Self {
            config: with(".config"),
            cmake: with(".cmake"),
            json: with(".json"),
        }
    }
}

/// Rendered contents for each output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedParams {
    pub config: String,
    pub cmake: String,
    pub json: String,
    pub merged: ParamSet,
}

/// Merge `params` with the declarations in `files` and render all outputs.
pub fn render(params: &ParamList, files: &[ConfigFile]) -> Result<RenderedParams> {
    let mut config_lines: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect();
    let mut merged = ParamSet::from_params(params);

    for file in files {
        for line in file.parse()? {
            if let ConfigLine::Declaration(decl) = line {
                config_lines.push(format!("{}={}", decl.key, decl.raw_value));
                merged.set(decl.key, ParamValue::classify(decl.raw_value));
            }
        }
    }

    let json = merged.to_json()?;

    Ok(RenderedParams {
        config: output::render_lines(&config_lines),
        cmake: output::render_lines(&merged.cmake_lines()),
        json,
        merged,
    })
}

/// Read inputs, merge with `params` and write all three outputs.
///
/// Everything is rendered and staged before the first destination is
/// replaced, so a failed write keeps the previous outputs.
pub fn generate(inputs: &[PathBuf], stem: &Path, params: &ParamList) -> Result<ParamOutputs> {
    let _t = Timer::start("params merge");
    let files = dotconfig::read_inputs(inputs)?;
    let rendered = render(params, &files)?;
    vprintln!("  merged {} parameters", rendered.merged.entry_count());

    let outputs = ParamOutputs::from_stem(stem);
    output::write_all_atomic(&[
        (outputs.config.as_path(), rendered.config.as_str()),
        (outputs.cmake.as_path(), rendered.cmake.as_str()),
        (outputs.json.as_path(), rendered.json.as_str()),
    ])?;
    Ok(outputs)
}
