//! `.config` → C header.
//!
//! Declarations become `#define`s with the `CONFIG_` prefix dropped and
//! `y` mapped to `1`; `#` comments become `//` comments. The generated
//! body is spliced into an optional template at [`CONTEXT_MARKER`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dotconfig::{self, ConfigFile, ConfigLine};
use crate::error::{KconfError, Result};
use crate::output;
use crate::params::ParamList;
use crate::verbose::{Timer, vprintln};

/// Placeholder in the header template that receives the generated defines.
pub const CONTEXT_MARKER: &str = "@CONFIG_HEADER_CONTEXT@";

/// Translate one classified line to header syntax.
pub fn header_line(line: &ConfigLine<'_>) -> String {
    match line {
        ConfigLine::Declaration(decl) => {
            let value = if decl.raw_value == "y" { "1" } else { decl.raw_value };
            format!("#define {} {value}", decl.bare_key())
        }
        ConfigLine::Opaque(text) => {
            let text = text.trim();
            match text.strip_prefix('#') {
                Some(rest) => format!("//{rest}"),
                None => text.to_string(),
            }
        }
    }
}

/// Parameter defines followed by the translated inputs, one line each.
pub fn render_body(params: &ParamList, files: &[ConfigFile]) -> Result<String> {
    let mut body = String::new();
    for (key, value) in params.iter() {
        body.push_str(&format!("#define {key} \"{value}\"\n"));
    }
    for file in files {
        for line in file.parse()? {
            body.push_str(&header_line(&line));
            body.push('\n');
        }
    }
    Ok(body)
}

/// Splice `body` into `template`, or use it alone when there is no template.
/// The result always ends with one extra newline.
pub fn apply_template(template: Option<&str>, body: &str) -> String {
    let mut out = match template {
        Some(t) => t.replace(CONTEXT_MARKER, body),
        None => body.to_string(),
    };
    out.push('\n');
    out
}

/// Load the template if it exists. A missing template is not an error.
pub fn load_template(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            vprintln!("  using header template {}", path.display());
            Ok(Some(text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            vprintln!("  no header template at {}, writing defines only", path.display());
            Ok(None)
        }
        Err(e) => Err(KconfError::io("read", path, e)),
    }
}

/// Read inputs and the template, then write the header to `output`.
pub fn generate(
    inputs: &[PathBuf],
    output: &Path,
    template: &Path,
    params: &ParamList,
) -> Result<()> {
    let _t = Timer::start("header generation");
    let files = dotconfig::read_inputs(inputs)?;
    let body = render_body(params, &files)?;
    let template = load_template(template)?;
    output::write_atomic(output, &apply_template(template.as_deref(), &body))
}
