//! `.config` → CMake variable assignments.
//!
//! Every declaration becomes `set(<key> "<value>")` with the value's outer
//! quotes normalised; every other line passes through untouched. Inputs
//! are concatenated in the order given.

use std::path::{Path, PathBuf};

use crate::dotconfig::{self, ConfigFile, ConfigLine};
use crate::error::Result;
use crate::output;
use crate::verbose::{Timer, vprintln};

/// Translate one classified line.
pub fn translate_line(line: &ConfigLine<'_>) -> String {
    match line {
        ConfigLine::Declaration(decl) => {
            format!("set({} \"{}\")", decl.key, decl.unquoted_value())
        }
        ConfigLine::Opaque(text) => (*text).to_string(),
    }
}

/// Translate all files, one output line per input line.
///
/// Fails on the first malformed declaration; nothing is returned for the
/// lines before it.
pub fn translate(files: &[ConfigFile]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for file in files {
        let lines = file.parse()?;
        vprintln!("  {}: {} lines", file.path.display(), lines.len());
        out.extend(lines.iter().map(translate_line));
    }
    Ok(out)
}

/// Read `inputs`, translate them and write `output`. Returns the line count.
pub fn generate(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let _t = Timer::start("cmake translation");
    let files = dotconfig::read_inputs(inputs)?;
    let lines = translate(&files)?;
    output::write_atomic(output, &output::render_lines(&lines))?;
    Ok(lines.len())
}
