//! Root Kconfig catalog assembly.
//!
//! Produces the top-level menu that `menuconfig` is pointed at: a fixed
//! project menu naming the application, followed by `source` directives
//! for whichever of the app, board and src directories carry their own
//! `Kconfig` fragment.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output;
use crate::verbose::vprintln;

/// File name of a menu fragment.
pub const FRAGMENT_NAME: &str = "Kconfig";

/// Directories that may contribute menu fragments.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub app: Option<&'a Path>,
    pub board: Option<&'a Path>,
    pub src: &'a Path,
}

impl CatalogSources<'_> {
    /// Project name shown in the menu: the last component of the app directory.
    ///
    /// Trailing separators are ignored. Without an app directory the name is empty.
    pub fn app_name(&self) -> String {
        self.app
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `Kconfig` fragments that exist, in app, board, src order.
    pub fn fragments(&self) -> Vec<PathBuf> {
        [self.app, self.board, Some(self.src)]
            .into_iter()
            .flatten()
            .map(|dir| dir.join(FRAGMENT_NAME))
            .filter(|path| {
                let exists = path.exists();
                vprintln!(
                    "  {} {}",
                    if exists { "sourcing" } else { "no fragment at" },
                    path.display()
                );
                exists
            })
            .collect()
    }
}

/// The fixed project menu for `app_name`, ending in a blank line.
pub fn project_menu(app_name: &str) -> String {
    format!(
        r#"# CatalogKconfig
menu "configure project"
    config PROJECT_NAME
        string "PROJECT_NAME"
        default "{app_name}"
    config PROJECT_VERSION
        string "PROJECT_VERSION"
        default "1.0.0"
    choice
        prompt "Choose framework"
        default PROJECT_FRAMEWORK_BASE

        config PROJECT_FRAMEWORK_BASE
            bool "base"

        config PROJECT_FRAMEWORK_ARDUINO
            bool "arduino"
    endchoice
    config FRAMEWORK_CHOICE
        string
        default "base" if PROJECT_FRAMEWORK_BASE
        default "arduino" if PROJECT_FRAMEWORK_ARDUINO
endmenu

"#
    )
}

/// Full catalog text for `sources`.
pub fn render(sources: &CatalogSources<'_>) -> String {
    let mut out = project_menu(&sources.app_name());
    for fragment in sources.fragments() {
        out.push_str(&format!("source \"{}\"\n", fragment.display()));
    }
    out
}

/// Render and write the catalog, creating the output directory if needed.
pub fn generate(sources: &CatalogSources<'_>, output: &Path) -> Result<()> {
    output::ensure_parent(output)?;
    output::write_atomic(output, &render(sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn app_name_from_directory() {
        let sources = CatalogSources {
            app: Some(Path::new("apps/tuya_demo/myapp/")),
            board: None,
            src: Path::new("src"),
        };
        assert_eq!(sources.app_name(), "myapp");

        let no_app = CatalogSources { app: None, ..sources };
        assert_eq!(no_app.app_name(), "");
    }

    #[test]
    fn menu_without_fragments_has_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("myapp");
        fs::create_dir(&app).unwrap();
        let src = dir.path().join("src");

        let text = render(&CatalogSources {
            app: Some(app.as_path()),
            board: None,
            src: &src,
        });

        assert!(text.contains("        default \"myapp\"\n"));
        assert!(text.ends_with("endmenu\n\n"));
        assert!(!text.contains("source \""));
    }

    #[test]
    fn fragments_are_sourced_in_app_board_src_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("apps/demo");
        let board = dir.path().join("boards/T5AI");
        let src = dir.path().join("src");
        for d in [&app, &board, &src] {
            fs::create_dir_all(d).unwrap();
            fs::write(d.join(FRAGMENT_NAME), "").unwrap();
        }

        let text = render(&CatalogSources {
            app: Some(app.as_path()),
            board: Some(board.as_path()),
            src: &src,
        });

        let expected_tail = format!(
            "endmenu\n\nsource \"{}\"\nsource \"{}\"\nsource \"{}\"\n",
            app.join("Kconfig").display(),
            board.join("Kconfig").display(),
            src.join("Kconfig").display(),
        );
        assert!(text.ends_with(&expected_tail), "got:\n{text}");
    }

    #[test]
    fn board_without_fragment_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let board = dir.path().join("boards/ESP32");
        let src = dir.path().join("src");
        fs::create_dir_all(&board).unwrap();
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(FRAGMENT_NAME), "").unwrap();

        let sources = CatalogSources {
            app: None,
            board: Some(board.as_path()),
            src: &src,
        };
        assert_eq!(sources.fragments(), vec![src.join("Kconfig")]);
    }

    #[test]
    fn generate_creates_output_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("myapp");
        let out = dir.path().join("cache/deep/Kconfig");

        let sources = CatalogSources {
            app: Some(app.as_path()),
            board: None,
            src: Path::new("does-not-exist"),
        };
        generate(&sources, &out).unwrap();
        fs::write(&out, "stale").unwrap();
        generate(&sources, &out).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), project_menu("myapp"));
    }
}
