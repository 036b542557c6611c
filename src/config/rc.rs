use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const RC_FILE: &str = ".vimdojorc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DojoConfig {
    pub player_name: String,
    pub show_line_numbers: bool,
    pub bell_on_error: bool,
}

impl Default for DojoConfig {
    fn default() -> Self {
        Self {
            player_name: "student".to_string(),
            show_line_numbers: true,
            bell_on_error: false,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .vimdojorc in:
    /// 1. Current directory
    /// 2. Home directory (~/.vimdojorc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file; missing or unreadable files yield defaults.
    pub fn load_config() -> DojoConfig {
        let mut config = DojoConfig::default();

        if let Some(rc_path) = Self::get_rc_path() {
            match fs::read_to_string(&rc_path) {
                Ok(content) => {
                    debug!(path = %rc_path.display(), "loaded rc file");
                    Self::parse_config_content(&content, &mut config);
                }
                Err(_) => {
                    // Silently fail if we can't read the file
                }
            }
        }

        config
    }

    /// Parse the content of an RC file
    fn parse_config_content(content: &str, config: &mut DojoConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    /// Parse a single key=value line
    fn parse_config_line(line: &str, config: &mut DojoConfig) {
        // Remove inline comments
        let line = if let Some(pos) = line.find('#') {
            &line[..pos]
        } else {
            line
        }
        .trim();

        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "player_name" | "name" => {
                if !value.is_empty() {
                    config.player_name = value.to_string();
                }
            }
            "line_numbers" | "show_line_numbers" | "number" => {
                config.show_line_numbers = Self::parse_bool(value);
            }
            "bell" | "bell_on_error" => {
                config.bell_on_error = Self::parse_bool(value);
            }
            _ => {} // Unknown setting, ignore
        }
    }

    fn parse_bool(value: &str) -> bool {
        value == "true" || value == "1" || value == "yes"
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# vim-dojo configuration file (.vimdojorc)
# Lines starting with # are comments

player_name=student     # Name shown on the score screen
line_numbers=true       # Show line numbers in the practice buffer
bell_on_error=false     # Ring the terminal bell on unknown keys
"#
        .to_string()
    }
}
