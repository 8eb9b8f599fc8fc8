use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, validate_config, ApiConfig, Config};
use crate::intake::{prompt_with_default, prompt_yes_no};
use crate::quiz::Language;

/// Write the config as YAML, atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard on stdin/stdout.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_init_wizard_with(&mut input, &mut output, default_path)
}

/// The wizard itself. Returns the path written, or None if the user declined
/// to overwrite an existing file.
pub fn run_init_wizard_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_path: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    writeln!(output)?;
    writeln!(output, "Archetype Quiz Configuration Wizard")?;
    writeln!(output, "===================================")?;
    writeln!(output)?;

    let defaults = Config::default();

    let language = loop {
        let answer = prompt_with_default(
            input,
            output,
            "Language (fa or en)",
            defaults.language.as_str(),
        )?;
        match answer.parse::<Language>() {
            Ok(lang) => break lang,
            Err(e) => writeln!(output, "  Invalid: {}. Try again.", e)?,
        }
    };

    writeln!(output)?;
    writeln!(
        output,
        "Progress and results can be saved on a quiz server as well as locally."
    )?;
    let sync = prompt_yes_no(input, output, "Sync with the quiz server?", defaults.sync)?;

    let mut api = ApiConfig::default();
    if sync {
        loop {
            api.base_url = prompt_with_default(input, output, "Server URL", &defaults.api.base_url)?;
            api.timeout =
                prompt_with_default(input, output, "Request timeout", &defaults.api.timeout)?;

            let candidate = Config {
                api: api.clone(),
                ..Config::default()
            };
            match validate_config(&candidate) {
                Ok(()) => break,
                Err(errors) => {
                    for e in errors {
                        writeln!(output, "  Invalid: {}", e)?;
                    }
                    writeln!(output, "  Try again.")?;
                }
            }
        }
    }

    let default_config_path = default_path.unwrap_or_else(get_config_path);
    writeln!(output)?;
    let path_str = prompt_with_default(
        input,
        output,
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            input,
            output,
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            writeln!(output, "Aborted.")?;
            return Ok(None);
        }
    }

    let config = Config {
        api,
        sync,
        language,
        data_dir: None,
    };
    write_config(&config_path, &config)?;

    writeln!(output)?;
    writeln!(output, "Config written to {}", config_path.display())?;
    writeln!(output, "Run `archetype-quiz` to take the quiz.")?;

    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::io::Cursor;

    #[test]
    fn test_wizard_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let script = format!("en\ny\nhttps://quiz.example.com/api\n5s\n{}\n", path.display());

        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        let written = run_init_wizard_with(&mut input, &mut output, None).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.language, Language::En);
        assert!(config.sync);
        assert_eq!(config.api.base_url, "https://quiz.example.com/api");
        assert_eq!(config.api.timeout, "5s");
    }

    #[test]
    fn test_wizard_reasks_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        // bad language, then bad url and timeout, then defaults
        let script = "de\n\n\nnot-a-url\nsoon\n\n\n\n";
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run_init_wizard_with(&mut input, &mut output, Some(path.clone())).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("api.base_url"));
        assert!(printed.contains("api.timeout"));

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_wizard_keeps_existing_file_when_declined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "sync: false\n").unwrap();

        let mut input = Cursor::new("fa\nn\n\nn\n".to_string());
        let mut output = Vec::new();
        let written = run_init_wizard_with(&mut input, &mut output, Some(path.clone())).unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "sync: false\n");
    }
}
