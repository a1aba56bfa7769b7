use std::path::Path;

use anyhow::{Context, Result};

use super::types::SheetConfig;

/// Load a config file from the given path.
pub fn load_config(path: &Path) -> Result<SheetConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: SheetConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    if config.version != 1 {
        anyhow::bail!(
            "unsupported config version {} in {} (expected 1)",
            config.version,
            path.display()
        );
    }

    Ok(config)
}

/// Compile exclude patterns, failing on the first invalid one.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("invalid exclude pattern: {}", p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CompressionLevel;
    use crate::config::{CompressConfig, DEFAULT_MAX_DIMENSION};

    #[test]
    fn test_defaults_from_empty_object() {
        let config: SheetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SheetConfig::default());
        assert_eq!(config.max_dimension, DEFAULT_MAX_DIMENSION);
    }

    #[test]
    fn test_partial_config() {
        let config: SheetConfig = serde_json::from_str(
            r#"{ "max_dimension": 1024, "prepend_path": "ui", "exclude": ["wip/*"], "compress": "max" }"#,
        )
        .unwrap();

        assert_eq!(config.max_dimension, 1024);
        assert_eq!(config.prepend_path.as_deref(), Some("ui"));
        assert_eq!(config.exclude, vec!["wip/*"]);
        assert!(!config.opaque);
        assert_eq!(config.compress, Some(CompressConfig::Max("max".to_string())));
    }

    #[test]
    fn test_compress_config_level() {
        assert_eq!(CompressConfig::Level(3).level(), Ok(CompressionLevel::Level(3)));
        assert_eq!(
            CompressConfig::Max("max".to_string()).level(),
            Ok(CompressionLevel::Max)
        );
        assert!(CompressConfig::Level(9).level().is_err());
        assert!(CompressConfig::Max("fastest".to_string()).level().is_err());
    }

    #[test]
    fn test_load_config_file() {
        let path = std::env::temp_dir().join(format!("sheetpack-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "version": 1, "opaque": true, "compress": 4 }"#).unwrap();

        let config = load_config(&path);
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert!(config.opaque);
        assert_eq!(config.compress, Some(CompressConfig::Level(4)));
    }

    #[test]
    fn test_load_config_rejects_unknown_version() {
        let path =
            std::env::temp_dir().join(format!("sheetpack-config-v2-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "version": 2 }"#).unwrap();

        let result = load_config(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn test_compile_excludes() {
        let patterns = compile_excludes(&["*.bak.png".to_string(), "wip/**".to_string()]).unwrap();
        assert!(patterns[0].matches("hero.bak.png"));
        assert!(patterns[1].matches("wip/a/b.png"));

        assert!(compile_excludes(&["[unclosed".to_string()]).is_err());
    }
}
