//! Loading and saving YAML pipeline configs

use super::schema::PipelineSpec;
use super::validate::validate_config;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load, parse and validate a YAML config file
///
/// # Example
///
/// ```no_run
/// use matheal::config::load_config;
///
/// let spec = load_config("matheal.yaml")?;
/// println!("epochs: {}", spec.training.epochs);
/// # Ok::<(), matheal::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineSpec> {
    let path = config_path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound { path: path.to_path_buf() });
    }

    let yaml_content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;

    let spec: PipelineSpec = serde_yaml::from_str(&yaml_content).map_err(|e| {
        Error::ConfigParsing { path: path.to_path_buf(), message: e.to_string() }
    })?;

    validate_config(&spec)?;
    Ok(spec)
}

/// Load a config if a path is given, otherwise use validated defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<PipelineSpec> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            let spec = PipelineSpec::default();
            validate_config(&spec)?;
            Ok(spec)
        }
    }
}

/// Serialize a config to YAML at `path`
pub fn save_config<P: AsRef<Path>>(spec: &PipelineSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(spec)
        .map_err(|e| Error::Serialization { message: format!("YAML serialization failed: {e}") })?;
    fs::write(path, yaml).map_err(|e| Error::io(format!("writing config {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_valid_config() {
        let yaml = r"
data:
  path: data/other.csv
training:
  epochs: 3
  batch_size: 4
";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let spec = load_config(file.path()).unwrap();
        assert_eq!(spec.training.epochs, 3);
        assert_eq!(spec.training.batch_size, 4);
        assert_eq!(spec.data.path, std::path::PathBuf::from("data/other.csv"));
    }

    #[test]
    fn test_load_missing_config() {
        let err = load_config("definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"training: [unclosed").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParsing { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"training:\n  batch_size: 0\n").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigValue { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let spec = load_or_default(None).unwrap();
        assert_eq!(spec, PipelineSpec::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matheal.yaml");
        let mut spec = PipelineSpec::default();
        spec.training.epochs = 7;

        save_config(&spec, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, spec);
    }
}
