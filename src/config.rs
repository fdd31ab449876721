//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Batch runner configuration, built from command-line arguments.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// JSON file holding the raw emails to triage.
    pub input_path: PathBuf,
    /// Where the flattened results are written.
    pub output_path: PathBuf,
}

impl BatchConfig {
    /// Build a config from positional arguments: `<input.json> [output.json]`.
    ///
    /// Returns `Ok(None)` when no arguments were given (demo mode).
    /// The output path defaults to `triage_results.json` next to the input.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, ConfigError> {
        let mut args = args.iter();
        let Some(input) = args.next() else {
            return Ok(None);
        };

        let input_path = PathBuf::from(input);
        if input_path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(ConfigError::InvalidValue {
                key: "input".into(),
                message: format!("expected a .json file, got '{input}'"),
            });
        }

        let output_path = match args.next() {
            Some(path) => PathBuf::from(path),
            None => input_path.with_file_name("triage_results.json"),
        };

        Ok(Some(Self {
            input_path,
            output_path,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_means_demo_mode() {
        assert!(BatchConfig::from_args(&[]).unwrap().is_none());
    }

    #[test]
    fn output_defaults_next_to_input() {
        let config = BatchConfig::from_args(&["data/emails.json".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(config.input_path, PathBuf::from("data/emails.json"));
        assert_eq!(config.output_path, PathBuf::from("data/triage_results.json"));
    }

    #[test]
    fn explicit_output_is_respected() {
        let config = BatchConfig::from_args(&[
            "emails.json".to_string(),
            "out/results.json".to_string(),
        ])
        .unwrap()
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/results.json"));
    }

    #[test]
    fn non_json_input_is_rejected() {
        let err = BatchConfig::from_args(&["emails.csv".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
