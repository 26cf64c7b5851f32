use crate::error::{Result, SeqRipError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Build/platform variants of the game executables, scanned in this order.
pub const DEFAULT_INPUTS: [&str; 9] = [
    "AePc",
    "AePcDemo",
    "AePsxCd1",
    "AePsxCd2",
    "AePsxDemo",
    "AoPc",
    "AoPcDemo",
    "AoPsx",
    "AoPsxDemo",
];

pub const DEFAULT_MIN_LENGTH: usize = 4;
pub const DEFAULT_SUFFIX: &str = ".SEQ";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scan: ScanConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScanConfig {
    pub min_length: usize,
    pub suffix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    pub inputs: Vec<PathBuf>,
    pub output_extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
}

/// One input binary and the file its matches are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl BatchEntry {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// `AePc` -> `AePc.txt`. The extension is appended, never substituted.
    pub fn from_identifier<P: AsRef<Path>>(identifier: P, extension: &str) -> Self {
        let input = identifier.as_ref().to_path_buf();
        let mut output = OsString::from(input.as_os_str());
        output.push(".");
        output.push(extension);

        Self {
            input,
            output: PathBuf::from(output),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inputs: DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
            output_extension: "txt".to_string(),
            output_directory: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SeqRipError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SeqRipError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SeqRipError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["seqrip.toml", "seqrip.config.toml", ".seqrip.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref inputs) = cli_args.inputs {
            if !inputs.is_empty() {
                self.batch.inputs = inputs.clone();
            }
        }

        if let Some(min_length) = cli_args.min_length {
            self.scan.min_length = min_length;
        }

        if let Some(ref suffix) = cli_args.suffix {
            self.scan.suffix = suffix.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.batch.output_directory = Some(output_dir.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SeqRipError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SeqRipError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.min_length == 0 {
            return Err(SeqRipError::Config {
                message: "Minimum string length must be greater than 0".to_string(),
            });
        }

        if self.scan.suffix.is_empty() {
            return Err(SeqRipError::Config {
                message: "Suffix must not be empty".to_string(),
            });
        }

        if self.batch.inputs.is_empty() {
            return Err(SeqRipError::Config {
                message: "At least one input file must be specified".to_string(),
            });
        }

        if self.batch.output_extension.is_empty() {
            return Err(SeqRipError::Config {
                message: "Output extension must not be empty".to_string(),
            });
        }

        if let Some(ref dir) = self.batch.output_directory {
            if let Some(parent) = dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(SeqRipError::Config {
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        Ok(())
    }

    /// Resolves the configured inputs into input/output pairs.
    pub fn batch_entries(&self) -> Result<Vec<BatchEntry>> {
        self.batch
            .inputs
            .iter()
            .map(|input| -> Result<BatchEntry> {
                let entry = BatchEntry::from_identifier(input, &self.batch.output_extension);
                match self.batch.output_directory {
                    None => Ok(entry),
                    Some(ref dir) => {
                        let file_name =
                            entry
                                .output
                                .file_name()
                                .ok_or_else(|| SeqRipError::InvalidPath {
                                    path: input.display().to_string(),
                                })?;
                        Ok(BatchEntry::new(entry.input.clone(), dir.join(file_name)))
                    }
                }
            })
            .collect()
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub inputs: Option<Vec<PathBuf>>,
    pub min_length: Option<usize>,
    pub suffix: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(mut self, inputs: Option<Vec<PathBuf>>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_min_length(mut self, min_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
