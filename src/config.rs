//! Configuration for nzbget-unzip
//!
//! NZBGet hands its settings to post-processing scripts as environment
//! variables: `NZBOP_*` are global NZBGet options, `NZBPO_*` are the options
//! of this script and `NZBPP_*` describe the download being processed.
//! [`HookConfig::from_lookup`] reads them through any lookup function so the
//! validation rules can be exercised without touching the process environment.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Marker variable only set by NZBGet v18.0 and later
pub const EXTENSIONS_VAR: &str = "NZBOP_EXTENSIONS";

/// Options that must be present before any work begins
pub const REQUIRED_OPTIONS: &[&str] = &[
    "NZBOP_UNRARCMD",
    "NZBOP_SEVENZIPCMD",
    "NZBPO_UNRARCMD",
    "NZBPO_UNRARARGS",
    "NZBPO_SEVENZIPCMD",
    "NZBPO_SEVENZIPARGS",
    "NZBPO_WAITTIME",
    "NZBPO_DELETELEFTOVER",
    "NZBOP_UNPACK",
    "NZBOP_UNPACKCLEANUPDISK",
    "NZBPP_TOTALSTATUS",
    "NZBPP_DIRECTORY",
];

/// Optional override for the exit codes counted as a successful extraction
pub const SUCCESS_CODES_VAR: &str = "NZBPO_SUCCESSCODES";

/// Exit codes treated as success when nothing else is configured.
///
/// unrar returns 10 when there was nothing to extract (e.g. every file was
/// skipped because it already exists).
pub const DEFAULT_SUCCESS_CODES: &[i32] = &[0, 10];

/// The only `NZBPP_TOTALSTATUS` value that allows unpacking
const TOTAL_STATUS_SUCCESS: &str = "SUCCESS";

/// How to invoke one external extractor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Executable name or path
    pub command: String,

    /// Extra arguments placed before the archive path (e.g. `e -aos`)
    pub args: Vec<String>,

    /// Exit codes counted as success (default: 0 and 10)
    pub success_codes: Vec<i32>,
}

impl ExtractorConfig {
    /// Create a config for `command` with no extra arguments
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            success_codes: DEFAULT_SUCCESS_CODES.to_vec(),
        }
    }

    /// Set the extra arguments from a whitespace separated option string
    pub fn with_args(mut self, args: &str) -> Self {
        self.args = split_args(args);
        self
    }

    /// Whether `code` counts as a successful extraction
    pub fn is_success(&self, code: i32) -> bool {
        self.success_codes.contains(&code)
    }
}

/// Validated settings for a single post-processing run
///
/// `wait_time` and `success_codes` are kept as the host passed them and only
/// parsed once the download is known to be worth unpacking (see
/// [`HookConfig::wait_duration`] and [`HookConfig::success_codes`]).
#[derive(Clone, Debug)]
pub struct HookConfig {
    /// Extractor for RAR-family archives
    pub unrar: ExtractorConfig,

    /// Extractor for ZIP-family archives
    pub sevenzip: ExtractorConfig,

    /// WaitTime option, seconds to pause when UnpackCleanupDisk is on
    pub wait_time: String,

    /// SuccessCodes option, if set
    pub success_codes: Option<String>,

    /// NZBGet's UnpackCleanupDisk option
    pub cleanup_disk: bool,

    /// Delete extracted archives afterwards
    pub delete_leftover: bool,

    /// Overall status of the download (`NZBPP_TOTALSTATUS`)
    pub total_status: String,

    /// Working directory of the download (`NZBPP_DIRECTORY`)
    pub directory: PathBuf,
}

impl HookConfig {
    /// Read and validate the configuration through `lookup`
    ///
    /// Checks are performed in the order NZBGet users know from the log:
    /// host version, required options, Unpack option. Blank extractor
    /// commands fall back to NZBGet's own UnrarCmd/SevenZipCmd settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        check_host(&lookup)?;

        let get = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| Error::MissingOption {
                key: key.to_string(),
            })
        };

        for &key in REQUIRED_OPTIONS {
            get(key)?;
        }

        if get("NZBOP_UNPACK")? != "yes" {
            return Err(Error::Config(
                "You must enable option \"Unpack\" in NZBGet configuration, exiting".to_string(),
            ));
        }

        let mut sevenzip_cmd = get("NZBPO_SEVENZIPCMD")?;
        if sevenzip_cmd.is_empty() {
            debug!("SevenZipCmd setting is blank. Using default NZBGet SevenZipCmd setting");
            sevenzip_cmd = get("NZBOP_SEVENZIPCMD")?;
        }

        let mut unrar_cmd = get("NZBPO_UNRARCMD")?;
        if unrar_cmd.is_empty() {
            debug!("UnrarCmd setting is blank. Using default NZBGet UnrarCmd setting");
            unrar_cmd = get("NZBOP_UNRARCMD")?;
        }

        Ok(Self {
            unrar: ExtractorConfig::new(unrar_cmd).with_args(&get("NZBPO_UNRARARGS")?),
            sevenzip: ExtractorConfig::new(sevenzip_cmd).with_args(&get("NZBPO_SEVENZIPARGS")?),
            wait_time: get("NZBPO_WAITTIME")?,
            success_codes: lookup(SUCCESS_CODES_VAR).filter(|raw| !raw.trim().is_empty()),
            cleanup_disk: is_yes(&get("NZBOP_UNPACKCLEANUPDISK")?),
            delete_leftover: is_yes(&get("NZBPO_DELETELEFTOVER")?),
            total_status: get("NZBPP_TOTALSTATUS")?,
            directory: PathBuf::from(get("NZBPP_DIRECTORY")?),
        })
    }

    /// Verify the host-level pre-conditions for unpacking
    ///
    /// Returns [`Error::Precondition`] when the download did not succeed or
    /// its directory is gone (which happens when a history item is
    /// post-processed again after its files were moved).
    pub fn check_preconditions(&self) -> Result<()> {
        if self.total_status != TOTAL_STATUS_SUCCESS {
            return Err(Error::Precondition(
                "NZBGet download TOTALSTATUS is not SUCCESS, exiting".to_string(),
            ));
        }

        if !self.directory.is_dir() {
            return Err(Error::Precondition(format!(
                "Destination directory {} does not exist, exiting",
                self.directory.display()
            )));
        }

        Ok(())
    }

    /// Working directory of the download
    pub fn working_dir(&self) -> &Path {
        &self.directory
    }

    /// Pause requested by WaitTime; fractional seconds are truncated
    pub fn wait_duration(&self) -> Result<Duration> {
        parse_wait_time(&self.wait_time)
    }

    /// Extractor exit codes counted as success
    pub fn success_codes(&self) -> Result<Vec<i32>> {
        match &self.success_codes {
            Some(raw) => parse_success_codes(raw),
            None => Ok(DEFAULT_SUCCESS_CODES.to_vec()),
        }
    }

    /// Extractor configs for unrar and 7-Zip with the success codes applied
    pub fn extractor_configs(&self) -> Result<(ExtractorConfig, ExtractorConfig)> {
        let codes = self.success_codes()?;
        let mut unrar = self.unrar.clone();
        unrar.success_codes = codes.clone();
        let mut sevenzip = self.sevenzip.clone();
        sevenzip.success_codes = codes;
        Ok((unrar, sevenzip))
    }
}

/// Fail with [`Error::UnsupportedHost`] unless NZBGet v18+ started us
pub fn check_host<F>(lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(EXTENSIONS_VAR) {
        Some(_) => Ok(()),
        None => Err(Error::UnsupportedHost),
    }
}

/// NZBGet boolean options are exactly "yes" or "no"
fn is_yes(value: &str) -> bool {
    value == "yes"
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(String::from).collect()
}

fn parse_wait_time(raw: &str) -> Result<Duration> {
    let invalid = || {
        Error::Config(format!(
            "Invalid WaitTime value '{}', expected a number of seconds",
            raw
        ))
    };

    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(invalid());
    }

    Ok(Duration::from_secs(secs.trunc() as u64))
}

fn parse_success_codes(raw: &str) -> Result<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| Error::Config(format!("Invalid exit code '{}' in SuccessCodes", s)))
        })
        .collect()
}
