//! Archive extraction through external unrar / 7-Zip binaries

use super::traits::{ArchiveExtractor, ExtractResult};
use crate::config::ExtractorConfig;
use crate::types::ArchiveFamily;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Extractor that runs an external archiver as a child process
///
/// The command line is built as an argument vector, never through a shell:
///
/// - RAR family: `<cmd> <args…> <archive> <dest>` (unrar convention)
/// - ZIP family: `<cmd> <args…> <archive> -o<dest>` (7-Zip convention)
///
/// The child inherits stdout/stderr so the archiver output ends up in the
/// NZBGet log next to ours. There is no timeout.
pub struct CliExtractor {
    family: ArchiveFamily,
    config: ExtractorConfig,
    binary_path: PathBuf,
}

impl CliExtractor {
    /// Create an extractor for `family` from its configuration
    ///
    /// The command is looked up with `which` once. If it cannot be found the
    /// configured value is used as-is and the launch reports the problem.
    pub fn new(family: ArchiveFamily, config: ExtractorConfig) -> Self {
        let binary_path = match which::which(&config.command) {
            Ok(path) => {
                debug!(command = %config.command, resolved = ?path, "resolved extractor binary");
                path
            }
            Err(e) => {
                debug!(command = %config.command, error = %e, "extractor binary not found in PATH");
                PathBuf::from(&config.command)
            }
        };

        Self {
            family,
            config,
            binary_path,
        }
    }

    /// Arguments passed to the binary for one archive
    pub fn command_args(&self, archive: &Path, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.config.args.iter().map(OsString::from).collect();
        args.push(archive.as_os_str().to_owned());

        match self.family {
            ArchiveFamily::Rar => args.push(dest.as_os_str().to_owned()),
            ArchiveFamily::Zip => {
                let mut switch = OsString::from("-o");
                switch.push(dest.as_os_str());
                args.push(switch);
            }
        }

        args
    }

    /// Printable form of the command line, for the log only
    pub fn display_command(&self, archive: &Path, dest: &Path) -> String {
        let mut line = format!("\"{}\"", self.config.command);
        for arg in &self.config.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(&format!(" \"{}\"", archive.display()));
        match self.family {
            ArchiveFamily::Rar => line.push_str(&format!(" \"{}\"", dest.display())),
            ArchiveFamily::Zip => line.push_str(&format!(" -o\"{}\"", dest.display())),
        }
        line
    }
}

#[async_trait]
impl ArchiveExtractor for CliExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> crate::Result<ExtractResult> {
        info!("Executing command: {}", self.display_command(archive, dest));

        let status = Command::new(&self.binary_path)
            .args(self.command_args(archive, dest))
            .status()
            .await
            .map_err(|e| crate::Error::ExternalTool(format!("{}: {}", self.config.command, e)))?;

        Ok(match status.code() {
            Some(code) if self.config.is_success(code) => ExtractResult::succeeded(code),
            code => ExtractResult::failed(code),
        })
    }

    fn name(&self) -> &'static str {
        self.family.tool_name()
    }
}
