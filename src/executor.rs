//! A narrow boundary around the external downloader process.

use crate::error::{Error, Result};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

/// The external downloader binary, resolved through PATH.
pub const DOWNLOADER_BIN: &str = "yt-dlp";

/// How long a single downloader invocation may run before being killed.
/// Subtitle conversion on long videos is the slowest step by far.
pub const INVOCATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Represents a single invocation of an external command.
#[derive(Debug, Clone, PartialEq)]
pub struct Executor {
    /// The path to the command executable.
    pub executable_path: PathBuf,
    /// The timeout for the process.
    pub timeout: Duration,
    /// The arguments to pass to the command.
    pub args: Vec<String>,
}

/// Represents the output of a finished process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    /// The stdout of the process.
    pub stdout: String,
    /// The stderr of the process.
    pub stderr: String,
    /// The exit code of the process.
    pub code: i32,
}

impl Executor {
    /// Creates an executor for one downloader invocation with the given arguments.
    pub fn downloader<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            executable_path: PathBuf::from(DOWNLOADER_BIN),
            timeout: INVOCATION_TIMEOUT,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Executes the command and returns the captured output.
    ///
    /// # Errors
    ///
    /// This function will return an error if the command could not be spawned,
    /// exited with a non-zero status, or timed out.
    pub async fn execute(&self) -> Result<ProcessOutput> {
        println!(
            "\n▶  {} {}\n",
            self.executable_path.display(),
            self.args.join(" ")
        );
        debug!("Executing command: {:?}", self);

        let mut command = tokio::process::Command::new(&self.executable_path);
        command.stdout(std::process::Stdio::piped());
        command.stderr(std::process::Stdio::piped());

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(0x08000000);
        }

        command.args(&self.args);
        let mut child = command.spawn()?;

        // Drain stdout and stderr concurrently so a large JSON dump can never
        // fill the pipe and hang the child.
        let stdout_handle = child
            .stdout
            .take()
            .ok_or_else(|| Error::Command("Failed to capture stdout".to_string()))?;
        let stderr_handle = child
            .stderr
            .take()
            .ok_or_else(|| Error::Command("Failed to capture stderr".to_string()))?;

        let stdout_task = tokio::spawn(async move {
            let mut buffer = Vec::new();
            tokio::io::copy(&mut tokio::io::BufReader::new(stdout_handle), &mut buffer).await?;
            Ok::<Vec<u8>, std::io::Error>(buffer)
        });

        let stderr_task = tokio::spawn(async move {
            let mut buffer = Vec::new();
            tokio::io::copy(&mut tokio::io::BufReader::new(stderr_handle), &mut buffer).await?;
            Ok::<Vec<u8>, std::io::Error>(buffer)
        });

        let exit_status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(result) => result?,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    log::error!("Failed to kill process after timeout: {}", e);
                }
                return Err(Error::Timeout(self.timeout));
            }
        };

        let stdout_bytes = stdout_task.await??;
        let stderr_bytes = stderr_task.await??;

        let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();

        let code = exit_status.code().unwrap_or(-1);
        if exit_status.success() {
            return Ok(ProcessOutput {
                stdout,
                stderr,
                code,
            });
        }

        Err(Error::Command(format!(
            "process exited with code {}: {}",
            code,
            stderr.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_of_successful_command() {
        let executor = Executor {
            executable_path: PathBuf::from("echo"),
            timeout: Duration::from_secs(5),
            args: vec!["hello".to_string()],
        };

        let output = executor.execute().await.unwrap();
        assert_eq!(output.code, 0);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let executor = Executor {
            executable_path: PathBuf::from("false"),
            timeout: Duration::from_secs(5),
            args: vec![],
        };

        let result = executor.execute().await;
        assert!(matches!(result, Err(Error::Command(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let executor = Executor {
            executable_path: PathBuf::from("sleep"),
            timeout: Duration::from_millis(100),
            args: vec!["5".to_string()],
        };

        let result = executor.execute().await;
        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
