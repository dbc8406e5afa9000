//! Terraform CLI wrapper.
//!
//! Each stage is a separate `terraform` process started in the working
//! directory. Output is captured in full; `init` output is additionally
//! echoed line by line while the process runs. No timeout is imposed: a
//! stage blocks until Terraform exits.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::TerraformConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ProvisioningTool, Stage, ToolResult};

/// Output stream of the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogStream {
    Stdout,
    Stderr,
}

/// Runs the Terraform binary as a subprocess.
pub struct TerraformCli {
    config: TerraformConfig,
}

impl TerraformCli {
    pub fn new(config: TerraformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerraformConfig {
        &self.config
    }

    /// Format command for logging.
    fn format_command(&self, args: &[&str]) -> String {
        let mut cmd = self.config.binary.clone();
        for arg in args {
            if arg.contains(' ') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push_str(&format!(" {}", arg));
            }
        }
        cmd
    }

    fn command(&self, args: &[&str], working_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.args(args)
            .current_dir(working_dir)
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Execute and capture output, optionally echoing it as it arrives.
    fn execute(&self, args: &[&str], working_dir: &Path, stream: bool) -> RunnerResult<ToolResult> {
        debug!("Executing: {} (in {:?})", self.format_command(args), working_dir);

        let mut child = self
            .command(args, working_dir)
            .spawn()
            .map_err(|source| RunnerError::SpawnFailed {
                binary: self.config.binary.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RunnerError::ExecutionFailed("stdout was not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| RunnerError::ExecutionFailed("stderr was not captured".to_string()))?;

        let started_at = Utc::now();
        let stdout_handle = collect_lines(stdout, LogStream::Stdout, stream);
        let stderr_handle = collect_lines(stderr, LogStream::Stderr, stream);

        let status = child.wait().map_err(|e| {
            RunnerError::ExecutionFailed(format!("Failed to wait for process: {}", e))
        })?;

        let stdout_output = stdout_handle.join().unwrap_or_default();
        let stderr_output = stderr_handle.join().unwrap_or_default();
        let finished_at = Utc::now();

        let exit_code = status.code().unwrap_or(-1) as i64;
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        if exit_code == 0 {
            info!("terraform {} completed in {}ms", args[0], duration_ms);
        } else {
            error!(
                "terraform {} failed with exit code {} after {}ms",
                args[0], exit_code, duration_ms
            );
        }

        Ok(ToolResult {
            exit_code,
            stdout: stdout_output,
            stderr: stderr_output,
            started_at,
            finished_at,
            duration_ms,
        })
    }

    fn run_stage_blocking(&self, stage: Stage, working_dir: &Path) -> RunnerResult<ToolResult> {
        let stream = stage == Stage::Init && self.config.stream_init;
        self.execute(TerraformConfig::stage_args(stage), working_dir, stream)
    }
}

/// Drain a child stream to EOF on its own thread so neither pipe can fill up and block the child.
///
/// Lines are decoded lossily; a stray non-UTF-8 byte must not stop the drain.
fn collect_lines<R>(reader: R, stream: LogStream, echo: bool) -> JoinHandle<String>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut output = String::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Stopped reading {:?} of child process: {}", stream, e);
                    break;
                }
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if echo {
                match stream {
                    LogStream::Stdout => println!("{}", line),
                    LogStream::Stderr => eprintln!("{}", line),
                }
            }
            output.push_str(line);
            output.push('\n');
        }
        output
    })
}

#[async_trait]
impl ProvisioningTool for TerraformCli {
    async fn is_available(&self) -> RunnerResult<bool> {
        Ok(Command::new(&self.config.binary)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false))
    }

    async fn version(&self) -> RunnerResult<String> {
        let output = Command::new(&self.config.binary)
            .arg("version")
            .output()
            .map_err(|source| RunnerError::SpawnFailed {
                binary: self.config.binary.clone(),
                source,
            })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
        } else {
            Err(RunnerError::ToolNotAvailable(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }

    async fn init(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        info!("Running terraform init in {:?}", working_dir);
        self.run_stage_blocking(Stage::Init, working_dir)
    }

    async fn plan(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        info!("Running terraform plan in {:?}", working_dir);
        self.run_stage_blocking(Stage::Plan, working_dir)
    }

    async fn apply(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        info!("Running terraform apply in {:?}", working_dir);
        self.run_stage_blocking(Stage::Apply, working_dir)
    }

    async fn output(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        info!("Running terraform output in {:?}", working_dir);
        self.run_stage_blocking(Stage::Output, working_dir)
    }
}
