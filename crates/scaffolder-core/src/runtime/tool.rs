//! Running project tools (git, npm) inside a generated project
//!
//! Output of each command is streamed to the console, indented, with
//! stderr lines highlighted.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// A command line: program followed by its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from `[program, args...]`; `None` for an empty line
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self {
            program: resolve_program(program),
            args: args.to_vec(),
        })
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run in `dir`, streaming output. Fails on a non-zero exit.
    pub async fn run(&self, dir: &Path) -> Result<()> {
        let cmd = self.display();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        let mut child = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start '{}'", cmd))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stdout of '{}'", cmd))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stderr of '{}'", cmd))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                },
                line = stderr_reader.next_line(), if stderr_open => match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                },
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for '{}'", cmd))?;

        if !status.success() {
            anyhow::bail!(
                "'{}' failed with exit code: {}",
                cmd,
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

/// Windows resolves npm/npx through `.cmd` shims
fn resolve_program(program: &str) -> String {
    if cfg!(windows) && matches!(program, "npm" | "npx") {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}

/// Initialize a git repository in `dir`
pub async fn git_init(dir: &Path) -> Result<()> {
    ToolCommand::new("git", &["init"]).run(dir).await
}

/// Run each install step in order, stopping at the first failure
pub async fn install_dependencies(dir: &Path, steps: &[Vec<String>]) -> Result<()> {
    for step in steps {
        if let Some(command) = ToolCommand::from_parts(step) {
            command.run(dir).await?;
        }
    }
    Ok(())
}
