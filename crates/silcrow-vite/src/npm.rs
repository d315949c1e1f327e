// File: silcrow-vite/src/npm.rs
// Purpose: Thin wrapper running the front-end package manager in the Vite root

use crate::error::{Result, ViteError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs `<bin> <args>` with the Vite project root as working directory.
#[derive(Debug, Clone)]
pub struct Npm {
    cwd: PathBuf,
    bin: String,
}

impl Npm {
    pub fn new(cwd: impl Into<PathBuf>, bin: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            bin: bin.into(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// `npm install [packages...]`
    pub fn install(&self, packages: &[String]) -> Result<()> {
        let mut args = vec!["install".to_string()];
        args.extend(packages.iter().cloned());
        self.exec(&args)
    }

    /// `npm run <script> [-- extra...]`
    pub fn run(&self, script: &str, extra: &[String]) -> Result<()> {
        let mut args = vec!["run".to_string(), script.to_string()];
        if !extra.is_empty() {
            args.push("--".to_string());
            args.extend(extra.iter().cloned());
        }
        self.exec(&args)
    }

    /// Production build into `dist/assets`.
    pub fn build(&self) -> Result<()> {
        self.run("build", &[])
    }

    /// Dev server; blocks until it exits.
    pub fn dev(&self) -> Result<()> {
        self.run("dev", &[])
    }

    /// The command line as it will be spawned.
    pub fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.bin);
        command.args(args).current_dir(&self.cwd);
        command
    }

    fn exec(&self, args: &[String]) -> Result<()> {
        let command_line = format!("{} {}", self.bin, args.join(" "));
        tracing::info!(command = %command_line, cwd = %self.cwd.display(), "running build tool");

        let status = self.command(args).status().map_err(|e| ViteError::Npm {
            command: command_line.clone(),
            reason: match e.kind() {
                ErrorKind::NotFound => format!(
                    "`{}` not found (set VITE_NPM_BIN_PATH or check that {} exists)",
                    self.bin,
                    self.cwd.display()
                ),
                _ => e.to_string(),
            },
        })?;

        if !status.success() {
            return Err(ViteError::Npm {
                command: command_line,
                reason: match status.code() {
                    Some(code) => format!("exited with status {}", code),
                    None => "terminated by signal".to_string(),
                },
            });
        }

        Ok(())
    }
}
