use crate::errors::{AppError, AppResult};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

const GIT_TIMEOUT: Duration = Duration::from_secs(60);
const DEPLOY_TIMEOUT: Duration = Duration::from_secs(300);
const DEPLOY_SCRIPT: &str = "deployment/deploy.sh";

/// Git operations on the site checkout, driven through the `git` binary with
/// a deadline on every call.
#[derive(Debug)]
pub struct GitOps {
    repo_root: PathBuf,
    remote: String,
    branch: String,
}

impl GitOps {
    pub fn new(
        repo_root: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> AppResult<Self> {
        let repo_root = repo_root.into();
        if !repo_root.join(".git").exists() {
            return Err(AppError::Cli(format!(
                "not a git repository: {}",
                repo_root.display()
            )));
        }
        Ok(Self {
            repo_root,
            remote: remote.into(),
            branch: branch.into(),
        })
    }

    pub fn has_changes(&self) -> AppResult<bool> {
        let status = self.run_git(&["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    /// Stages everything and commits. A clean tree is a success no-op.
    pub fn commit_changes(&self, message: &str) -> AppResult<()> {
        if !self.has_changes()? {
            tracing::warn!("no changes to commit");
            return Ok(());
        }
        self.run_git(&["add", "-A"])?;
        self.run_git(&["commit", "-m", message])?;
        tracing::info!(message = %message, "created commit");
        Ok(())
    }

    pub fn push_changes(&self) -> AppResult<()> {
        let refspec = format!("{}:{}", self.branch, self.branch);
        self.run_git(&["push", &self.remote, &refspec])?;
        tracing::info!(remote = %self.remote, branch = %self.branch, "pushed changes");
        Ok(())
    }

    /// Push, then fire the site's deploy hook when one exists. A missing or
    /// failing hook is logged, not fatal: the push already published the
    /// content and the host rebuild can be triggered by hand.
    pub fn deploy(&self) -> AppResult<()> {
        self.push_changes()?;
        self.trigger_deploy_script();
        Ok(())
    }

    fn trigger_deploy_script(&self) {
        let script = self.repo_root.join(DEPLOY_SCRIPT);
        if !script.exists() {
            tracing::warn!("no deployment script found; skipping deploy trigger");
            return;
        }
        tracing::info!(script = %script.display(), "triggering deployment");
        let script_arg = script.to_string_lossy();
        match run_with_timeout("bash", &[script_arg.as_ref()], &self.repo_root, DEPLOY_TIMEOUT) {
            Ok(_) => tracing::info!("deployment triggered"),
            Err(error) => tracing::error!(error = %error, "deployment trigger failed"),
        }
    }

    fn run_git(&self, args: &[&str]) -> AppResult<String> {
        run_with_timeout("git", args, &self.repo_root, GIT_TIMEOUT)
    }
}

fn run_with_timeout(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> AppResult<String> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| AppError::Io(format!("failed to start {program}: {error}")))?;

    let status = match child
        .wait_timeout(timeout)
        .map_err(|error| AppError::Io(error.to_string()))?
    {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::Internal(format!(
                "{program} {} timed out after {}s",
                args.first().unwrap_or(&""),
                timeout.as_secs()
            )));
        }
    };

    let mut stdout = String::new();
    if let Some(mut pipe) = child.stdout.take() {
        let _ = pipe.read_to_string(&mut stdout);
    }
    let mut stderr = String::new();
    if let Some(mut pipe) = child.stderr.take() {
        let _ = pipe.read_to_string(&mut stderr);
    }

    if !status.success() {
        return Err(AppError::Internal(format!(
            "{program} {} failed: {}",
            args.first().unwrap_or(&""),
            stderr.trim()
        )));
    }
    Ok(stdout)
}
