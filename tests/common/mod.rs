use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta_cmd::get_cargo_bin;
use prompt_info::styling::{BLUE, CYAN, RED, RESET};
use tempfile::TempDir;

/// Isolated layout for prompt tests:
///
/// ```text
/// <tmp>/home/            $HOME for the binary
/// <tmp>/home/project/    git repository on `main`
/// <tmp>/config.toml      config path (absent unless written)
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
    home: PathBuf,
    root: PathBuf,
}

impl TestRepo {
    /// Create a new, empty repository (no commits) with isolated git config
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let base = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp path");
        let home = base.join("home");
        let root = home.join("project");
        std::fs::create_dir_all(&root).expect("Failed to create repo directory");

        let repo = Self {
            temp_dir,
            home,
            root,
        };
        repo.git(&["init", "-b", "main"]);
        repo
    }

    /// A repository with a single commit
    pub fn with_commit() -> Self {
        let repo = Self::new();
        repo.commit("Initial commit");
        repo
    }

    /// Get the root path of the repository
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// The directory used as `$HOME`
    pub fn home_path(&self) -> &Path {
        &self.home
    }

    /// Config file location passed via `PROMPT_INFO_CONFIG_PATH`
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Run git in the repository root, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        let output = self
            .git_command(args)
            .current_dir(&self.root)
            .output()
            .unwrap_or_else(|e| panic!("failed to run git {args:?}: {e}"));

        if !output.status.success() {
            panic!(
                "git {args:?} failed\nstdout:\n{}\nstderr:\n{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
            );
        }

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// A git command with the isolated environment applied
    pub fn git_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z")
            .env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
        cmd
    }

    /// Create a commit with the given message
    pub fn commit(&self, message: &str) {
        // Create a file to ensure there's something to commit
        std::fs::write(self.root.join("file.txt"), message).expect("Failed to write file");
        self.git(&["add", "."]);
        self.git(&["commit", "-m", message]);
    }

    /// Detach HEAD at the current commit, returning its full sha
    pub fn detach_head(&self) -> String {
        let sha = self.git(&["rev-parse", "HEAD"]);
        self.git(&["checkout", "--detach", &sha]);
        sha
    }

    /// Write a file relative to the repository root
    pub fn write_file(&self, name: &str, contents: &str) {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, contents).expect("Failed to write file");
    }

    /// Write an executable shell script into the temp dir and return its path
    #[cfg(unix)]
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// The binary, run in `cwd` with an isolated environment.
    ///
    /// `PWD` is set to `cwd` the way a shell would after `cd`.
    pub fn prompt_command(&self, cwd: &Path) -> Command {
        let mut cmd = Command::new(get_cargo_bin("prompt-info"));
        cmd.current_dir(cwd)
            .env("HOME", &self.home)
            .env("PWD", cwd)
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .env("PROMPT_INFO_CONFIG_PATH", self.config_path())
            .env_remove("PROMPT_INFO_PLUGIN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary in the repository root and return readable stdout
    pub fn prompt(&self) -> String {
        self.prompt_in(&self.root)
    }

    /// Run the binary in `cwd` and return readable stdout, asserting success
    pub fn prompt_in(&self, cwd: &Path) -> String {
        run_prompt(&mut self.prompt_command(cwd))
    }
}

/// Run a prepared command, assert it succeeded with one line, and return
/// that line with color codes replaced by tags
pub fn run_prompt(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run prompt-info");
    assert_success(&output);
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert!(
        stdout.ends_with('\n') && stdout.matches('\n').count() == 1,
        "expected exactly one line, got {stdout:?}"
    );
    readable(stdout.trim_end_matches('\n'))
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "prompt-info failed ({:?})\nstdout:\n{}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

/// Replace the prompt's escape codes with `<cyan>`-style tags
pub fn readable(line: &str) -> String {
    line.replace(CYAN, "<cyan>")
        .replace(BLUE, "<blue>")
        .replace(RED, "<red>")
        .replace(RESET, "<reset>")
}
