//! Shared helpers for the CLI integration tests.
//!
//! - [`run_cli`] calls `jukugo_cli::run` in-process and captures both streams.
//! - [`EnvGuard`] sets `JUKUGO_*` variables for one test and restores them on drop.
//!   Every test that builds a guard must be `#[serial]`.

#![allow(dead_code)]

pub const CONFIG_VARS: &[&str] = &[
    "JUKUGO_CONFIG",
    "JUKUGO_SEED",
    "JUKUGO_DIFFICULTY",
    "JUKUGO_FIRST",
    "JUKUGO_DICTIONARY",
    "JUKUGO_TEST_INPUT",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("jukugo").chain(args.iter().copied());
    let exit_code = jukugo_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clear every configuration variable, then apply `pairs`.
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in CONFIG_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            if !CONFIG_VARS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }

    pub fn clean() -> Self {
        Self::apply(&[])
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

/// Write `contents` to `name` inside `dir` and return the path as a string.
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path.to_string_lossy().into_owned()
}
