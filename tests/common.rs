//! Test utilities for extbump integration tests

#![allow(dead_code)]

use extbump::BumpError;
use extbump::vcs::{CommandRunner, display_command};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Write `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture directory");
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// A consumer build.gradle in the usual extension shape
pub fn consumer_manifest(name: &str, version: u64, extra: &str) -> String {
    format!(
        "ext {{\n    extName = '{}'\n    extClass = '.{}'\n    extVersionCode = {}\n{}}}\n\napply from: \"$rootDir/common.gradle\"\n",
        name, name, version, extra
    )
}

/// Records commands instead of running them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<String>,
    pub fail_on: Option<usize>,
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, program: &str, args: &[OsString]) -> Result<(), BumpError> {
        let index = self.calls.len();
        let line = display_command(program, args);
        self.calls.push(line.clone());
        if self.fail_on == Some(index) {
            return Err(BumpError::Spawn {
                command: line,
                source: std::io::Error::other("simulated failure"),
            });
        }
        Ok(())
    }
}
