// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Check command: compile templates without rendering them.

use crate::config::Config;
use anyhow::Context;
use console::style;
use stache::Engine;
use std::fs;
use std::path::PathBuf;

/// Outcome of a check run.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Files that compiled.
    pub passed: Vec<PathBuf>,
    /// Files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
    /// Patterns that matched no file.
    pub unmatched: Vec<String>,
}

impl CheckReport {
    /// `true` when every pattern matched and every file compiled.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.unmatched.is_empty()
    }
}

/// Compiles every file matched by `patterns`.
pub fn check(config: &Config, patterns: &[String]) -> anyhow::Result<CheckReport> {
    let engine = Engine::new().with_options(config.render.clone());
    let mut report = CheckReport::default();

    for pattern in patterns {
        let entries =
            glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern:?}"))?;

        let mut matched = false;
        for entry in entries {
            let path = entry?;
            if !path.is_file() {
                continue;
            }
            matched = true;

            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            match engine.compile_named(&path.display().to_string(), &source) {
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "template compiled");
                    report.passed.push(path);
                }
                Err(err) => report.failed.push((path, err.to_string())),
            }
        }

        if !matched {
            report.unmatched.push(pattern.clone());
        }
    }

    Ok(report)
}

/// Runs the check command and prints a summary.
pub fn run(config: &Config, patterns: &[String]) -> anyhow::Result<CheckReport> {
    let report = check(config, patterns)?;

    for pattern in &report.unmatched {
        println!("{} no files match {}", style("Warning:").yellow(), pattern);
    }
    for path in &report.passed {
        println!("{} {}", style("ok").green(), path.display());
    }
    for (path, message) in &report.failed {
        println!("{} {}", style("error").red().bold(), path.display());
        println!("{message}");
    }

    let checked = report.passed.len() + report.failed.len();
    if report.is_clean() {
        println!(
            "\n{} {} template(s) checked",
            style("All good!").green().bold(),
            checked
        );
    } else {
        println!(
            "\n{} {} of {} template(s) failed",
            style("Check failed:").red().bold(),
            report.failed.len(),
            checked
        );
    }

    Ok(report)
}
