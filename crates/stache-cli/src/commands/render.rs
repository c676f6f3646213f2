// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Render command: one template file against one data file.

use crate::config::Config;
use crate::data;
use crate::partials::DirectoryPartials;
use anyhow::Context;
use console::style;
use stache::{Engine, Escape, NoPartials, PartialResolver, WriteSink};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments of `stache render`.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Template file.
    pub template: PathBuf,
    /// JSON or TOML data file.
    pub data: Option<PathBuf>,
    /// Partials directory, overriding `[partials] dir`.
    pub partials: Option<PathBuf>,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    /// Disable HTML escaping.
    pub raw: bool,
}

/// Builds the engine for a render: configured options, `--raw`, and a
/// partials directory from the arguments or the configuration.
pub fn engine_for(config: &Config, args: &RenderArgs) -> Engine<Box<dyn PartialResolver>> {
    let mut options = config.render.clone();
    if args.raw {
        options.escape = Escape::None;
    }

    let dir = args.partials.clone().or_else(|| config.partials.dir.clone());
    let partials: Box<dyn PartialResolver> = match dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "reading partials from directory");
            Box::new(DirectoryPartials::new(dir, config.partials.extension.clone()))
        }
        None => Box::new(NoPartials),
    };

    Engine::with_partials(partials).with_options(options)
}

/// Renders the template and returns the output.
pub fn render_to_string(config: &Config, args: &RenderArgs) -> anyhow::Result<String> {
    let mut out = Vec::new();
    render_into(config, args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// Runs the render command, writing to `--output` or stdout.
pub fn run(config: &Config, args: &RenderArgs) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            render_into(config, args, &mut writer)?;
            writer.flush()?;
            eprintln!(
                "{} {}",
                style("Rendered").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            render_into(config, args, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_into(config: &Config, args: &RenderArgs, writer: &mut dyn Write) -> anyhow::Result<()> {
    let engine = engine_for(config, args);

    let source = fs::read_to_string(&args.template)
        .with_context(|| format!("failed to read template {}", args.template.display()))?;
    let name = args.template.display().to_string();
    let template = engine.compile_named(&name, &source)?;

    let data = data::load(args.data.as_deref())?;

    let mut sink = WriteSink::new(writer);
    engine.render_to(&template, &data, &mut sink)?;
    Ok(())
}
