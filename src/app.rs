use crate::cli::Cli;
use anyhow::Context as _;
use clap::Parser;
use instruction_gen::context::{
    expand_newline_escapes, parse_assignment, Context, PROJECT_NAME, RULES, STYLE_GUIDE,
    TECHNOLOGIES, TESTING_FRAMEWORK,
};
use instruction_gen::{generate, read_template, render_checked, UndefinedPolicy};
use similar::TextDiff;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

enum OutputMode {
    Write,
    DryRun,
    Diff,
}

pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mode = if cli.dry_run {
        OutputMode::DryRun
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Write
    };
    let policy = if cli.strict {
        UndefinedPolicy::Reject
    } else {
        UndefinedPolicy::Sentinel
    };

    let context = build_context(&cli)?;
    log::debug!("Rendering with {} binding(s)", context.len());

    match mode {
        OutputMode::Write => {
            generate(&cli.template, &cli.output, &context, policy)?;
            println!(
                "Successfully generated instruction file at: {}",
                cli.output.display()
            );
        }
        OutputMode::DryRun => {
            let template = read_template(&cli.template)?;
            let rendered = render_checked(&template, &context, policy)?;
            io::stdout().write_all(rendered.text.as_bytes())?;
        }
        OutputMode::Diff => {
            let template = read_template(&cli.template)?;
            let rendered = render_checked(&template, &context, policy)?;
            let current = read_existing_output(&cli.output)?;

            let diff_output = TextDiff::from_lines(&current, &rendered.text)
                .unified_diff()
                .header("current", "generated")
                .to_string();

            io::stdout().write_all(diff_output.as_bytes())?;
        }
    }

    Ok(())
}

/// Layers defaults, the context file, the named flags and `--var`
/// assignments, later sources winning.
fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let mut context = Context::with_defaults();

    if let Some(path) = &cli.context_file {
        context.extend(Context::load_file(path)?);
    }

    let named = [
        (PROJECT_NAME, cli.project_name.clone()),
        (TECHNOLOGIES, cli.technologies.clone()),
        (STYLE_GUIDE, cli.style_guide.clone()),
        (TESTING_FRAMEWORK, cli.testing_framework.clone()),
        (RULES, cli.rules.as_deref().map(expand_newline_escapes)),
    ];
    for (key, value) in named {
        if let Some(value) = value {
            context.insert(key, value)?;
        }
    }

    for raw in &cli.vars {
        let (key, value) = parse_assignment(raw).context("Invalid --var argument")?;
        if context.insert(key.as_str(), value)?.is_some() {
            log::debug!("--var overrides existing binding for {key}");
        }
    }

    Ok(context)
}

fn read_existing_output(path: &Path) -> anyhow::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e)
            .with_context(|| format!("Failed to read existing output file: {}", path.display())),
    }
}
