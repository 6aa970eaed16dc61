use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::translation::{BatchTranslator, DocumentReport, target_path};
use crate::ui::{BatchProgress, Style, is_cancellation};

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub batch_size: Option<usize>,
    pub max_concurrency: Option<usize>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let config_file = manager.load_or_default()?;
    let resolve_options = ResolveOptions {
        provider: options.provider,
        model: options.model,
        batch_size: options.batch_size,
        max_concurrency: options.max_concurrency,
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&resolve_options, &config_file)?;

    let source = match options.file {
        Some(path) => path,
        None => match InputReader::prompt_path() {
            Ok(path) => path,
            Err(e) if is_cancellation(&e) => {
                println!();
                return Ok(());
            }
            Err(e) => return Err(e),
        },
    };

    let document = InputReader::read(&source)?;
    if document.trim().is_empty() {
        bail!("Error: Input is empty: {}", source.display());
    }

    let target = target_path(&source);
    if target.exists() {
        bail!(
            "Error: Output file already exists: {}\n\n\
             Remove it first; translations are appended to this file.",
            target.display()
        );
    }

    crate::status!(
        "{} {} {} {}",
        Style::label("Translating"),
        Style::value(source.display()),
        Style::label("with"),
        Style::value(format!("{}/{}", resolved.provider_name, resolved.model))
    );

    let translator = BatchTranslator::new(resolved.executor(), resolved.batch_settings());
    let progress = BatchProgress::new(0);
    let report = translator
        .run_with_progress(&document, &target, |done, total| {
            progress.update(done, total);
        })
        .await?;
    progress.finish();

    print_report(&report, &target);
    Ok(())
}

fn print_report(report: &DocumentReport, target: &Path) {
    if report.is_complete() {
        crate::status!(
            "{} {} segments translated, {} blank, written to {}",
            Style::success("✓"),
            Style::value(report.translated),
            Style::value(report.skipped),
            Style::value(target.display())
        );
    } else {
        let indexes = report
            .failed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        crate::warn!(
            "{} {} of {} segments could not be translated (indexes: {}); see {}",
            Style::warning("Warning:"),
            report.failed.len(),
            report.segments,
            indexes,
            target.display()
        );
    }
}
