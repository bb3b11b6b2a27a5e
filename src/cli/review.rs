//! Interactive review session shell.
//!
//! This layer owns all terminal presentation (prompts, spinner, styling)
//! and drives the pure session core. Startup/config problems are fatal;
//! per-call problems print a styled error and the session continues.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{load_settings, Settings};
use crate::domain::ScanSummary;
use crate::prompt::system::fetch_system_prompt;
use crate::prompt::PromptAssembler;
use crate::provider::ProviderKind;
use crate::scan::tree::render_tree;
use crate::scan::TreeScanner;
use crate::session::{PromptLog, ReviewContext, ReviewSession};

#[derive(Args)]
pub struct ReviewArgs {
    /// Root folder of the project (prompted for when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Brief description of the codebase
    #[arg(short, long)]
    pub description: Option<String>,

    /// Main technologies used (comma-separated)
    #[arg(short, long)]
    pub technologies: Option<String>,

    /// Provider backend: 'claude' or 'gemini' (interactive choice when omitted)
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Settings file (TOML); parse errors are fatal when this is given
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the ignore file read at the scan root
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,

    /// Maximum number of file bodies embedded in the overview prompt
    #[arg(long, value_name = "N")]
    pub max_sample_files: Option<usize>,

    /// Maximum characters per embedded file body
    #[arg(long, value_name = "CHARS")]
    pub max_sample_chars: Option<usize>,

    /// Fetch the system prompt from this URL at session start (non-200 is fatal)
    #[arg(long, value_name = "URL")]
    pub system_prompt_url: Option<String>,

    /// Record every submitted prompt under logs/<timestamp>.txt
    #[arg(long)]
    pub log_prompts: bool,
}

pub fn run(args: ReviewArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let mut settings = load_settings(&cwd, args.config.as_deref())?;
    apply_overrides(&mut settings, &args);

    let root = resolve_root(args.path.as_deref())?;
    let description = require_text(args.description, "Brief description of the codebase")?;
    let technologies = require_text(args.technologies, "Main technologies used (comma-separated)")?;

    let kind = match args.provider {
        Some(name) => name.parse::<ProviderKind>().map_err(anyhow::Error::msg)?,
        None => choose_provider(settings.provider)?,
    };
    settings.provider = kind;

    // Missing credentials are fatal before any work starts.
    let provider = kind.build(settings.model())?;

    let system_prompt = match &settings.system_prompt_url {
        Some(url) => Some(fetch_system_prompt(url)?),
        None => None,
    };

    let prompt_log = if settings.log_prompts { Some(PromptLog::create(&cwd)?) } else { None };

    let session = ReviewSession::new(
        provider,
        PromptAssembler::new(settings.templates.clone(), settings.sample),
        settings.generation,
        ReviewContext { description, technologies },
    )
    .with_system_prompt(system_prompt)
    .with_prompt_log(prompt_log);

    let summary = scan_with_spinner(&root, &settings)?;
    let file_structure = render_tree(&root, 4).unwrap_or_default();

    let spinner = spinner(format!("Consulting {}...", session.provider_name()));
    let overview = session.overview(&summary, &file_structure);
    spinner.finish_and_clear();

    println!("\n{}", style("Codebase analysis:").bold());
    println!("{overview}");

    file_loop(&session, &root)?;
    print_summary(&session, &root, &summary);

    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &ReviewArgs) {
    if let Some(name) = &args.ignore_file {
        settings.ignore_file = name.clone();
    }
    if let Some(n) = args.max_sample_files {
        settings.sample.max_sample_files = n;
    }
    if let Some(chars) = args.max_sample_chars {
        settings.sample.max_sample_chars = chars;
    }
    if let Some(url) = &args.system_prompt_url {
        settings.system_prompt_url = Some(url.clone());
    }
    if args.log_prompts {
        settings.log_prompts = true;
    }
}

/// A path given as an argument must exist; a prompted path is re-asked
/// until it does.
fn resolve_root(path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = path {
        if !path.is_dir() {
            bail!("root folder does not exist: {}", path.display());
        }
        return path.canonicalize().context("could not canonicalize root folder");
    }

    loop {
        let entered: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Root folder of the project")
            .interact_text()?;
        let candidate = PathBuf::from(entered.trim());
        if candidate.is_dir() {
            return candidate.canonicalize().context("could not canonicalize root folder");
        }
        println!(
            "{} the folder '{}' does not exist",
            style("Error:").red().bold(),
            candidate.display()
        );
    }
}

fn require_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => {
            let entered: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .interact_text()?;
            Ok(entered)
        }
    }
}

fn choose_provider(default: ProviderKind) -> Result<ProviderKind> {
    let items = [ProviderKind::Claude, ProviderKind::Gemini];
    let default_idx = items.iter().position(|k| *k == default).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose provider")
        .default(default_idx)
        .items(&items.map(|k| k.label()))
        .interact()?;

    Ok(items[selection])
}

fn scan_with_spinner(root: &Path, settings: &Settings) -> Result<ScanSummary> {
    let spinner = spinner("Analyzing codebase structure...".to_string());
    let mut scanner =
        TreeScanner::new(root.to_path_buf()).ignore_file(settings.ignore_file.clone());
    let summary = scanner.scan();
    spinner.finish_and_clear();
    summary
}

fn file_loop(session: &ReviewSession, root: &Path) -> Result<()> {
    loop {
        let entered: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("File to analyze ('q' to quit)")
            .interact_text()?;
        let entered = entered.trim();

        if entered.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let spinner = spinner(format!("Analyzing {entered}..."));
        match session.file_analysis(root, entered) {
            Ok(analysis) => {
                spinner.finish_and_clear();
                println!("\n{}", style("File analysis:").bold());
                println!("{analysis}");
            }
            Err(err) => {
                spinner.finish_and_clear();
                println!("{} {err}", style("Error:").red().bold());
            }
        }
    }
}

fn print_summary(session: &ReviewSession, root: &Path, summary: &ScanSummary) {
    let context = session.context();

    println!("\n{}", style("Codebase Review Summary:").bold());
    println!("Description: {}", context.description);
    println!("Technologies: {}", context.technologies);
    println!("Root folder: {}", root.display());
    println!("Total files: {}", summary.file_count);
    println!("Total lines of code: {}", summary.total_lines);
    println!("File types distribution:");
    for (ext, count) in summary.histogram_by_count() {
        let label = if ext.is_empty() { "no extension" } else { ext };
        println!("  {}: {}", label, count);
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
