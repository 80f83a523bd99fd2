//! dir2docx CLI - render a git working tree into a DOCX listing

mod sources;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use dir2docx::render::{FileOutcome, RenderObserver};
use dir2docx::{package, DocxRenderer, JsonFormat, RenderOptions};

use sources::{list_tracked_files, load_entries, parse_association, ExcludeFilter};

#[derive(Parser)]
#[command(name = "dir2docx")]
#[command(version)]
#[command(about = "Render the files tracked by git into a captioned, line-numbered DOCX", long_about = None)]
struct Cli {
    /// Directory whose tracked files are rendered
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,

    /// Captions show paths relative to this directory
    #[arg(value_name = "PATH_PREFIX")]
    path_prefix: PathBuf,

    /// Exclude files matching a glob (repeatable), e.g. `*.ico`
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Tokenize files matching a glob as a language (repeatable), e.g. `*.svg,xml`
    #[arg(long, value_name = "GLOB,LANG", value_parser = parse_association)]
    associate: Vec<(String, String)>,

    /// Document title
    #[arg(long, env = "DIR2DOCX_TITLE")]
    title: Option<String>,

    /// Caption label and prefix
    #[arg(long, default_value = "File")]
    caption_label: String,

    /// Also write the document model as JSON
    #[arg(long, value_name = "FILE")]
    dump_json: Option<PathBuf>,
}

/// Drives a progress bar from render events.
struct ProgressObserver {
    bar: ProgressBar,
    current: String,
}

impl RenderObserver for ProgressObserver {
    fn file_started(&mut self, _index: usize, _total: usize, path: &str) {
        self.current = path.to_string();
        self.bar.set_message(path.to_string());
    }

    fn file_finished(&mut self, _index: usize, outcome: &FileOutcome) {
        if let FileOutcome::Plain { reason, .. } = outcome {
            self.bar.println(format!(
                "{} {} ({})",
                "plain".yellow(),
                self.current,
                reason.dimmed()
            ));
        }
        self.bar.inc(1);
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input_dir.is_dir() {
        return Err(format!("{} is not a directory", cli.input_dir.display()).into());
    }
    if !cli.path_prefix.is_dir() {
        return Err(format!("{} is not a directory", cli.path_prefix.display()).into());
    }

    let filter = ExcludeFilter::new(&cli.exclude)?;
    let files = filter.apply(list_tracked_files(&cli.input_dir)?);
    log::debug!("{} files after exclusions", files.len());
    let entries = load_entries(&cli.input_dir, &cli.path_prefix, &files)?;

    let mut options = RenderOptions::new()
        .with_associations(cli.associate)
        .with_caption_label(cli.caption_label.clone())
        .with_caption_prefix(cli.caption_label);
    if let Some(title) = cli.title {
        options = options.with_title(title);
    }
    let renderer = DocxRenderer::new(options)?;

    let bar = ProgressBar::new(entries.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    let mut observer = ProgressObserver {
        bar: bar.clone(),
        current: String::new(),
    };
    let result = renderer.render_with_observer(&entries, &mut observer)?;
    bar.finish_with_message("Done!");

    package::save_docx(&result.document, &cli.output_file)?;

    if let Some(path) = &cli.dump_json {
        let json = dir2docx::render::to_json(&result.document, JsonFormat::Pretty)?;
        fs::write(path, json)?;
    }

    let stats = &result.stats;
    println!("\n{} {}", "Saved to".green(), cli.output_file.display());
    println!(
        "  {} {} files, {} lines",
        "├─".dimmed(),
        stats.file_count,
        stats.line_count
    );
    println!(
        "  {} {} highlighted, {} plain",
        "├─".dimmed(),
        stats.highlighted_count,
        stats.fallback_count
    );
    println!("  {} {} pictures", "└─".dimmed(), stats.image_count);
    if let Some(path) = &cli.dump_json {
        println!("{} {}", "JSON written to".green(), path.display());
    }

    Ok(())
}
