mod checks;
mod loader;
mod reports;
mod sink;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use lbol_stats::{Lang, ReportEngine};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use checks::{CHECKS, CheckResult, run_checks, unknown_checks};
use loader::FsDataLoader;
use reports::DatasetSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "lbol-tester", version)]
#[command(about = "Headless report and property checks for LBoL card statistics datasets")]
struct Args {
    /// Static asset directory holding `data/` and `locales/`
    #[arg(long, default_value = "lbol-web/static")]
    assets: PathBuf,

    /// Character dataset to load
    #[arg(long = "char", default_value = lbol_stats::constants::DEFAULT_CHARACTER)]
    character: String,

    /// Display language (ja or en)
    #[arg(long, default_value = lbol_stats::constants::DEFAULT_LANG)]
    lang: String,

    /// Checks to run (comma-separated); all when omitted
    #[arg(long, default_value = "")]
    checks: String,

    /// List the available characters and checks and exit
    #[arg(long)]
    list: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let loader = FsDataLoader::new(&args.assets);

    if args.list {
        let mut output_target = OutputTarget::new(args.output.clone())?;
        write_listing(output_target.writer(), &loader)?;
        output_target.flush_inner()?;
        return Ok(());
    }

    let selected = split_csv(&args.checks);
    let unknown = unknown_checks(&selected);
    if !unknown.is_empty() {
        bail!("unknown checks: {}", unknown.join(", "));
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }
    let start_time = Instant::now();
    let lang = Lang::from_code(&args.lang);
    let board = ReportEngine::new(loader)
        .load_dashboard(&args.character, lang)
        .with_context(|| format!("failed to load {} ({})", args.character, lang.code()))?;
    log::info!("loaded {} in {:?}", args.character, start_time.elapsed());

    let results = run_checks(&board, &selected, args.verbose);
    let summary = DatasetSummary::of(&board);
    write_reports(&args, &summary, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🃏 LBoL Report Tester".bright_cyan().bold());
    println!("{}", "=====================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_listing(out: &mut dyn Write, loader: &FsDataLoader) -> Result<()> {
    writeln!(out, "Available characters:")?;
    for character in loader.characters()? {
        writeln!(out, "  {character}")?;
    }
    writeln!(out, "Available checks:")?;
    for (name, description, _) in &CHECKS {
        writeln!(out, "  {name:22} - {description}")?;
    }
    Ok(())
}

fn write_reports(
    args: &Args,
    summary: &DatasetSummary,
    results: &[CheckResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, summary, results)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(&mut output_target, summary, results)?;
        }
        ReportFormat::Console => {
            reports::generate_console_report(&mut output_target, summary, results)?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assets_dir, dashboard};

    fn base_args(report: ReportFormat, output: PathBuf) -> Args {
        Args {
            assets: assets_dir(),
            character: "CirnoA".into(),
            lang: "en".into(),
            checks: String::new(),
            list: false,
            report,
            verbose: false,
            output: Some(output),
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "lbol-tester-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn split_csv_drops_blanks() {
        assert_eq!(
            split_csv(" hide-delay, ,mode-switch "),
            vec!["hide-delay".to_string(), "mode-switch".to_string()]
        );
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn cli_parses_defaults() {
        let args = Args::parse_from(["lbol-tester"]);
        assert_eq!(args.character, "CirnoA");
        assert_eq!(args.lang, "ja");
        assert_eq!(args.report, ReportFormat::Console);
        assert!(args.output.is_none());

        let args = Args::parse_from(["lbol-tester", "--char", "ReimuA", "--report", "markdown"]);
        assert_eq!(args.character, "ReimuA");
        assert_eq!(args.report, ReportFormat::Markdown);
    }

    #[test]
    fn listing_names_characters_and_checks() {
        let mut buf = Vec::new();
        write_listing(&mut buf, &FsDataLoader::new(assets_dir())).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("  CirnoA"));
        assert!(text.contains("series-layout"));
    }

    #[test]
    fn write_reports_emits_json_file() {
        let path = temp_path("json");
        let args = base_args(ReportFormat::Json, path.clone());
        let board = dashboard();
        let results = run_checks(&board, &[], false);
        write_reports(&args, &DatasetSummary::of(&board), &results, Instant::now()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["checks"].as_array().map(Vec::len), Some(CHECKS.len()));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn write_reports_console_ends_with_total_time() {
        let path = temp_path("console");
        let args = base_args(ReportFormat::Console, path.clone());
        let board = dashboard();
        write_reports(&args, &DatasetSummary::of(&board), &[], Instant::now()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Total time"));
        let _ = std::fs::remove_file(path);
    }
}
