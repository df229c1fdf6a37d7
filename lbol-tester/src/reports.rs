use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use lbol_stats::{Dashboard, EnemyTable, ExhibitTable, SpotlightCategory};
use serde::Serialize;
use std::io::Write;

use crate::checks::CheckResult;

/// What the loaded dataset produced.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub character: String,
    pub version: String,
    pub lang: String,
    pub rankable_cards: usize,
    pub series: usize,
    pub situations: Vec<String>,
    pub spotlight: Vec<(String, usize)>,
    pub rankings: Vec<(String, usize)>,
    pub enemy_rows: usize,
    pub exhibit_rows: usize,
    pub generated_at: String,
}

impl DatasetSummary {
    #[must_use]
    pub fn of(board: &Dashboard) -> Self {
        let ctx = board.context();
        let dataset = &ctx.dataset;
        let reports = board.reports();
        Self {
            character: dataset.metadata.character.clone(),
            version: dataset.version().to_string(),
            lang: ctx.lang.code().to_string(),
            rankable_cards: reports.rankable_count,
            series: board.graph().series.len(),
            situations: board.graph().situations.iter().map(|s| s.label()).collect(),
            spotlight: SpotlightCategory::DISPLAY_ORDER
                .iter()
                .map(|category| {
                    (
                        ctx.text.t(&format!("{}_title", category.text_key())),
                        reports.spotlight.entries(*category).len(),
                    )
                })
                .collect(),
            rankings: reports
                .reports
                .iter()
                .map(|report| {
                    (
                        ctx.text.t(&format!("{}_title", report.id.text_key())),
                        report.entries.len(),
                    )
                })
                .collect(),
            enemy_rows: EnemyTable::build(dataset, &dataset.metadata.character, ctx.lang)
                .rows
                .len(),
            exhibit_rows: ExhibitTable::build(dataset, ctx.lang).rows.len(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a DatasetSummary,
    checks: &'a [CheckResult],
}

fn pass_count(results: &[CheckResult]) -> usize {
    results.iter().filter(|r| r.passed).count()
}

pub fn generate_console_report(
    out: &mut dyn Write,
    summary: &DatasetSummary,
    results: &[CheckResult],
) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("📊 {} v{} ({})", summary.character, summary.version, summary.lang)
            .bright_cyan()
            .bold()
    )?;
    writeln!(out, "{}", "==============================".cyan())?;
    writeln!(out, "Rankable cards: {}", summary.rankable_cards)?;
    writeln!(
        out,
        "Plot series: {} ({} situations)",
        summary.series,
        summary.situations.len()
    )?;
    writeln!(out, "Enemy rows: {}", summary.enemy_rows)?;
    writeln!(out, "Exhibit rows: {}", summary.exhibit_rows)?;
    writeln!(out)?;

    writeln!(out, "{}", "⭐ Spotlight".bright_yellow().bold())?;
    for (title, count) in &summary.spotlight {
        writeln!(out, "   {title:30} {count}")?;
    }
    writeln!(out, "{}", "🏅 Rankings".bright_yellow().bold())?;
    for (title, count) in &summary.rankings {
        writeln!(out, "   {title:30} {count}")?;
    }
    writeln!(out)?;

    let passed = pass_count(results);
    writeln!(out, "{}", "🧪 Property Checks".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (results.len() - passed).to_string().red())?;
    writeln!(out)?;
    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} ({:.2} ms)",
            result.name.bold(),
            result.elapsed_ms
        )?;
        writeln!(out, "   {}", result.description)?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    summary: &DatasetSummary,
    results: &[CheckResult],
) -> Result<()> {
    let report = JsonReport {
        summary,
        checks: results,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    summary: &DatasetSummary,
    results: &[CheckResult],
) -> Result<()> {
    writeln!(
        out,
        "# LBoL Report Check: {} v{}\n",
        summary.character, summary.version
    )?;
    writeln!(out, "_Generated {}_\n", summary.generated_at)?;
    writeln!(out, "## Dataset\n")?;
    writeln!(out, "- **Language**: {}", summary.lang)?;
    writeln!(out, "- **Rankable cards**: {}", summary.rankable_cards)?;
    writeln!(out, "- **Plot series**: {}", summary.series)?;
    writeln!(out, "- **Situations**: {}", summary.situations.join(", "))?;
    writeln!(out, "- **Enemy rows**: {}", summary.enemy_rows)?;
    writeln!(out, "- **Exhibit rows**: {}\n", summary.exhibit_rows)?;

    writeln!(out, "| Report | Cards |")?;
    writeln!(out, "|---|---|")?;
    for (title, count) in summary.spotlight.iter().chain(&summary.rankings) {
        writeln!(out, "| {title} | {count} |")?;
    }

    let passed = pass_count(results);
    writeln!(out, "\n## Checks\n")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", results.len() - passed)?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {}\n", result.name)?;
        writeln!(out, "{}\n", result.description)?;
        for failure in &result.failures {
            writeln!(out, "- {failure}")?;
        }
    }
    Ok(())
}
