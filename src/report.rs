use anyhow::{Result, bail};
use colored::*;
use prettytable::{Cell, Row, Table, format};
use serde::Serialize;
use std::io::Write;

use crate::analyzer::CoverageReport;

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            _ => bail!("不支持的输出格式: {}，支持的格式: text, json, yaml", s),
        }
    }
}

/// 写出报告
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &CoverageReport,
    format: ReportFormat,
    threshold: f32,
    verbose: bool,
) -> Result<()> {
    match format {
        ReportFormat::Text => print_text_report(writer, report, threshold, verbose),
        ReportFormat::Json => print_json_report(writer, report),
        ReportFormat::Yaml => print_yaml_report(writer, report),
    }
}

/// 统计信息
#[derive(Serialize)]
struct Stats {
    total_keys: usize,
    languages: usize,
    incomplete_languages: usize,
}

/// 序列化的报告，用于输出为 JSON/YAML
#[derive(Serialize)]
struct SerializableReport<'a> {
    #[serde(flatten)]
    report: &'a CoverageReport,
    stats: Stats,
}

impl<'a> SerializableReport<'a> {
    fn new(report: &'a CoverageReport) -> Self {
        Self {
            report,
            stats: Stats {
                total_keys: report.total_keys,
                languages: report.languages.len(),
                incomplete_languages: report
                    .languages
                    .iter()
                    .filter(|l| !l.missing.is_empty())
                    .count(),
            },
        }
    }
}

/// 生成文本格式的报告
pub fn print_text_report<W: Write>(
    writer: &mut W,
    report: &CoverageReport,
    threshold: f32,
    verbose: bool,
) -> Result<()> {
    writeln!(writer, "\n{}", "翻译覆盖率报告".bold().underline())?;
    writeln!(writer, "\n{}", "统计信息:".bold())?;
    writeln!(writer, "  总翻译键数量: {}", report.total_keys)?;
    writeln!(writer, "  语言数量: {}", report.languages.len())?;
    writeln!(writer, "  回退语言: {}", report.fallback_language)?;

    if report.languages.is_empty() {
        writeln!(writer, "\n{}", "没有加载任何语言。".yellow())?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        ["语言", "已翻译", "缺少", "回退可用", "覆盖率"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for lang in &report.languages {
        let percent = format!("{:.2}%", lang.coverage_percent);
        let percent = if lang.coverage_percent < threshold {
            percent.red().to_string()
        } else {
            percent.green().to_string()
        };
        table.add_row(Row::new(vec![
            Cell::new(&lang.language),
            Cell::new(&lang.present.to_string()),
            Cell::new(&lang.missing.len().to_string()),
            Cell::new(&lang.covered_by_fallback.to_string()),
            Cell::new(&percent),
        ]));
    }
    writeln!(writer)?;
    table.print(writer)?;

    let incomplete: Vec<_> = report
        .languages
        .iter()
        .filter(|l| !l.missing.is_empty())
        .collect();

    if !incomplete.is_empty() {
        writeln!(writer, "\n{}", "缺少翻译的键:".bold().yellow())?;
        for lang in incomplete {
            writeln!(writer, "\n  语言: {}", lang.language.bold())?;
            let shown = if verbose { lang.missing.len() } else { lang.missing.len().min(10) };
            for (idx, key) in lang.missing.iter().take(shown).enumerate() {
                writeln!(writer, "    {}. {}", idx + 1, key.yellow())?;
            }
            if shown < lang.missing.len() {
                writeln!(writer, "    ... 另有 {} 个 (使用 --verbose 查看全部)", lang.missing.len() - shown)?;
            }
        }
    }

    let low = report.below_threshold(threshold);
    if !low.is_empty() {
        writeln!(writer, "\n{}", "建议:".bold())?;
        for lang in low {
            writeln!(
                writer,
                "  语言 {} 的覆盖率 ({:.2}%) 低于阈值 ({:.2}%)，建议补充翻译。",
                lang.language, lang.coverage_percent, threshold
            )?;
        }
    }

    Ok(())
}

/// 生成 JSON 格式的报告
pub fn print_json_report<W: Write>(writer: &mut W, report: &CoverageReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&SerializableReport::new(report))?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

/// 生成 YAML 格式的报告
pub fn print_yaml_report<W: Write>(writer: &mut W, report: &CoverageReport) -> Result<()> {
    let yaml = serde_yaml::to_string(&SerializableReport::new(report))?;
    write!(writer, "{}", yaml)?;
    Ok(())
}
