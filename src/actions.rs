use anyhow::{Context, Result, bail};
use log::warn;
use std::io::Write;
use std::path::Path;

use crate::{analyzer, config::ProjectConfig, engine::Localizer, loader, options, report};

/// 根据项目配置创建引擎并加载翻译文件目录
pub fn build_localizer(config: &ProjectConfig) -> Result<Localizer> {
    // 先停在回退语言，翻译加载后再切换到初始语言
    let mut engine_config = config.localizer.clone();
    let initial = std::mem::replace(
        &mut engine_config.default_language,
        engine_config.fallback_language.clone(),
    );
    let mut localizer = Localizer::new(engine_config);

    let locales_path = config.locales_path();
    let loaded = if config.locales_dir.is_none() && !locales_path.is_dir() {
        // 只有显式指定的目录才必须存在
        warn!("翻译文件目录不存在，跳过加载: {}", locales_path.display());
        Vec::new()
    } else {
        loader::load_dir(&mut localizer, &locales_path, config.ignore_todo_files)
            .context("加载翻译文件失败")?
    };

    if config.verbose {
        for file in &loaded {
            println!("已加载 {} ({}，{} 个条目)", file.path.display(), file.language, file.entries);
        }
    }

    localizer.set_language(&initial);

    Ok(localizer)
}

/// 解析 `name=value` 形式的插值变量，值保持原文
pub fn parse_assignment(raw: &str) -> Result<(String, options::Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("变量格式应为 name=value: {}", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("变量名不能为空: {}", raw);
    }
    Ok((name.to_string(), options::Value::Str(value.to_string())))
}

/// 翻译命令
pub fn run_translate_command<W: Write>(
    writer: &mut W,
    localizer: &Localizer,
    key: &str,
    language: Option<&str>,
    count: Option<i64>,
    assignments: &[String],
) -> Result<()> {
    let mut translation_options = options::TranslationOptions::new();
    translation_options.language = language.map(str::to_string);
    translation_options.count = count;
    for raw in assignments {
        let (name, value) = parse_assignment(raw)?;
        translation_options.values.insert(name, value);
    }

    writeln!(writer, "{}", localizer.translate(key, &translation_options))?;
    Ok(())
}

/// 列出已加载的语言
pub fn run_languages_command<W: Write>(writer: &mut W, localizer: &Localizer) -> Result<()> {
    for language in localizer.available_languages() {
        let mut markers = Vec::new();
        if language == localizer.language() {
            markers.push("当前");
        }
        if language == localizer.fallback_language() {
            markers.push("回退");
        }
        if localizer.is_language_rtl(language) {
            markers.push("RTL");
        }
        let entries = localizer.table(language).map_or(0, |t| t.len());

        if markers.is_empty() {
            writeln!(writer, "{} ({} 个条目)", language, entries)?;
        } else {
            writeln!(writer, "{} ({} 个条目) [{}]", language, entries, markers.join(", "))?;
        }
    }
    Ok(())
}

/// 覆盖率检查命令
pub fn run_check_command<W: Write>(
    writer: &mut W,
    localizer: &Localizer,
    format: report::ReportFormat,
    threshold: f32,
    ignore_pattern: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let coverage = analyzer::analyze(localizer, ignore_pattern);

    report::write_report(writer, &coverage, format, threshold, verbose)
        .context("生成报告失败")?;

    let low = coverage.below_threshold(threshold);
    if !low.is_empty() {
        let names: Vec<&str> = low.iter().map(|l| l.language.as_str()).collect();
        bail!(
            "以下语言的覆盖率低于阈值 ({:.2}%): {}",
            threshold,
            names.join(", ")
        );
    }

    Ok(())
}

/// 打开报告输出目标：文件或标准输出
pub fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("无法写入报告文件: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    })
}
