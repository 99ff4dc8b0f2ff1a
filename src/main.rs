use localizer::{actions, config::LocalizerConfig, config::ProjectConfig, report::ReportFormat};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// localizer - 基于键的字符串翻译工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 翻译文件目录，默认为 locales（不存在时跳过）
    #[arg(short = 'p', long)]
    locales: Option<PathBuf>,

    /// 引擎配置文件 (toml / yaml / json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 初始语言，覆盖配置文件
    #[arg(long)]
    default_language: Option<String>,

    /// 回退语言，覆盖配置文件
    #[arg(long)]
    fallback_language: Option<String>,

    /// 不要忽略以 "TODO" 开头的文件
    #[arg(long)]
    no_ignore_todo: bool,

    /// 详细输出模式
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 翻译一个键
    Translate {
        /// 翻译键
        key: String,

        /// 使用指定语言，而不是当前语言
        #[arg(short, long)]
        language: Option<String>,

        /// 复数计数
        #[arg(short, long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// 插值变量，格式为 name=value，可重复
        #[arg(short, long = "set")]
        set: Vec<String>,
    },
    /// 列出已加载的语言
    Languages,
    /// 检查各语言的翻译覆盖率
    Check {
        /// 输出格式: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// 输出文件路径，如未指定则输出到控制台
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 覆盖率阈值百分比，低于此值时返回错误
        #[arg(long, default_value_t = 0.0)]
        threshold: f32,

        /// 忽略匹配指定模式的键（正则表达式）
        #[arg(long)]
        ignore_pattern: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut localizer_config = match &cli.config {
        Some(path) => LocalizerConfig::from_file(path)?,
        None => LocalizerConfig::default(),
    };
    if let Some(language) = cli.default_language {
        localizer_config.default_language = language;
    }
    if let Some(language) = cli.fallback_language {
        localizer_config.fallback_language = language;
    }

    let config = ProjectConfig {
        locales_dir: cli.locales,
        ignore_todo_files: !cli.no_ignore_todo,
        verbose: cli.verbose,
        localizer: localizer_config,
    };

    let localizer = actions::build_localizer(&config)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Translate {
            key,
            language,
            count,
            set,
        } => actions::run_translate_command(
            &mut stdout,
            &localizer,
            &key,
            language.as_deref(),
            count,
            &set,
        )?,
        Commands::Languages => actions::run_languages_command(&mut stdout, &localizer)?,
        Commands::Check {
            format,
            output,
            threshold,
            ignore_pattern,
        } => {
            let mut writer = actions::open_output(output.as_deref())?;
            actions::run_check_command(
                &mut writer,
                &localizer,
                format,
                threshold,
                ignore_pattern.as_deref(),
                config.verbose,
            )?
        }
    }

    Ok(())
}
