//! 从文件或目录加载翻译表
//!
//! 加载失败时返回错误，引擎状态保持不变：内容会先完整解析，成功后才合并。

use anyhow::{Context, Result, bail};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::config::TranslationTable;
use crate::engine::Localizer;
use crate::parser::{TableFormat, parse_table};

/// 一个已加载的翻译文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFile {
    /// 语言代码
    pub language: String,
    /// 文件路径
    pub path: PathBuf,
    /// 文件中的翻译条目数量
    pub entries: usize,
}

/// 从 JSON 字符串加载翻译
pub fn load_str(localizer: &mut Localizer, language: &str, payload: &str) -> Result<usize> {
    let table = parse_table(payload, TableFormat::Json, language)
        .with_context(|| format!("无法加载语言 '{}' 的翻译", language))?;
    let entries = table.len();
    localizer.load_translations(language, table);
    Ok(entries)
}

/// 读取单个翻译文件
pub fn read_file(path: &Path, language: &str) -> Result<TranslationTable> {
    let Some(format) = TableFormat::from_path(path) else {
        bail!("不支持的文件类型: {}", path.display());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取文件: {}", path.display()))?;

    parse_table(&content, format, language)
        .with_context(|| format!("无法解析翻译文件: {}", path.display()))
}

/// 加载单个翻译文件，返回合并的条目数量
pub fn load_file(localizer: &mut Localizer, language: &str, path: &Path) -> Result<usize> {
    let table = read_file(path, language)?;
    let entries = table.len();
    localizer.load_translations(language, table);
    info!("已加载 {} 个翻译条目: {} ({})", entries, path.display(), language);
    Ok(entries)
}

/// 加载目录下的所有翻译文件
///
/// 语言代码从文件名或第一级子目录推断。所有文件解析成功后才按路径顺序合并。
pub fn load_dir(
    localizer: &mut Localizer,
    locales_path: &Path,
    ignore_todo_files: bool,
) -> Result<Vec<LoadedFile>> {
    info!("正在解析翻译文件目录: {}", locales_path.display());

    if !locales_path.is_dir() {
        bail!("翻译文件目录不存在: {}", locales_path.display());
    }

    let mut parsed = Vec::new();

    for entry in WalkDir::new(locales_path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || TableFormat::from_path(path).is_none() {
            continue;
        }

        if ignore_todo_files && is_todo_file(path) {
            debug!("忽略 TODO 文件: {}", path.display());
            continue;
        }

        let Some(language) = language_from_path(path, locales_path) else {
            debug!("无法从路径推断语言代码，跳过: {}", path.display());
            continue;
        };

        debug!("处理翻译文件: {} ({})", path.display(), language);
        let table = read_file(path, &language)?;
        parsed.push((language, path.to_path_buf(), table));
    }

    let loaded = parsed
        .into_iter()
        .map(|(language, path, table)| {
            let entries = table.len();
            localizer.load_translations(&language, table);
            LoadedFile {
                language,
                path,
                entries,
            }
        })
        .collect::<Vec<_>>();

    info!("解析完成，加载了 {} 个翻译文件", loaded.len());
    Ok(loaded)
}

fn is_todo_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.to_lowercase().starts_with("todo"))
}

/// 从文件路径推断语言代码 (en.json, zh-CN.yml, 或 fr/common.toml)
pub fn language_from_path(path: &Path, locales_path: &Path) -> Option<String> {
    // 先看第一级子目录
    if let Some(parent) = path.parent() {
        if let Ok(relative) = parent.strip_prefix(locales_path) {
            if let Some(first_dir) = relative.components().next() {
                if let Some(lang) = first_dir.as_os_str().to_str() {
                    if looks_like_language(lang) {
                        return Some(lang.to_string());
                    }
                }
            }
        }
    }

    // 再看文件名
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|stem| looks_like_language(stem))
        .map(str::to_string)
}

/// 语言代码形如 `en`、`fil`、`zh-CN`、`zh-Hans`、`es-419`
fn looks_like_language(name: &str) -> bool {
    static LANGUAGE_TAG: OnceLock<Option<Regex>> = OnceLock::new();
    LANGUAGE_TAG
        .get_or_init(|| {
            Regex::new(r"^[a-z]{2,3}(?:[-_](?:[A-Za-z]{2}|[A-Z][a-z]{3}|[0-9]{3}))?$").ok()
        })
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}
