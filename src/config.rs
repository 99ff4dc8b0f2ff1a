use anyhow::{Context, Result, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// 一种语言的翻译表：键 -> 模板
pub type TranslationTable = HashMap<String, String>;

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_interpolation_start() -> String {
    "${".to_string()
}

fn default_interpolation_end() -> String {
    "}".to_string()
}

fn default_rtl_languages() -> Vec<String> {
    ["ar", "he", "fa", "ur"].iter().map(|s| s.to_string()).collect()
}

const DEFAULT_LOCALES_DIR: &str = "locales";

/// 翻译引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// 初始的当前语言
    #[serde(default = "default_language", alias = "defaultLanguage")]
    pub default_language: String,
    /// 回退语言
    #[serde(default = "default_language", alias = "fallbackLanguage")]
    pub fallback_language: String,
    /// 预置的翻译，按语言代码排序加载
    #[serde(default)]
    pub translations: BTreeMap<String, TranslationTable>,
    /// 占位符起始标记
    #[serde(default = "default_interpolation_start", alias = "interpolationStart")]
    pub interpolation_start: String,
    /// 占位符结束标记
    #[serde(default = "default_interpolation_end", alias = "interpolationEnd")]
    pub interpolation_end: String,
    /// 从右到左书写的语言
    #[serde(default = "default_rtl_languages", alias = "rtlLanguages")]
    pub rtl_languages: Vec<String>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            fallback_language: default_language(),
            translations: BTreeMap::new(),
            interpolation_start: default_interpolation_start(),
            interpolation_end: default_interpolation_end(),
            rtl_languages: default_rtl_languages(),
        }
    }
}

impl LocalizerConfig {
    /// 从配置文件读取，格式由扩展名决定 (toml / yaml / yml / json)
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("正在读取配置文件: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("无法解析 TOML 配置: {}", path.display()))?,
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)
                .with_context(|| format!("无法解析 YAML 配置: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("无法解析 JSON 配置: {}", path.display()))?,
            _ => bail!("不支持的配置文件类型: {}", path.display()),
        };

        Ok(config)
    }
}

/// 命令行工具的项目配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// 翻译文件目录；未指定时尝试 `locales`，不存在则跳过
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
    /// 默认忽略翻译文件夹下以 todo 开头的文件
    #[serde(default = "default_true")]
    pub ignore_todo_files: bool,
    /// 详细输出模式
    #[serde(default)]
    pub verbose: bool,
    /// 引擎配置
    #[serde(default)]
    pub localizer: LocalizerConfig,
}

impl ProjectConfig {
    /// 实际使用的翻译文件目录
    pub fn locales_path(&self) -> PathBuf {
        self.locales_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALES_DIR))
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            locales_dir: None,
            ignore_todo_files: true,
            verbose: false,
            localizer: LocalizerConfig::default(),
        }
    }
}
