use anyhow::{Context, Result, bail};
use log::debug;
use std::path::Path;

use crate::config::TranslationTable;

/// 支持的翻译文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Yaml,
    Toml,
}

impl TableFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(TableFormat::Json),
            Some("yml") | Some("yaml") => Some(TableFormat::Yaml),
            Some("toml") => Some(TableFormat::Toml),
            _ => None,
        }
    }
}

/// 解析翻译文件内容为扁平的翻译表
///
/// 嵌套的键以 `.` 连接；如果顶层只有一个键且等于语言代码，则从下一层开始。
pub fn parse_table(content: &str, format: TableFormat, language: &str) -> Result<TranslationTable> {
    let mut table = TranslationTable::new();

    match format {
        TableFormat::Json => {
            let root: serde_json::Value =
                serde_json::from_str(content).context("无法解析 JSON 内容")?;
            let serde_json::Value::Object(map) = root else {
                bail!("JSON 顶层必须是对象");
            };
            let map = match map.get(language) {
                Some(serde_json::Value::Object(nested)) if map.len() == 1 => nested,
                _ => &map,
            };
            for (key, value) in map {
                flatten_json(key, value, &mut table);
            }
        }
        TableFormat::Yaml => {
            let root: serde_yaml::Value =
                serde_yaml::from_str(content).context("无法解析 YAML 内容")?;
            let serde_yaml::Value::Mapping(map) = root else {
                bail!("YAML 顶层必须是映射/对象");
            };
            let map = match map.get(language) {
                Some(serde_yaml::Value::Mapping(nested)) if map.len() == 1 => nested,
                _ => &map,
            };
            for (key, value) in map {
                match yaml_key(key) {
                    Some(key) => flatten_yaml(&key, value, &mut table),
                    None => debug!("忽略无法识别的 YAML 键: {:?}", key),
                }
            }
        }
        TableFormat::Toml => {
            let root: toml::Table = toml::from_str(content).context("无法解析 TOML 内容")?;
            let root = match root.get(language) {
                Some(toml::Value::Table(nested)) if root.len() == 1 => nested,
                _ => &root,
            };
            for (key, value) in root {
                flatten_toml(key, value, &mut table);
            }
        }
    }

    Ok(table)
}

fn join_key(prefix: &str, key: &str) -> String {
    format!("{}.{}", prefix, key)
}

fn flatten_json(prefix: &str, value: &serde_json::Value, table: &mut TranslationTable) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                flatten_json(&join_key(prefix, key), val, table);
            }
        }
        serde_json::Value::String(s) => {
            table.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Null => {
            debug!("忽略空值: {}", prefix);
        }
        _ => {
            // 数字、布尔等使用 to_string
            table.insert(prefix.to_string(), value.to_string());
        }
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, table: &mut TranslationTable) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key) = yaml_key(key) {
                    flatten_yaml(&join_key(prefix, &key), val, table);
                }
            }
        }
        serde_yaml::Value::String(s) => {
            table.insert(prefix.to_string(), s.clone());
        }
        serde_yaml::Value::Number(n) => {
            table.insert(prefix.to_string(), n.to_string());
        }
        serde_yaml::Value::Bool(b) => {
            table.insert(prefix.to_string(), b.to_string());
        }
        _ => {
            debug!("忽略不支持的 YAML 值: {}", prefix);
        }
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, table: &mut TranslationTable) {
    match value {
        toml::Value::Table(map) => {
            for (key, val) in map {
                flatten_toml(&join_key(prefix, key), val, table);
            }
        }
        toml::Value::String(s) => {
            table.insert(prefix.to_string(), s.clone());
        }
        _ => {
            table.insert(prefix.to_string(), value.to_string());
        }
    }
}
