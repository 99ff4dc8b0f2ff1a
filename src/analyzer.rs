use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::engine::Localizer;

/// 翻译覆盖率分析结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// 所有语言中出现过的键总数（不含被忽略的键）
    pub total_keys: usize,
    /// 回退语言
    pub fallback_language: String,
    /// 各语言的覆盖情况，按加载顺序排列
    pub languages: Vec<LanguageCoverage>,
}

/// 单个语言的覆盖情况
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageCoverage {
    /// 语言代码
    pub language: String,
    /// 本语言直接提供的键数量
    pub present: usize,
    /// 本语言缺少的键，按字母排序
    pub missing: Vec<String>,
    /// 缺少的键中可由回退语言提供的数量
    pub covered_by_fallback: usize,
    /// 覆盖百分比 (0.0 - 100.0)
    pub coverage_percent: f32,
}

impl CoverageReport {
    /// 覆盖率低于阈值的语言
    pub fn below_threshold(&self, threshold: f32) -> Vec<&LanguageCoverage> {
        self.languages
            .iter()
            .filter(|l| l.coverage_percent < threshold)
            .collect()
    }
}

/// 分析各语言相对于全部键集合的覆盖率
pub fn analyze(localizer: &Localizer, ignore_pattern: Option<&str>) -> CoverageReport {
    info!("正在分析翻译覆盖率");

    let ignore_regex = ignore_pattern.and_then(|pattern| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!("忽略模式正则表达式无效: {}，错误: {}", pattern, err);
            None
        }
    });

    let languages = localizer.available_languages();

    let all_keys: BTreeSet<&str> = languages
        .iter()
        .filter_map(|language| localizer.table(language))
        .flat_map(|table| table.keys().map(String::as_str))
        .filter(|key| !ignore_regex.as_ref().is_some_and(|re| re.is_match(key)))
        .collect();
    let total_keys = all_keys.len();

    let fallback_language = localizer.fallback_language();
    let fallback_table = localizer.table(fallback_language);

    let languages = languages
        .into_iter()
        .map(|language| {
            let table = localizer.table(language);
            let missing: Vec<String> = all_keys
                .iter()
                .filter(|key| !table.is_some_and(|t| t.contains_key(**key)))
                .map(|key| key.to_string())
                .collect();

            let covered_by_fallback = if language == fallback_language {
                0
            } else {
                missing
                    .iter()
                    .filter(|key| fallback_table.is_some_and(|t| t.contains_key(key.as_str())))
                    .count()
            };

            let present = total_keys - missing.len();
            let coverage_percent = if total_keys == 0 {
                100.0
            } else {
                (present as f32 / total_keys as f32) * 100.0
            };

            LanguageCoverage {
                language: language.to_string(),
                present,
                missing,
                covered_by_fallback,
                coverage_percent,
            }
        })
        .collect();

    let report = CoverageReport {
        total_keys,
        fallback_language: fallback_language.to_string(),
        languages,
    };

    info!("分析完成: 共 {} 个键，{} 种语言", report.total_keys, report.languages.len());
    report
}
