//! 翻译引擎
//!
//! 查找顺序：指定语言 -> 回退语言 -> 复数形式覆盖 -> 插值。
//! 所有业务上的"失败"都会降级为安全的默认值并记录一条警告，不会返回错误。

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{LocalizerConfig, TranslationTable};
use crate::events::{LanguageChanged, Listener, ListenerId, Listeners};
use crate::interpolate::interpolate;
use crate::options::TranslationOptions;

/// 翻译引擎
#[derive(Debug)]
pub struct Localizer {
    /// 语言代码 -> 翻译表
    translations: HashMap<String, TranslationTable>,
    /// 语言首次加载的顺序
    load_order: Vec<String>,
    current_language: String,
    fallback_language: String,
    interpolation_start: String,
    interpolation_end: String,
    rtl_languages: Vec<String>,
    listeners: Listeners,
    /// 为真时事件先暂存，由持有者在释放锁之后分发
    defer_events: bool,
    pending_events: Vec<LanguageChanged>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(LocalizerConfig::default())
    }
}

impl Localizer {
    pub fn new(config: LocalizerConfig) -> Self {
        let LocalizerConfig {
            default_language,
            fallback_language,
            translations,
            interpolation_start,
            interpolation_end,
            rtl_languages,
        } = config;

        let mut localizer = Self {
            translations: HashMap::new(),
            load_order: Vec::new(),
            current_language: fallback_language.clone(),
            fallback_language,
            interpolation_start,
            interpolation_end,
            rtl_languages,
            listeners: Listeners::default(),
            defer_events: false,
            pending_events: Vec::new(),
        };

        for (language, table) in translations {
            localizer.load_translations(&language, table);
        }

        localizer.current_language = localizer.resolve_language(&default_language);
        localizer
    }

    /// 合并翻译表，同名键以新值为准
    pub fn load_translations<I, K, V>(&mut self, language: &str, table: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if !self.translations.contains_key(language) {
            self.load_order.push(language.to_string());
        }

        let existing = self.translations.entry(language.to_string()).or_default();
        let before = existing.len();
        existing.extend(table.into_iter().map(|(k, v)| (k.into(), v.into())));

        debug!(
            "语言 '{}' 加载完成，新增 {} 个键，共 {} 个键",
            language,
            existing.len() - before,
            existing.len()
        );
    }

    /// 设置当前语言。语言不可用时切换到回退语言并发出警告。
    pub fn set_language(&mut self, language: &str) {
        let resolved = self.resolve_language(language);
        let previous_language = std::mem::replace(&mut self.current_language, resolved);

        if previous_language != self.current_language {
            let event = LanguageChanged {
                language: self.current_language.clone(),
                previous_language,
                is_rtl: self.is_rtl(),
            };
            if self.defer_events {
                self.pending_events.push(event);
            } else {
                self.listeners.emit(&event);
            }
        }
    }

    /// 切换事件暂存模式；关闭时丢弃尚未分发的事件
    pub(crate) fn set_defer_events(&mut self, defer: bool) {
        self.defer_events = defer;
        if !defer {
            self.pending_events.clear();
        }
    }

    /// 取出暂存的事件及监听器副本
    pub(crate) fn take_pending_events(&mut self) -> (Vec<LanguageChanged>, Vec<Listener>) {
        if self.pending_events.is_empty() {
            return (Vec::new(), Vec::new());
        }
        (std::mem::take(&mut self.pending_events), self.listeners.snapshot())
    }

    fn resolve_language(&self, language: &str) -> String {
        if self.translations.contains_key(language) || language == self.fallback_language {
            language.to_string()
        } else {
            warn!(
                "语言 '{}' 未加载，使用回退语言 '{}'",
                language, self.fallback_language
            );
            self.fallback_language.clone()
        }
    }

    /// 当前语言
    pub fn language(&self) -> &str {
        &self.current_language
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// 已加载的语言，按首次加载顺序排列
    pub fn available_languages(&self) -> Vec<&str> {
        self.load_order.iter().map(String::as_str).collect()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.translations.contains_key(language)
    }

    /// 某种语言的翻译表
    pub fn table(&self, language: &str) -> Option<&TranslationTable> {
        self.translations.get(language)
    }

    /// 当前语言是否从右到左书写
    pub fn is_rtl(&self) -> bool {
        self.is_language_rtl(&self.current_language)
    }

    pub fn is_language_rtl(&self, language: &str) -> bool {
        self.rtl_languages.iter().any(|l| l == language)
    }

    /// 注册语言变化监听器，在语言实际改变后同步调用
    pub fn on_language_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&LanguageChanged) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    /// 注销监听器，返回是否确实移除了
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// 翻译一个键
    ///
    /// 找不到任何模板时返回键本身（不做插值）。
    /// 空字符串模板视为已找到的翻译，不会继续查回退语言。
    pub fn translate(&self, key: &str, options: &TranslationOptions) -> String {
        let language = options
            .language
            .as_deref()
            .unwrap_or(&self.current_language);

        let mut template = self.lookup(language, key);

        if let Some(count) = options.count {
            let plural_key = format!("{}_{}", key, plural_suffix(count));
            if let Some(plural) = self.lookup(language, &plural_key) {
                template = Some(plural);
            }
        }

        let Some(template) = template else {
            warn!(
                "翻译键 '{}' 在语言 '{}' 及回退语言 '{}' 中均未找到",
                key, language, self.fallback_language
            );
            return key.to_string();
        };

        interpolate(
            template,
            &self.interpolation_start,
            &self.interpolation_end,
            |name| options.lookup(name),
        )
    }

    /// 先在指定语言中查找，找不到时再查回退语言
    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        let found = self
            .translations
            .get(language)
            .and_then(|table| table.get(key));

        match found {
            Some(template) => Some(template.as_str()),
            None if language != self.fallback_language => self
                .translations
                .get(&self.fallback_language)
                .and_then(|table| table.get(key))
                .map(String::as_str),
            None => None,
        }
    }
}

/// 只区分 one (恰好为 1) 和 other 两类
fn plural_suffix(count: i64) -> &'static str {
    if count == 1 { "one" } else { "other" }
}
