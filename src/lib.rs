//! localizer - 基于键的字符串翻译引擎
//!
//! 按语言代码保存 键 -> 模板 的翻译表，解析时依次进行语言回退、
//! 复数形式选择 (`_one` / `_other`) 和占位符插值。

pub mod actions;
pub mod analyzer;
pub mod config;
pub mod engine;
pub mod events;
pub mod global;
pub mod interpolate;
pub mod loader;
pub mod options;
pub mod parser;
pub mod report;

pub use config::{LocalizerConfig, TranslationTable};
pub use engine::Localizer;
pub use events::{LanguageChanged, ListenerId};
pub use global::t;
pub use options::{TranslationOptions, Value};
