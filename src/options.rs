use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 插值变量的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 字符串
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// 单次翻译请求的选项
///
/// `count` 与 `language` 控制查找过程，`values` 只用于插值，两者互不混用。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationOptions {
    /// 复数计数；同时以 `count` 变量参与插值
    pub count: Option<i64>,
    /// 覆盖当前语言（不会修改引擎的当前语言）
    pub language: Option<String>,
    /// 插值变量
    #[serde(default)]
    pub values: HashMap<String, Value>,
}

impl TranslationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个插值变量
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// 查找插值变量。`count` 字段优先于同名的普通变量。
    pub fn lookup(&self, name: &str) -> Option<String> {
        if name == "count" {
            if let Some(count) = self.count {
                return Some(count.to_string());
            }
        }
        self.values.get(name).map(Value::to_string)
    }
}
