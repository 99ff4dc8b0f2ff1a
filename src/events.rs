use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 当前语言发生变化时发出的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageChanged {
    /// 新的当前语言
    pub language: String,
    /// 变化前的语言
    pub previous_language: String,
    /// 新语言是否为从右到左书写
    pub is_rtl: bool,
}

/// 监听器句柄，用于注销
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Listener = Arc<dyn Fn(&LanguageChanged) + Send + Sync>;

/// 语言变化监听器列表
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// 按注册顺序同步通知
    pub(crate) fn emit(&self, event: &LanguageChanged) {
        emit_to(&self.snapshot(), event);
    }

    /// 当前监听器的副本，可在不持有引擎的情况下调用
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        self.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) fn emit_to(listeners: &[Listener], event: &LanguageChanged) {
    for listener in listeners {
        listener(event);
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
