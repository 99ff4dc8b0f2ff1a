//! 进程级默认实例与简写函数 [`t`]
//!
//! 引擎本身不加锁；默认实例需要跨线程共享，因此放在 `Mutex` 中。
//! 默认实例上的语言变化事件在释放锁之后才分发，监听器可以再调用 [`t`]。

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::engine::Localizer;
use crate::events::emit_to;
use crate::options::TranslationOptions;

static DEFAULT: OnceLock<Mutex<Localizer>> = OnceLock::new();

fn lock() -> MutexGuard<'static, Localizer> {
    DEFAULT
        .get_or_init(|| {
            let mut localizer = Localizer::default();
            localizer.set_defer_events(true);
            Mutex::new(localizer)
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 在默认实例上执行操作
pub fn with_default<R>(f: impl FnOnce(&mut Localizer) -> R) -> R {
    let (result, events, listeners) = {
        let mut guard = lock();
        let result = f(&mut *guard);
        let (events, listeners) = guard.take_pending_events();
        (result, events, listeners)
    };

    for event in &events {
        emit_to(&listeners, event);
    }
    result
}

/// 替换默认实例，返回旧实例
pub fn install(mut localizer: Localizer) -> Localizer {
    localizer.set_defer_events(true);
    let mut previous = std::mem::replace(&mut *lock(), localizer);
    previous.set_defer_events(false);
    previous
}

/// 使用默认实例翻译
pub fn t(key: &str, options: &TranslationOptions) -> String {
    lock().translate(key, options)
}
