//! キャプチャアダプタ
//!
//! テスト環境向けにログをメモリ内へ記録する。記録先の `CaptureStore` は
//! 複数のロガーで共有でき、明示的にクリアするまで内容を保持する。

use super::console::{ConsoleSink, StdioSink};
use super::Adapter;
use crate::args::ParsedArgs;
use crate::config::LoggerOptions;
use crate::level::Level;
use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// プロセス全体で共有するストア
static GLOBAL_STORE: Lazy<Arc<CaptureStore>> = Lazy::new(|| Arc::new(CaptureStore::new()));

/// キャプチャしたログ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedLog {
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    /// UNIXエポックからのミリ秒（追記順に単調非減少）
    pub timestamp: i64,
}

#[derive(Debug, Default)]
struct StoreInner {
    logs: Vec<CapturedLog>,
    last_timestamp: i64,
}

/// キャプチャしたログの保存先
#[derive(Debug, Default)]
pub struct CaptureStore {
    inner: Mutex<StoreInner>,
}

impl CaptureStore {
    /// 新しい空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// プロセス全体で共有するストア
    pub fn global() -> Arc<CaptureStore> {
        Arc::clone(&GLOBAL_STORE)
    }

    /// ログを追記
    pub fn push(&self, level: Level, parsed: ParsedArgs) {
        let mut inner = self.inner.lock();
        // 時計が戻っても追記順のタイムスタンプは減少させない
        let timestamp = Utc::now().timestamp_millis().max(inner.last_timestamp);
        inner.last_timestamp = timestamp;
        inner.logs.push(CapturedLog {
            level,
            message: parsed.message,
            context: parsed.context,
            timestamp,
        });
    }

    /// 全ログのコピー（追記順）
    pub fn logs(&self) -> Vec<CapturedLog> {
        self.inner.lock().logs.clone()
    }

    /// 指定レベルのログのみ
    pub fn logs_by_level(&self, level: Level) -> Vec<CapturedLog> {
        self.inner
            .lock()
            .logs
            .iter()
            .filter(|log| log.level == level)
            .cloned()
            .collect()
    }

    /// 全ログを削除（何度呼んでもよい）
    pub fn clear(&self) {
        self.inner.lock().logs.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// キャプチャアダプタ
pub struct CaptureAdapter {
    store: Arc<CaptureStore>,
    level: Level,
    echo: bool,
    sink: Box<dyn ConsoleSink>,
}

impl CaptureAdapter {
    /// 新しいCaptureAdapterを作成
    ///
    /// テストでは静かに動くよう、`console = true` を明示したときだけ出力する
    pub fn new(options: &LoggerOptions, store: Arc<CaptureStore>) -> Self {
        Self::with_sink(options, store, Box::new(StdioSink))
    }

    /// エコー出力先を指定して作成
    pub fn with_sink(
        options: &LoggerOptions,
        store: Arc<CaptureStore>,
        sink: Box<dyn ConsoleSink>,
    ) -> Self {
        Self {
            store,
            level: options.level.unwrap_or_default(),
            echo: options.console == Some(true),
            sink,
        }
    }

    pub fn store(&self) -> &Arc<CaptureStore> {
        &self.store
    }

    fn echo_line(level: Level, parsed: &ParsedArgs) -> String {
        match parsed.context {
            Some(ref context) => format!(
                "[{}] {} {}",
                level.label(),
                Value::Object(context.clone()),
                parsed.message
            ),
            None => format!("[{}] {}", level.label(), parsed.message),
        }
    }
}

impl Adapter for CaptureAdapter {
    fn log(&self, level: Level, args: &[Value]) {
        if !level.is_enabled(self.level) {
            return;
        }

        let parsed = ParsedArgs::parse(args);
        if self.echo {
            self.sink.emit(level, &Self::echo_line(level, &parsed));
        }
        self.store.push(level, parsed);
    }
}

impl fmt::Debug for CaptureAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureAdapter")
            .field("level", &self.level)
            .field("echo", &self.echo)
            .field("captured", &self.store.len())
            .finish_non_exhaustive()
    }
}
