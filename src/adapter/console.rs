//! コンソールアダプタ
//!
//! 依存の少ない最小構成のロガー。エッジランタイムとブラウザで使う。

use super::Adapter;
use crate::args;
use crate::config::{Config, LoggerOptions};
use crate::level::Level;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;

/// コンソール出力先
///
/// trace/debug/info は `info`、warn は `warn`、error/fatal は `error` に送られる
pub trait ConsoleSink: Send + Sync {
    fn info(&self, line: &str);
    fn warn(&self, line: &str);
    fn error(&self, line: &str);

    /// レベルに応じた出力先へ送る
    fn emit(&self, level: Level, line: &str) {
        match level {
            Level::Trace | Level::Debug | Level::Info => self.info(line),
            Level::Warn => self.warn(line),
            Level::Error | Level::Fatal => self.error(line),
        }
    }
}

/// 標準の出力先
///
/// ネイティブではstdout/stderr、WASMではブラウザの `console` API
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

#[cfg(not(target_arch = "wasm32"))]
impl ConsoleSink for StdioSink {
    fn info(&self, line: &str) {
        use std::io::Write;
        // 出力先が閉じていてもロギング呼び出しは失敗させない
        let _ = writeln!(std::io::stdout().lock(), "{}", line);
    }

    fn warn(&self, line: &str) {
        use std::io::Write;
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn error(&self, line: &str) {
        use std::io::Write;
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for StdioSink {
    fn info(&self, line: &str) {
        web_sys::console::info_1(&wasm_bindgen::JsValue::from_str(line));
    }

    fn warn(&self, line: &str) {
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(line));
    }

    fn error(&self, line: &str) {
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(line));
    }
}

/// コンソールアダプタ
pub struct ConsoleAdapter {
    config: Config,
    sink: Box<dyn ConsoleSink>,
}

impl ConsoleAdapter {
    /// 標準の出力先でConsoleAdapterを作成
    pub fn new(options: &LoggerOptions) -> Self {
        Self::with_sink(options, Box::new(StdioSink))
    }

    /// 出力先を指定してConsoleAdapterを作成
    pub fn with_sink(options: &LoggerOptions, sink: Box<dyn ConsoleSink>) -> Self {
        Self {
            config: Config::resolve(options),
            sink,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `[timestamp] [LEVEL] [name] message` 形式に整形
    pub fn format_line(&self, level: Level, args: &[Value]) -> String {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        format!(
            "[{}] [{}] [{}] {}",
            timestamp,
            level.label(),
            self.config.name,
            args::join(args)
        )
    }
}

impl Adapter for ConsoleAdapter {
    fn log(&self, level: Level, args: &[Value]) {
        if !level.is_enabled(self.config.level) || !self.config.console {
            return;
        }
        let line = self.format_line(level, args);
        self.sink.emit(level, &line);
    }
}

impl fmt::Debug for ConsoleAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
