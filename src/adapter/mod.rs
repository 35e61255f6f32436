//! バックエンドアダプタモジュール
//!
//! - `ConsoleAdapter`: エッジランタイム・ブラウザ向けの軽量コンソール出力
//! - `StructuredAdapter`: サーバープロセス向けの構造化ログ（ネイティブのみ）
//! - `CaptureAdapter`: テスト向けのメモリ内キャプチャ
//!
//! 3種類は `Backend` の閉じた列挙として扱い、実行時に追加はできない。

pub mod capture;
pub mod console;
#[cfg(not(target_arch = "wasm32"))]
pub mod structured;

pub use capture::{CaptureAdapter, CaptureStore, CapturedLog};
pub use console::{ConsoleAdapter, ConsoleSink, StdioSink};
#[cfg(not(target_arch = "wasm32"))]
pub use structured::{DailyFile, RuntimeHints, StructuredAdapter};

use crate::level::Level;
use serde_json::Value;
use std::fmt;

/// 全アダプタ共通のロギング操作
pub trait Adapter: Send + Sync {
    /// 指定レベルで記録する（レベルフィルタはアダプタ側で行う）
    fn log(&self, level: Level, args: &[Value]);

    /// 呼び出しスレッドで保持している出力を書き出す
    ///
    /// バックグラウンドワーカーに渡した分は対象外
    fn flush(&self) {}

    fn trace(&self, args: &[Value]) {
        self.log(Level::Trace, args);
    }

    fn debug(&self, args: &[Value]) {
        self.log(Level::Debug, args);
    }

    fn info(&self, args: &[Value]) {
        self.log(Level::Info, args);
    }

    fn warn(&self, args: &[Value]) {
        self.log(Level::Warn, args);
    }

    fn error(&self, args: &[Value]) {
        self.log(Level::Error, args);
    }

    fn fatal(&self, args: &[Value]) {
        self.log(Level::Fatal, args);
    }
}

/// バックエンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Console,
    Structured,
    Capture,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Console => "console",
            BackendKind::Structured => "structured",
            BackendKind::Capture => "capture",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解決済みのバックエンド
#[derive(Debug)]
pub enum Backend {
    Console(ConsoleAdapter),
    #[cfg(not(target_arch = "wasm32"))]
    Structured(StructuredAdapter),
    Capture(CaptureAdapter),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Console(_) => BackendKind::Console,
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Structured(_) => BackendKind::Structured,
            Backend::Capture(_) => BackendKind::Capture,
        }
    }
}

impl Adapter for Backend {
    fn log(&self, level: Level, args: &[Value]) {
        match self {
            Backend::Console(adapter) => adapter.log(level, args),
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Structured(adapter) => adapter.log(level, args),
            Backend::Capture(adapter) => adapter.log(level, args),
        }
    }

    fn flush(&self) {
        match self {
            Backend::Console(adapter) => adapter.flush(),
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Structured(adapter) => adapter.flush(),
            Backend::Capture(adapter) => adapter.flush(),
        }
    }
}
