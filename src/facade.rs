//! ロガーファサード
//!
//! 利用者が触る唯一のロガー型。バックエンドは最初の呼び出し時（または
//! `ready()`）に一度だけ解決し、それ以降の呼び出しはすべて同じバックエンドへ送る。

use crate::adapter::{Adapter, BackendKind, CaptureStore};
use crate::args::IntoLogArgs;
use crate::config::LoggerOptions;
use crate::environment::Environment;
use crate::error::LoggerError;
use crate::factory::{self, Resolved};
use crate::level::Level;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::warn;

/// 解決済みの結果
type Resolution = Result<Resolved, Arc<LoggerError>>;

/// ロガー
///
/// 解決前の呼び出しは公平なロックの待ち行列に並び、呼び出し順にバックエンドへ届く。
/// 解決に失敗した場合は同じエラーを全呼び出しに返し、再試行はしない。
#[derive(Debug)]
pub struct Logger {
    options: LoggerOptions,
    store: Arc<CaptureStore>,
    resolved: OnceCell<Resolution>,
    // 解決待ちの呼び出しを到着順に1件ずつ通す
    turn: Mutex<()>,
    queued: AtomicUsize,
}

/// 待ち行列に並んでいる呼び出しの数を管理する
///
/// キャンセルされた場合もドロップで数を戻す
struct Queued<'a>(&'a AtomicUsize);

impl<'a> Queued<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for Queued<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

fn settled(result: &Resolution) -> Result<&Resolved, LoggerError> {
    result
        .as_ref()
        .map_err(|err| LoggerError::Resolution(Arc::clone(err)))
}

impl Logger {
    /// プロセス共有のキャプチャストアを使うロガーを作成
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_capture_store(options, CaptureStore::global())
    }

    /// テスト環境で使うキャプチャストアを指定して作成
    pub fn with_capture_store(options: LoggerOptions, store: Arc<CaptureStore>) -> Self {
        Self {
            options,
            store,
            resolved: OnceCell::new(),
            turn: Mutex::new(()),
            queued: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    async fn resolved(&self) -> Result<&Resolved, LoggerError> {
        let result = self
            .resolved
            .get_or_init(|| async {
                factory::resolve(&self.options, &self.store)
                    .await
                    .map_err(|err| {
                        warn!(error = %err, "ロガーの初期化に失敗しました");
                        Arc::new(err)
                    })
            })
            .await;

        settled(result)
    }

    /// バックエンドを今すぐ解決する
    ///
    /// 起動時に設定ミスを検出したい場合に使う
    pub async fn ready(&self) -> Result<(), LoggerError> {
        self.resolved().await.map(|_| ())
    }

    /// 解決された実行環境
    pub async fn environment(&self) -> Result<Environment, LoggerError> {
        Ok(self.resolved().await?.environment)
    }

    /// 解決されたバックエンドの種類
    pub async fn backend_kind(&self) -> Result<BackendKind, LoggerError> {
        Ok(self.resolved().await?.backend.kind())
    }

    /// 指定レベルで記録
    ///
    /// 解決済みで待ち行列が空ならそのまま送る。それ以外は到着順に並んで待つ
    pub async fn log_at(&self, level: Level, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        let args = args.into_log_args();

        if self.queued.load(Ordering::Acquire) == 0 {
            if let Some(result) = self.resolved.get() {
                settled(result)?.backend.log(level, &args);
                return Ok(());
            }
        }

        let _queued = Queued::enter(&self.queued);
        let _turn = self.turn.lock().await;
        let resolved = self.resolved().await?;
        resolved.backend.log(level, &args);
        Ok(())
    }

    /// レベル名で記録（未知の名前はinfo）
    pub async fn log(&self, level_name: &str, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::from_name_or_info(level_name), args).await
    }

    pub async fn trace(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Trace, args).await
    }

    pub async fn debug(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Debug, args).await
    }

    pub async fn info(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Info, args).await
    }

    pub async fn warn(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Warn, args).await
    }

    pub async fn error(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Error, args).await
    }

    pub async fn fatal(&self, args: impl IntoLogArgs) -> Result<(), LoggerError> {
        self.log_at(Level::Fatal, args).await
    }

    /// 同期書き込みの出力先を書き出す（未解決なら何もしない）
    ///
    /// バックグラウンドワーカーに渡した分はロガーのドロップ時に書き出される
    pub fn flush(&self) {
        if let Some(Ok(resolved)) = self.resolved.get() {
            resolved.backend.flush();
        }
    }
}
