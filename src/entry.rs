//! 実行環境ごとのエントリポイント
//!
//! 各モジュールの `create_logger` は実行環境を固定し、自動判定を行わない。

use crate::config::LoggerOptions;
use crate::environment::Environment;
use crate::facade::Logger;

fn forced(options: LoggerOptions, environment: Environment) -> Logger {
    Logger::new(options.with_environment(environment))
}

/// サーバープロセス向け（構造化アダプタ）
pub mod server {
    use super::*;

    pub fn create_logger(options: LoggerOptions) -> Logger {
        forced(options, Environment::Server)
    }
}

/// エッジランタイム向け（コンソールアダプタ）
pub mod edge {
    use super::*;

    pub fn create_logger(options: LoggerOptions) -> Logger {
        forced(options, Environment::Edge)
    }
}

/// ブラウザ向け（コンソールアダプタ）
pub mod browser {
    use super::*;

    pub fn create_logger(options: LoggerOptions) -> Logger {
        forced(options, Environment::Browser)
    }
}

/// テスト向け（キャプチャアダプタ）
///
/// `captured_logs` などはプロセス共有のストアを対象にする
pub mod testing {
    use super::*;
    use crate::adapter::{CaptureStore, CapturedLog};
    use crate::level::Level;
    use std::sync::Arc;

    /// プロセス共有のストアに記録するロガー
    pub fn create_logger(options: LoggerOptions) -> Logger {
        forced(options, Environment::Test)
    }

    /// 指定したストアに記録するロガー
    pub fn create_logger_with_store(options: LoggerOptions, store: Arc<CaptureStore>) -> Logger {
        Logger::with_capture_store(options.with_environment(Environment::Test), store)
    }

    pub fn captured_logs() -> Vec<CapturedLog> {
        CaptureStore::global().logs()
    }

    pub fn captured_logs_by_level(level: Level) -> Vec<CapturedLog> {
        CaptureStore::global().logs_by_level(level)
    }

    pub fn clear_captured_logs() {
        CaptureStore::global().clear();
    }

    pub fn captured_logs_count() -> usize {
        CaptureStore::global().len()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::adapter::{BackendKind, CaptureStore};
    use crate::level::Level;
    use once_cell::sync::Lazy;
    use parking_lot::Mutex;
    use std::sync::Arc;

    // プロセス共有ストアを触るテストを直列化する
    static GLOBAL_STORE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[tokio::test]
    async fn test_forced_environments() {
        let cases = [
            (edge::create_logger(LoggerOptions::new()), Environment::Edge),
            (browser::create_logger(LoggerOptions::new()), Environment::Browser),
            (testing::create_logger(LoggerOptions::new()), Environment::Test),
        ];

        for (logger, expected) in cases {
            assert_eq!(logger.options().environment, Some(expected));
            assert_eq!(logger.environment().await.unwrap(), expected);
        }

        let server = server::create_logger(LoggerOptions::new().without_file());
        assert_eq!(server.options().environment, Some(Environment::Server));
        assert_eq!(server.backend_kind().await.unwrap(), BackendKind::Structured);
    }

    #[tokio::test]
    async fn test_global_capture_helpers() {
        let _guard = GLOBAL_STORE_LOCK.lock();
        clear_captured_logs();

        let logger = create_logger(LoggerOptions::new().with_name("global"));
        logger.info("one").await.unwrap();
        logger.error("two").await.unwrap();
        logger.info("three").await.unwrap();

        assert_eq!(captured_logs_count(), 3);
        assert_eq!(captured_logs().len(), captured_logs_count());
        let errors = captured_logs_by_level(Level::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "two");

        clear_captured_logs();
        assert_eq!(captured_logs_count(), 0);
        clear_captured_logs();
        assert!(captured_logs().is_empty());
    }

    #[tokio::test]
    async fn test_private_store_is_isolated() {
        let store = Arc::new(CaptureStore::new());
        let logger = create_logger_with_store(LoggerOptions::new(), Arc::clone(&store));

        logger.warn("private").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.logs()[0].message, "private");
    }
}
