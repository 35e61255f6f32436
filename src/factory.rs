//! バックエンド解決モジュール
//!
//! 明示指定された実行環境、なければ自動判定の結果から、
//! 対応するバックエンドを1つだけ構築する。

use crate::adapter::{Backend, CaptureAdapter, CaptureStore, ConsoleAdapter};
use crate::config::LoggerOptions;
use crate::environment::{self, Environment};
use crate::error::LoggerError;
use std::sync::Arc;
use tracing::debug;

/// 解決済みのバックエンドと実行環境
#[derive(Debug)]
pub struct Resolved {
    pub environment: Environment,
    pub backend: Backend,
}

/// 実行環境を決めてバックエンドを構築
///
/// 構築に失敗しても別のバックエンドには切り替えない
pub async fn resolve(
    options: &LoggerOptions,
    store: &Arc<CaptureStore>,
) -> Result<Resolved, LoggerError> {
    let environment = match options.environment {
        Some(environment) => {
            debug!(environment = %environment, "実行環境が明示指定されています");
            environment
        }
        None => {
            let environment = environment::detect();
            debug!(environment = %environment, "実行環境を判定しました");
            environment
        }
    };

    let backend = build(environment, options, store).await?;
    Ok(Resolved {
        environment,
        backend,
    })
}

async fn build(
    environment: Environment,
    options: &LoggerOptions,
    store: &Arc<CaptureStore>,
) -> Result<Backend, LoggerError> {
    match environment {
        Environment::Test => Ok(Backend::Capture(CaptureAdapter::new(
            options,
            Arc::clone(store),
        ))),
        Environment::Edge | Environment::Browser => {
            Ok(Backend::Console(ConsoleAdapter::new(options)))
        }
        Environment::Server => build_server(options).await,
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn build_server(options: &LoggerOptions) -> Result<Backend, LoggerError> {
    let adapter = crate::adapter::StructuredAdapter::create(options).await?;
    Ok(Backend::Structured(adapter))
}

#[cfg(target_arch = "wasm32")]
async fn build_server(_options: &LoggerOptions) -> Result<Backend, LoggerError> {
    Err(LoggerError::Unsupported(Environment::Server))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::BackendKind;
    use tempfile::TempDir;

    fn private_store() -> Arc<CaptureStore> {
        Arc::new(CaptureStore::new())
    }

    #[tokio::test]
    async fn test_override_selects_each_backend() {
        let temp_dir = TempDir::new().unwrap();
        let cases = [
            (Environment::Test, BackendKind::Capture),
            (Environment::Edge, BackendKind::Console),
            (Environment::Browser, BackendKind::Console),
            (Environment::Server, BackendKind::Structured),
        ];

        for (environment, expected) in cases {
            let options = LoggerOptions::new()
                .with_environment(environment)
                .with_file_dir(temp_dir.path())
                .with_console(false)
                .with_sync(true);
            let resolved = resolve(&options, &private_store()).await.unwrap();
            assert_eq!(resolved.environment, environment);
            assert_eq!(resolved.backend.kind(), expected);
        }
    }

    #[tokio::test]
    async fn test_console_backends_never_touch_filesystem() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("never");

        for environment in [Environment::Edge, Environment::Browser, Environment::Test] {
            let options = LoggerOptions::new()
                .with_environment(environment)
                .with_file_dir(&log_dir);
            resolve(&options, &private_store()).await.unwrap();
        }

        assert!(!log_dir.exists());
    }

    #[tokio::test]
    async fn test_server_construction_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let options = LoggerOptions::new()
            .with_environment(Environment::Server)
            .with_file_dir(blocker.join("logs"));
        let result = resolve(&options, &private_store()).await;

        assert!(matches!(result, Err(LoggerError::DirectoryCreation { .. })));
    }

    #[tokio::test]
    async fn test_detection_used_without_override() {
        let resolved = resolve(&LoggerOptions::new().without_file(), &private_store())
            .await
            .unwrap();
        assert_eq!(resolved.environment, environment::detect());
    }
}
