//! デフォルトロガーの便利関数
//!
//! 初回呼び出し時に自動判定のロガーを1つ作り、以降はそれを使い回す。

use crate::args::IntoLogArgs;
use crate::config::LoggerOptions;
use crate::error::LoggerError;
use crate::facade::Logger;
use crate::level::Level;
use once_cell::sync::Lazy;

static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new(LoggerOptions::new()));

/// プロセス共有のデフォルトロガー
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

pub async fn trace(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Trace, args).await
}

pub async fn debug(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Debug, args).await
}

pub async fn info(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Info, args).await
}

pub async fn warn(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Warn, args).await
}

pub async fn error(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Error, args).await
}

pub async fn fatal(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log_at(Level::Fatal, args).await
}

/// traceの別名
pub async fn verbose(args: impl IntoLogArgs) -> Result<(), LoggerError> {
    trace(args).await
}

/// レベル名で記録（未知の名前はinfo）
pub async fn log(level_name: &str, args: impl IntoLogArgs) -> Result<(), LoggerError> {
    default_logger().log(level_name, args).await
}
