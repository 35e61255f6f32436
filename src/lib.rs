//! logent: 実行環境を判別してバックエンドを切り替えるロギングファサード
//!
//! ```no_run
//! # async fn run() -> Result<(), logent::LoggerError> {
//! use logent::{create_logger, LoggerOptions};
//! use serde_json::json;
//!
//! let logger = create_logger(LoggerOptions::new().with_name("api"));
//! logger.info("起動しました").await?;
//! logger.warn((json!({"retry": 2}), "上流が遅延しています")).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod args;
pub mod caller;
pub mod config;
pub mod entry;
pub mod environment;
pub mod error;
pub mod facade;
pub mod factory;
pub mod level;
pub mod methods;

pub use adapter::{Adapter, Backend, BackendKind, CaptureStore, CapturedLog};
pub use args::{IntoLogArgs, ParsedArgs};
pub use caller::{CallerInfo, CallerTracker};
pub use config::{Config, FileOutput, FileSetting, LoggerOptions};
pub use entry::{browser, edge, server, testing};
pub use environment::{detect, Environment, Signals};
pub use error::{ConfigError, LoggerError};
pub use facade::Logger;
pub use level::Level;

/// 実行環境を自動判定するロガーを作成
///
/// バックエンドは最初のログ呼び出し時に解決される
pub fn create_logger(options: LoggerOptions) -> Logger {
    Logger::new(options)
}
