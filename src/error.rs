//! エラー型定義モジュール

use crate::environment::Environment;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("無効なログレベル: {0}")]
    InvalidLevel(String),
}

/// ロガーエラー
///
/// バックエンドの構築失敗は設定エラーとして扱い、代替バックエンドへは切り替えない
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("ログディレクトリ作成エラー: {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ログファイルを開けません: {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("この実行環境では{0}バックエンドを利用できません")]
    Unsupported(Environment),

    #[error("バックエンドの初期化に失敗しました: {0}")]
    Resolution(Arc<LoggerError>),
}
