//! 設定モジュール
//!
//! `LoggerOptions` は利用者が指定する任意項目、`Config` はデフォルト値と
//! マージした後の確定値。未指定の項目は常にデフォルトへフォールバックする。

use crate::environment::Environment;
use crate::error::ConfigError;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// デフォルトのロガー名
pub const DEFAULT_NAME: &str = "app";

/// ファイル出力の指定
///
/// TOMLでは `file = false`、`file = true`、`[file] dirname = "..."` のいずれか
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FileSetting {
    Toggle(bool),
    Dir { dirname: Option<PathBuf> },
}

/// ロガー設定（未指定の項目はデフォルト値を使う）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggerOptions {
    /// 最小ログレベル
    pub level: Option<Level>,
    /// コンソール出力
    pub console: Option<bool>,
    /// ファイル出力
    pub file: Option<FileSetting>,
    /// 色付き出力
    pub colors: Option<bool>,
    /// ロガー名
    pub name: Option<String>,
    /// 実行環境の明示指定（指定時は自動判定しない）
    pub environment: Option<Environment>,
    /// 構造化バックエンドの同期書き込み
    pub sync: Option<bool>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = Some(enabled);
        self
    }

    pub fn with_file_dir(mut self, dirname: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSetting::Dir {
            dirname: Some(dirname.into()),
        });
        self
    }

    pub fn without_file(mut self) -> Self {
        self.file = Some(FileSetting::Toggle(false));
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = Some(enabled);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = Some(sync);
        self
    }

    /// TOML文字列から読み込む
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// TOMLファイルから読み込む
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 設定ファイルのデフォルトパス
    pub fn default_path() -> PathBuf {
        base_dir().join("config.toml")
    }

    /// 別の設定で上書き（`other` で指定された項目が優先）
    pub fn overlay(mut self, other: &LoggerOptions) -> Self {
        if let Some(level) = other.level {
            self.level = Some(level);
        }
        if let Some(console) = other.console {
            self.console = Some(console);
        }
        if let Some(ref file) = other.file {
            self.file = Some(file.clone());
        }
        if let Some(colors) = other.colors {
            self.colors = Some(colors);
        }
        if let Some(ref name) = other.name {
            self.name = Some(name.clone());
        }
        if let Some(environment) = other.environment {
            self.environment = Some(environment);
        }
        if let Some(sync) = other.sync {
            self.sync = Some(sync);
        }
        self
    }
}

/// ファイル出力の確定値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutput {
    Disabled,
    Enabled(PathBuf),
}

impl FileOutput {
    pub fn dir(&self) -> Option<&Path> {
        match self {
            FileOutput::Disabled => None,
            FileOutput::Enabled(dir) => Some(dir),
        }
    }
}

impl From<&FileSetting> for FileOutput {
    fn from(setting: &FileSetting) -> Self {
        match setting {
            FileSetting::Toggle(false) => FileOutput::Disabled,
            FileSetting::Toggle(true) => FileOutput::Enabled(default_log_dir()),
            FileSetting::Dir { dirname } => FileOutput::Enabled(
                dirname.clone().unwrap_or_else(default_log_dir),
            ),
        }
    }
}

/// 確定したロガー設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub level: Level,
    pub console: bool,
    pub file: FileOutput,
    pub colors: bool,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Info,
            console: true,
            file: FileOutput::Enabled(default_log_dir()),
            colors: true,
            name: DEFAULT_NAME.to_string(),
        }
    }
}

impl Config {
    /// デフォルト値に設定をマージして確定させる
    pub fn resolve(options: &LoggerOptions) -> Self {
        let mut config = Config::default();
        config.merge_options(options);
        config
    }

    /// 設定をマージ
    pub fn merge_options(&mut self, options: &LoggerOptions) {
        if let Some(level) = options.level {
            self.level = level;
        }
        if let Some(console) = options.console {
            self.console = console;
        }
        if let Some(ref file) = options.file {
            self.file = FileOutput::from(file);
        }
        if let Some(colors) = options.colors {
            self.colors = colors;
        }
        if let Some(ref name) = options.name {
            if !name.is_empty() {
                self.name = name.clone();
            }
        }
    }
}

/// 環境変数のレベル指定を解釈
pub fn parse_level_override(value: &str) -> Result<Level, ConfigError> {
    Level::parse(value).ok_or_else(|| ConfigError::InvalidLevel(value.to_string()))
}

/// ユーザーごとのデータディレクトリ
fn base_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".logent")
}

/// デフォルトのログディレクトリ
pub fn default_log_dir() -> PathBuf {
    base_dir().join("logs")
}
