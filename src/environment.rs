//! 実行環境判定モジュール
//!
//! 環境変数とホストのグローバル情報から実行環境を1つに分類する。
//! 判定順序（最初に一致したものを採用）:
//! 1. テストランナーのマーカー → `Test`
//! 2. エッジランタイムのグローバル（caches / Request / Response）→ `Edge`
//! 3. サーバープロセスのランタイム情報 → `Server`
//! 4. それ以外 → `Browser`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 存在するだけでテスト環境とみなす環境変数
const TEST_MARKER_VARS: [&str; 2] = ["NEXTEST", "RUST_TEST_THREADS"];

/// `test` のときテスト環境とみなすアプリ環境変数
const APP_ENV_VAR: &str = "APP_ENV";

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// ネイティブのサーバープロセス
    Server,
    /// 分離されたエッジランタイム（Workers等）
    Edge,
    /// ブラウザ
    Browser,
    /// テストランナー
    Test,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Server,
        Environment::Edge,
        Environment::Browser,
        Environment::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Server => "server",
            Environment::Edge => "edge",
            Environment::Browser => "browser",
            Environment::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("未知の実行環境: {}", s))
    }
}

/// 判定に使う周辺情報のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    /// 検出したテストマーカー（例: `NEXTEST`）
    pub test_marker: Option<String>,
    /// エッジランタイム固有のグローバルがすべて存在するか
    pub edge_globals: bool,
    /// サーバープロセスのランタイム記述子
    pub process_runtime: Option<String>,
}

impl Signals {
    /// 現在のプロセスから周辺情報を取得
    pub fn capture() -> Self {
        let mut signals = Signals::from_lookup(|key| std::env::var(key).ok());
        signals.edge_globals = host::has_edge_globals();
        signals.process_runtime = host::process_runtime();
        signals
    }

    /// 環境変数部分だけを任意のルックアップ関数から構築
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let test_marker = TEST_MARKER_VARS
            .iter()
            .find(|key| lookup(key).is_some())
            .map(|key| key.to_string())
            .or_else(|| {
                lookup(APP_ENV_VAR)
                    .filter(|value| value == "test")
                    .map(|_| format!("{}=test", APP_ENV_VAR))
            });

        Self {
            test_marker,
            edge_globals: false,
            process_runtime: None,
        }
    }

    /// 優先順位に従って実行環境を決定
    pub fn classify(&self) -> Environment {
        // テストランナーはサーバープロセス上で動くため先に判定する
        if self.test_marker.is_some() {
            return Environment::Test;
        }

        // ファイルシステムやprocessは互換レイヤーで偽装されうるので見ない
        if self.edge_globals {
            return Environment::Edge;
        }

        if self.process_runtime.is_some() {
            return Environment::Server;
        }

        Environment::Browser
    }
}

/// 現在の実行環境を判定
pub fn detect() -> Environment {
    Signals::capture().classify()
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    pub fn has_edge_globals() -> bool {
        false
    }

    pub fn process_runtime() -> Option<String> {
        Some(format!(
            "{}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ))
    }
}

#[cfg(target_arch = "wasm32")]
mod host {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    const EDGE_GLOBALS: [&str; 3] = ["caches", "Request", "Response"];

    fn global() -> JsValue {
        JsValue::from(js_sys::global())
    }

    fn property(target: &JsValue, name: &str) -> Option<JsValue> {
        if target.is_undefined() || target.is_null() {
            return None;
        }
        Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }

    pub fn has_edge_globals() -> bool {
        let global = global();
        EDGE_GLOBALS.iter().all(|name| {
            Reflect::has(&global, &JsValue::from_str(name)).unwrap_or(false)
        })
    }

    pub fn process_runtime() -> Option<String> {
        let process = property(&global(), "process")?;
        let versions = property(&process, "versions")?;
        property(&versions, "node")?
            .as_string()
            .map(|version| format!("node-{}", version))
    }
}
