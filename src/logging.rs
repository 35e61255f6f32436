//! ログインフラモジュール
//!
//! ロガー自身の診断メッセージ用。利用者のログとは別系統。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// デフォルトのフィルタ（利用者のログ出力と混ざらないよう警告以上のみ）
const DEFAULT_FILTER: &str = "warn";

/// ログシステムを初期化
///
/// RUST_LOG環境変数でログレベルを設定可能:
/// - warn: 警告以上（デフォルト）
/// - debug: バックエンド解決の詳細を含む
pub fn init() {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
