//! 呼び出し元追跡モジュール
//!
//! バックトレースの文字列表現をたどり、ロガー内部ではない最初のフレームから
//! ファイル名と行番号を取り出す。失敗しても例外にはせず `unknown:0` を返す。

use std::backtrace::Backtrace;

/// トレース取得処理自身のフレーム
///
/// 先頭に連続するこれらのフレームを読み飛ばす。標準ライブラリが取得処理の
/// フレームを落とすかどうかはツールチェーンによって異なるため、数ではなく
/// シンボルで判定する。
const CAPTURE_FRAGMENTS: &[&str] = &[
    "backtrace_rs::",
    "std::backtrace::Backtrace::",
    "logent::caller::CallerTracker::locate",
    "logent::caller::locate",
];

/// 取得失敗時のファイル名
pub const UNKNOWN_FILE: &str = "unknown";

/// 内部フレームとみなすパス・シンボルの断片
pub const DEFAULT_INTERNAL_FRAGMENTS: &[&str] = &[
    "logent::",
    "/logent/src/",
    "backtrace",
    "std::",
    "core::",
    "alloc::",
    "tokio::",
    "futures",
    "/rustc/",
];

/// 呼び出し元情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    pub component: String,
    pub file: String,
    pub line: u32,
}

impl CallerInfo {
    pub fn unknown(component: &str) -> Self {
        Self {
            component: component.to_string(),
            file: UNKNOWN_FILE.to_string(),
            line: 0,
        }
    }

    pub fn is_known(&self) -> bool {
        self.file != UNKNOWN_FILE
    }

    /// `name [file:line]` 形式の位置情報（ファイル不明ならNone）
    pub fn location(&self) -> Option<String> {
        if self.component.is_empty() || !self.is_known() {
            return None;
        }
        Some(format!("{} [{}:{}]", self.component, self.file, self.line))
    }
}

/// バックトレースの1フレーム
#[derive(Debug, PartialEq, Eq)]
struct Frame<'a> {
    symbol: &'a str,
    location: Option<&'a str>,
}

impl Frame<'_> {
    fn mentions(&self, fragment: &str) -> bool {
        self.symbol.contains(fragment)
            || self.location.is_some_and(|loc| loc.contains(fragment))
    }
}

/// 呼び出し元追跡
#[derive(Debug, Clone)]
pub struct CallerTracker {
    internal_fragments: Vec<String>,
}

impl Default for CallerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERNAL_FRAGMENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl CallerTracker {
    /// 内部フレームの断片を指定して作成
    pub fn new(internal_fragments: Vec<String>) -> Self {
        Self { internal_fragments }
    }

    /// 内部フレームの断片を追加
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.internal_fragments.push(fragment.into());
        self
    }

    /// 現在のバックトレースから呼び出し元を取得
    pub fn locate(&self, component: &str) -> CallerInfo {
        let trace = Backtrace::force_capture().to_string();
        self.locate_in(&trace, component)
    }

    /// バックトレース文字列から呼び出し元を取得
    pub fn locate_in(&self, trace: &str, component: &str) -> CallerInfo {
        split_frames(trace)
            .into_iter()
            .skip_while(|frame| is_capture_frame(frame))
            .filter(|frame| !self.is_internal(frame))
            .find_map(|frame| frame.location.and_then(parse_location))
            .map(|(file, line)| CallerInfo {
                component: component.to_string(),
                file,
                line,
            })
            .unwrap_or_else(|| CallerInfo::unknown(component))
    }

    fn is_internal(&self, frame: &Frame<'_>) -> bool {
        self.internal_fragments
            .iter()
            .any(|fragment| frame.mentions(fragment))
    }
}

fn is_capture_frame(frame: &Frame<'_>) -> bool {
    CAPTURE_FRAGMENTS
        .iter()
        .any(|fragment| frame.symbol.contains(fragment))
}

/// デフォルト設定で呼び出し元を取得
pub fn locate(component: &str) -> CallerInfo {
    CallerTracker::default().locate(component)
}

/// トレース文字列をフレームに分割
///
/// `N: symbol` 行の後に続く `at path:line:col` 行をそのフレームの位置とみなす。
/// 番号行を持たない `at ...` 行は単独のフレームとして扱う。
fn split_frames(trace: &str) -> Vec<Frame<'_>> {
    let mut frames: Vec<Frame<'_>> = Vec::new();

    for line in trace.lines() {
        let trimmed = line.trim();

        if let Some(location) = trimmed.strip_prefix("at ") {
            match frames.last_mut() {
                Some(frame) if frame.location.is_none() => frame.location = Some(location),
                _ => frames.push(Frame {
                    symbol: "",
                    location: Some(location),
                }),
            }
            continue;
        }

        if let Some((index, symbol)) = trimmed.split_once(": ") {
            if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                frames.push(Frame {
                    symbol: symbol.trim(),
                    location: None,
                });
            }
        }
    }

    frames
}

/// `path:line:col` または `name (path:line:col)` からファイル名と行番号を取り出す
fn parse_location(location: &str) -> Option<(String, u32)> {
    let location = location.trim();
    let location = match (location.rfind('('), location.strip_suffix(')')) {
        (Some(open), Some(inner)) => &inner[open + 1..],
        _ => location,
    };

    let mut parts = location.rsplitn(3, ':');
    let _column: u32 = parts.next()?.parse().ok()?;
    let line: u32 = parts.next()?.parse().ok()?;
    let path = parts.next()?;

    let file = path.rsplit(['/', '\\']).next().filter(|f| !f.is_empty())?;
    Some((file.to_string(), line))
}
