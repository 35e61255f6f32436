//! ログ引数モジュール
//!
//! 可変長引数を `Vec<Value>` として受け取り、メッセージとコンテキストに分解する。

use serde_json::{Map, Value};

/// ログ呼び出しの引数列
pub type LogArgs = Vec<Value>;

/// ログ引数に変換できる型
///
/// `"msg"`、`(json!({..}), "msg")`、`("msg", 1, true)` などを受け付ける
pub trait IntoLogArgs {
    fn into_log_args(self) -> LogArgs;
}

impl IntoLogArgs for () {
    fn into_log_args(self) -> LogArgs {
        Vec::new()
    }
}

impl IntoLogArgs for &str {
    fn into_log_args(self) -> LogArgs {
        vec![Value::from(self)]
    }
}

impl IntoLogArgs for String {
    fn into_log_args(self) -> LogArgs {
        vec![Value::from(self)]
    }
}

impl IntoLogArgs for &String {
    fn into_log_args(self) -> LogArgs {
        vec![Value::from(self.as_str())]
    }
}

impl IntoLogArgs for Value {
    fn into_log_args(self) -> LogArgs {
        vec![self]
    }
}

impl IntoLogArgs for Map<String, Value> {
    fn into_log_args(self) -> LogArgs {
        vec![Value::Object(self)]
    }
}

impl IntoLogArgs for Vec<Value> {
    fn into_log_args(self) -> LogArgs {
        self
    }
}

impl<A, B> IntoLogArgs for (A, B)
where
    A: Into<Value>,
    B: Into<Value>,
{
    fn into_log_args(self) -> LogArgs {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A, B, C> IntoLogArgs for (A, B, C)
where
    A: Into<Value>,
    B: Into<Value>,
    C: Into<Value>,
{
    fn into_log_args(self) -> LogArgs {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<A, B, C, D> IntoLogArgs for (A, B, C, D)
where
    A: Into<Value>,
    B: Into<Value>,
    C: Into<Value>,
    D: Into<Value>,
{
    fn into_log_args(self) -> LogArgs {
        vec![self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// 分解済みの引数
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    pub message: String,
    pub context: Option<Map<String, Value>>,
}

impl ParsedArgs {
    /// 引数をメッセージとコンテキストに分解
    ///
    /// - 文字列1つ: メッセージのみ
    /// - 文字列以外1つ: JSON文字列をメッセージに、オブジェクトならコンテキストにも使う
    /// - 2つ以上で先頭がオブジェクト: 先頭をコンテキスト、残りを空白区切りで連結
    /// - 2つ以上でそれ以外: すべてを空白区切りで連結
    /// - 0個: 空メッセージ
    pub fn parse(args: &[Value]) -> Self {
        match args {
            [] => Self {
                message: String::new(),
                context: None,
            },
            [Value::String(message)] => Self {
                message: message.clone(),
                context: None,
            },
            [single] => Self {
                message: single.to_string(),
                context: single.as_object().cloned(),
            },
            [Value::Object(context), rest @ ..] => Self {
                message: join(rest),
                context: Some(context.clone()),
            },
            all => Self {
                message: join(all),
                context: None,
            },
        }
    }
}

/// 引数1つ分の表示文字列（文字列はそのまま、それ以外はJSON）
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 引数を空白区切りで連結
pub fn join(args: &[Value]) -> String {
    args.iter().map(display).collect::<Vec<_>>().join(" ")
}
