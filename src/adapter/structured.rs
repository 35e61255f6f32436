//! 構造化アダプタ（ネイティブ専用）
//!
//! サーバープロセス向けのフル機能ロガー:
//! - 全レコードに呼び出し元の位置情報を付与
//! - stderrへの人間向け出力と日次ファイルへのJSON Lines出力を同時に行う
//! - error以上のレコードは別ファイルにも書き出す
//! - 同期モードでは呼び出しスレッドで直接書き込み、それ以外は
//!   `tracing_appender` のバックグラウンドワーカー経由で書き込む

use super::Adapter;
use crate::args::ParsedArgs;
use crate::caller::{CallerInfo, CallerTracker};
use crate::config::{parse_level_override, Config, FileOutput, LoggerOptions};
use crate::environment::Signals;
use crate::error::LoggerError;
use crate::level::Level;
use chrono::{DateTime, Local, NaiveDate, Utc};
use colored::Colorize;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};

/// デフォルトレベルを上書きする環境変数
const LEVEL_OVERRIDE_VAR: &str = "LOG_LEVEL";
/// `true` でバックグラウンドワーカーを使わない
const NO_WORKERS_VAR: &str = "LOGENT_NO_WORKERS";
/// `stdio` のとき行ベースのプロトコルを壊さないよう色を付けない
const TRANSPORT_VAR: &str = "MCP_TRANSPORT";
/// デスクトップ埋め込みホストの目印
const DESKTOP_HOST_VAR: &str = "TAURI_ENV_PLATFORM";

/// コンテキストで上書きさせないフィールド
const RESERVED_FIELDS: [&str; 6] = ["level", "time", "pid", "name", "location", "msg"];

/// 構造化アダプタが参照する環境変数の値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeHints {
    pub level_override: Option<String>,
    pub no_workers: bool,
    pub stdio_transport: bool,
    pub desktop_host: bool,
    pub test_harness: bool,
}

impl RuntimeHints {
    /// 現在のプロセスの環境変数から取得
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のルックアップ関数から構築
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level_override: lookup(LEVEL_OVERRIDE_VAR),
            no_workers: lookup(NO_WORKERS_VAR).as_deref() == Some("true"),
            stdio_transport: lookup(TRANSPORT_VAR).as_deref() == Some("stdio"),
            desktop_host: lookup(DESKTOP_HOST_VAR).is_some(),
            test_harness: Signals::from_lookup(&lookup).test_marker.is_some(),
        }
    }

    /// 同期書き込みにすべき環境かどうか
    pub fn prefers_sync(&self) -> bool {
        self.no_workers || self.desktop_host || self.test_harness
    }
}

/// 書き込み方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// 呼び出しスレッドで直接書き込む
    Sync,
    /// バックグラウンドワーカーに渡す
    Background,
}

/// 日付ごとにファイルを切り替えるライター
///
/// 形式: `<dir>/<prefix>-YYYY-MM-DD.log`（UTC日付）
pub struct DailyFile {
    dir: PathBuf,
    prefix: String,
    current: Option<(NaiveDate, File)>,
}

impl DailyFile {
    /// 今日のファイルを開いてDailyFileを作成
    pub fn open(dir: &Path, prefix: &str) -> Result<Self, LoggerError> {
        let mut file = Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            current: None,
        };

        let today = Utc::now().date_naive();
        if let Err(source) = file.roll_to(today) {
            return Err(LoggerError::FileOpen {
                path: file.path_for(today),
                source,
            });
        }

        Ok(file)
    }

    /// 指定日のファイルパス
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}-{}.log", self.prefix, date.format("%Y-%m-%d")))
    }

    /// 指定日のファイルへ書き込む（日付が変わっていれば開き直す）
    fn write_dated(&mut self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        self.roll_to(date)?;
        match self.current {
            Some((_, ref mut file)) => file.write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "ログファイルが開かれていません",
            )),
        }
    }

    /// 日付が変わっていればファイルを開き直す
    fn roll_to(&mut self, date: NaiveDate) -> io::Result<()> {
        if matches!(self.current, Some((current, _)) if current == date) {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(date))?;
        self.current = Some((date, file));
        Ok(())
    }
}

impl Write for DailyFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_dated(Utc::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current {
            Some((_, ref mut file)) => file.flush(),
            None => Ok(()),
        }
    }
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Pretty,
    Json,
}

/// 出力先1つ分
struct Sink {
    minimum: Level,
    format: Format,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock();
        if let Err(err) = writer.write_all(line.as_bytes()) {
            warn!(error = %err, "ログの書き込みに失敗しました");
        }
    }
}

/// 構造化アダプタ
pub struct StructuredAdapter {
    config: Config,
    transport: Transport,
    colorize: bool,
    tracker: CallerTracker,
    sinks: Vec<Sink>,
    // ドロップ時にバックグラウンドワーカーの残りを書き出す
    guards: Mutex<Vec<WorkerGuard>>,
}

impl StructuredAdapter {
    /// 環境変数を参照し、コンソール出力をstderrにして作成
    pub async fn create(options: &LoggerOptions) -> Result<Self, LoggerError> {
        Self::create_with(options, RuntimeHints::capture(), Box::new(io::stderr())).await
    }

    /// 環境変数の値とコンソール出力先を指定して作成
    pub async fn create_with(
        options: &LoggerOptions,
        hints: RuntimeHints,
        console: Box<dyn Write + Send>,
    ) -> Result<Self, LoggerError> {
        let config = resolve_config(options, &hints);

        if let FileOutput::Enabled(ref dir) = config.file {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| LoggerError::DirectoryCreation {
                    path: dir.clone(),
                    source,
                })?;
        }

        let transport = if options.sync.unwrap_or_else(|| hints.prefers_sync()) {
            Transport::Sync
        } else {
            Transport::Background
        };

        let mut adapter = Self {
            colorize: config.colors && !hints.stdio_transport,
            config,
            transport,
            tracker: CallerTracker::default(),
            sinks: Vec::new(),
            guards: Mutex::new(Vec::new()),
        };

        if adapter.config.console {
            adapter.add_sink(adapter.config.level, Format::Pretty, console);
        }

        if let Some(dir) = adapter.config.file.dir().map(Path::to_path_buf) {
            let name = adapter.config.name.clone();
            let main = DailyFile::open(&dir, &name)?;
            let errors = DailyFile::open(&dir, &format!("{}-error", name))?;
            adapter.add_sink(adapter.config.level, Format::Json, Box::new(main));
            adapter.add_sink(Level::Error, Format::Json, Box::new(errors));
        }

        debug!(
            name = %adapter.config.name,
            level = %adapter.config.level,
            transport = ?adapter.transport,
            sinks = adapter.sinks.len(),
            "構造化ロガーを作成しました"
        );

        Ok(adapter)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_colorized(&self) -> bool {
        self.colorize
    }

    fn add_sink(&mut self, minimum: Level, format: Format, writer: Box<dyn Write + Send>) {
        let writer: Box<dyn Write + Send> = match self.transport {
            Transport::Sync => writer,
            Transport::Background => {
                // チャネルが満杯でも破棄せず待つ
                let (non_blocking, guard) = NonBlockingBuilder::default()
                    .lossy(false)
                    .finish(writer);
                self.guards.get_mut().push(guard);
                Box::new(non_blocking)
            }
        };

        self.sinks.push(Sink {
            minimum,
            format,
            writer: Mutex::new(writer),
        });
    }

    /// JSONレコードを構築
    fn build_record(
        &self,
        level: Level,
        parsed: &ParsedArgs,
        caller: &CallerInfo,
        now: DateTime<Utc>,
    ) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("level".to_string(), Value::from(level.as_str()));
        record.insert("time".to_string(), Value::from(now.timestamp_millis()));
        record.insert("pid".to_string(), Value::from(std::process::id()));
        record.insert("name".to_string(), Value::from(self.config.name.as_str()));
        if let Some(location) = caller.location() {
            record.insert("location".to_string(), Value::from(location));
        }
        if let Some(ref context) = parsed.context {
            for (key, value) in context {
                if !RESERVED_FIELDS.contains(&key.as_str()) {
                    record.insert(key.clone(), value.clone());
                }
            }
        }
        record.insert("msg".to_string(), Value::from(parsed.message.as_str()));
        record
    }

    /// 人間向けの1行
    ///
    /// 形式: `YYYY-MM-DD HH:MM:SS.mmm LEVEL name [file:line] message {context}`
    fn pretty_line(
        &self,
        level: Level,
        parsed: &ParsedArgs,
        caller: &CallerInfo,
        now: DateTime<Utc>,
    ) -> String {
        let time = now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S%.3f");
        let label = format!("{:<5}", level.label());
        let label = if self.colorize {
            paint(level, &label)
        } else {
            label
        };
        let origin = caller
            .location()
            .unwrap_or_else(|| self.config.name.clone());

        let mut line = format!("{} {} {} {}", time, label, origin, parsed.message);
        if let Some(ref context) = parsed.context {
            line.push(' ');
            line.push_str(&Value::Object(context.clone()).to_string());
        }
        line.push('\n');
        line
    }
}

impl Adapter for StructuredAdapter {
    fn log(&self, level: Level, args: &[Value]) {
        if !level.is_enabled(self.config.level) {
            return;
        }

        let parsed = ParsedArgs::parse(args);
        let caller = self.tracker.locate(&self.config.name);
        let now = Utc::now();
        let mut json_line: Option<String> = None;

        for sink in &self.sinks {
            if !level.is_enabled(sink.minimum) {
                continue;
            }
            match sink.format {
                Format::Pretty => sink.write_line(&self.pretty_line(level, &parsed, &caller, now)),
                Format::Json => {
                    let line = json_line.get_or_insert_with(|| {
                        let mut line =
                            Value::Object(self.build_record(level, &parsed, &caller, now))
                                .to_string();
                        line.push('\n');
                        line
                    });
                    sink.write_line(line);
                }
            }
        }
    }

    /// 同期モードの出力先を書き出す
    ///
    /// バックグラウンドモードではワーカーに渡した分は対象外で、
    /// アダプタのドロップ時にワーカーが書き出す
    fn flush(&self) {
        if self.transport == Transport::Background {
            return;
        }
        for sink in &self.sinks {
            if let Err(err) = sink.writer.lock().flush() {
                warn!(error = %err, "ログの書き出しに失敗しました");
            }
        }
    }
}

impl fmt::Debug for StructuredAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredAdapter")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("colorize", &self.colorize)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

/// 環境変数のレベル指定をデフォルトに反映してから設定をマージ
fn resolve_config(options: &LoggerOptions, hints: &RuntimeHints) -> Config {
    let mut config = Config::default();
    if let Some(ref value) = hints.level_override {
        match parse_level_override(value) {
            Ok(level) => config.level = level,
            Err(err) => warn!(error = %err, "LOG_LEVELの値を無視します"),
        }
    }
    config.merge_options(options);
    config
}

fn paint(level: Level, label: &str) -> String {
    match level {
        Level::Trace => label.dimmed().to_string(),
        Level::Debug => label.blue().to_string(),
        Level::Info => label.green().to_string(),
        Level::Warn => label.yellow().to_string(),
        Level::Error => label.red().to_string(),
        Level::Fatal => label.white().on_red().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// 書き込み内容を共有するバッファ
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).to_string()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn file_options(dir: &Path) -> LoggerOptions {
        LoggerOptions::new()
            .with_name("svc")
            .with_file_dir(dir)
            .with_colors(false)
            .with_sync(true)
    }

    fn today() -> String {
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn read_json_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_writes_daily_and_error_files() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StructuredAdapter::create_with(
            &file_options(temp_dir.path()).with_console(false),
            RuntimeHints::default(),
            Box::new(SharedBuffer::default()),
        )
        .await
        .unwrap();

        adapter.info(&[json!("hello")]);
        adapter.error(&[json!({"order": 42}), json!("payment failed")]);
        adapter.flush();

        let main_path = temp_dir.path().join(format!("svc-{}.log", today()));
        let error_path = temp_dir.path().join(format!("svc-error-{}.log", today()));

        let records = read_json_lines(&main_path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["level"], "info");
        assert_eq!(records[0]["msg"], "hello");
        assert_eq!(records[0]["name"], "svc");
        assert_eq!(records[0]["pid"], std::process::id());
        assert_eq!(records[1]["order"], 42);

        let errors = read_json_lines(&error_path);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["level"], "error");
        assert_eq!(errors[0]["msg"], "payment failed");
    }

    #[tokio::test]
    async fn test_level_filtering_applies_to_all_sinks() {
        let temp_dir = TempDir::new().unwrap();
        let console = SharedBuffer::default();
        let adapter = StructuredAdapter::create_with(
            &file_options(temp_dir.path()).with_level(Level::Warn),
            RuntimeHints::default(),
            Box::new(console.clone()),
        )
        .await
        .unwrap();

        adapter.info(&[json!("hidden")]);
        adapter.warn(&[json!("shown")]);

        let records = read_json_lines(&temp_dir.path().join(format!("svc-{}.log", today())));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "shown");
        assert!(!console.contents().contains("hidden"));
        assert!(console.contents().contains("shown"));
    }

    #[tokio::test]
    async fn test_console_line_format() {
        let console = SharedBuffer::default();
        let adapter = StructuredAdapter::create_with(
            &LoggerOptions::new()
                .with_name("svc")
                .without_file()
                .with_colors(false)
                .with_sync(true),
            RuntimeHints::default(),
            Box::new(console.clone()),
        )
        .await
        .unwrap();

        adapter.warn(&[json!({"attempt": 3}), json!("retrying")]);

        let output = console.contents();
        assert!(output.contains(" WARN  "));
        assert!(output.contains("retrying"));
        assert!(output.ends_with("{\"attempt\":3}\n"));
        assert!(!output.contains('\u{1b}'));
    }

    #[tokio::test]
    async fn test_file_disabled_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let options = LoggerOptions::new()
            .with_file_dir(&log_dir)
            .without_file()
            .with_sync(true);

        let adapter = StructuredAdapter::create_with(
            &options,
            RuntimeHints::default(),
            Box::new(SharedBuffer::default()),
        )
        .await
        .unwrap();
        adapter.error(&[json!("console only")]);

        assert!(!log_dir.exists());
    }

    #[tokio::test]
    async fn test_directory_creation_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let result = StructuredAdapter::create_with(
            &file_options(&blocker.join("logs")),
            RuntimeHints::default(),
            Box::new(SharedBuffer::default()),
        )
        .await;

        assert!(matches!(result, Err(LoggerError::DirectoryCreation { .. })));
    }

    #[tokio::test]
    async fn test_background_transport_flushes_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StructuredAdapter::create_with(
            &file_options(temp_dir.path()).with_sync(false).with_console(false),
            RuntimeHints::default(),
            Box::new(SharedBuffer::default()),
        )
        .await
        .unwrap();
        assert_eq!(adapter.transport(), Transport::Background);

        adapter.info(&[json!("queued")]);
        drop(adapter);

        let records = read_json_lines(&temp_dir.path().join(format!("svc-{}.log", today())));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "queued");
    }

    #[tokio::test]
    async fn test_transport_selection() {
        let options = LoggerOptions::new().without_file().with_console(false);
        let harness = RuntimeHints {
            test_harness: true,
            ..Default::default()
        };

        let inferred = StructuredAdapter::create_with(&options, harness.clone(), Box::new(io::sink()))
            .await
            .unwrap();
        assert_eq!(inferred.transport(), Transport::Sync);

        let explicit = StructuredAdapter::create_with(
            &options.clone().with_sync(false),
            harness,
            Box::new(io::sink()),
        )
        .await
        .unwrap();
        assert_eq!(explicit.transport(), Transport::Background);

        let default = StructuredAdapter::create_with(&options, RuntimeHints::default(), Box::new(io::sink()))
            .await
            .unwrap();
        assert_eq!(default.transport(), Transport::Background);
    }

    #[tokio::test]
    async fn test_stdio_transport_disables_colors() {
        let options = LoggerOptions::new().without_file().with_colors(true).with_sync(true);
        let hints = RuntimeHints {
            stdio_transport: true,
            ..Default::default()
        };

        let adapter = StructuredAdapter::create_with(&options, hints, Box::new(io::sink()))
            .await
            .unwrap();
        assert!(!adapter.is_colorized());
    }

    #[tokio::test]
    async fn test_level_override_from_environment() {
        let options = LoggerOptions::new().without_file().with_sync(true);
        let hints = RuntimeHints {
            level_override: Some("debug".to_string()),
            ..Default::default()
        };
        let adapter = StructuredAdapter::create_with(&options, hints.clone(), Box::new(io::sink()))
            .await
            .unwrap();
        assert_eq!(adapter.config().level, Level::Debug);

        // 明示的な設定が優先
        let adapter = StructuredAdapter::create_with(
            &options.clone().with_level(Level::Error),
            hints,
            Box::new(io::sink()),
        )
        .await
        .unwrap();
        assert_eq!(adapter.config().level, Level::Error);

        // 不正な値は無視
        let invalid = RuntimeHints {
            level_override: Some("loud".to_string()),
            ..Default::default()
        };
        let adapter = StructuredAdapter::create_with(&options, invalid, Box::new(io::sink()))
            .await
            .unwrap();
        assert_eq!(adapter.config().level, Level::Info);
    }

    #[tokio::test]
    async fn test_build_record_location_and_reserved_fields() {
        let adapter = StructuredAdapter::create_with(
            &LoggerOptions::new().with_name("svc").without_file().with_sync(true),
            RuntimeHints::default(),
            Box::new(io::sink()),
        )
        .await
        .unwrap();

        let parsed = ParsedArgs::parse(&[json!({"msg": "spoofed", "user": "u1"}), json!("real")]);
        let caller = CallerInfo {
            component: "svc".to_string(),
            file: "main.rs".to_string(),
            line: 3,
        };
        let record = adapter.build_record(Level::Info, &parsed, &caller, Utc::now());

        assert_eq!(record["location"], "svc [main.rs:3]");
        assert_eq!(record["msg"], "real");
        assert_eq!(record["user"], "u1");

        let unknown = adapter.build_record(Level::Info, &parsed, &CallerInfo::unknown("svc"), Utc::now());
        assert!(!unknown.contains_key("location"));
    }

    #[test]
    fn test_runtime_hints_from_lookup() {
        let hints = RuntimeHints::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "warn"),
            ("LOGENT_NO_WORKERS", "true"),
            ("MCP_TRANSPORT", "stdio"),
        ]));
        assert_eq!(hints.level_override.as_deref(), Some("warn"));
        assert!(hints.no_workers);
        assert!(hints.stdio_transport);
        assert!(!hints.desktop_host);
        assert!(!hints.test_harness);
        assert!(hints.prefers_sync());

        let hints = RuntimeHints::from_lookup(lookup_from(&[("NEXTEST", "1")]));
        assert!(hints.test_harness);

        let hints = RuntimeHints::from_lookup(lookup_from(&[("TAURI_ENV_PLATFORM", "darwin")]));
        assert!(hints.desktop_host);

        assert!(!RuntimeHints::from_lookup(lookup_from(&[])).prefers_sync());
    }

    #[test]
    fn test_daily_file_rolls_over_to_next_day() {
        let temp_dir = TempDir::new().unwrap();
        let today = Utc::now().date_naive();
        let tomorrow = today.succ_opt().unwrap();
        let mut file = DailyFile::open(temp_dir.path(), "svc").unwrap();

        file.write_dated(today, b"first\n").unwrap();
        file.write_dated(tomorrow, b"second\n").unwrap();
        file.flush().unwrap();

        let first = fs::read_to_string(file.path_for(today)).unwrap();
        let second = fs::read_to_string(file.path_for(tomorrow)).unwrap();
        assert_eq!(first, "first\n");
        assert_eq!(second, "second\n");
    }

    /// flush回数を数えるライター
    #[derive(Clone, Default)]
    struct FlushCounter(Arc<Mutex<usize>>);

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            *self.0.lock() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_flush_reaches_sync_writers() {
        let counter = FlushCounter::default();
        let adapter = StructuredAdapter::create_with(
            &LoggerOptions::new().without_file().with_sync(true),
            RuntimeHints::default(),
            Box::new(counter.clone()),
        )
        .await
        .unwrap();

        adapter.info(&[json!("x")]);
        adapter.flush();

        assert_eq!(*counter.0.lock(), 1);
    }

    #[test]
    fn test_daily_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = DailyFile::open(temp_dir.path(), "svc-error").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(
            file.path_for(date),
            temp_dir.path().join("svc-error-2024-12-30.log")
        );
        assert!(temp_dir.path().join(format!("svc-error-{}.log", today())).exists());
    }
}
