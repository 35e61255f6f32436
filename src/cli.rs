//! CLIモジュール

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use logent::{Config, Environment, FileOutput, Level, LoggerOptions, Signals};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// logent - 実行環境を判別するロギングファサード
#[derive(Parser, Debug)]
#[command(name = "logent")]
#[command(about = "実行環境を判別してログのバックエンドを切り替える", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 実行環境を判定して表示
    Detect,
    /// ログを1件出力
    Emit(EmitArgs),
    /// 確定した設定を表示
    Config {
        /// 設定ファイルのパス
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// emitサブコマンドの引数
#[derive(Args, Debug)]
pub struct EmitArgs {
    /// 出力するレコードのレベル
    #[arg(short, long, default_value = "info")]
    pub level: Level,

    /// 最小ログレベル
    #[arg(short, long)]
    pub min_level: Option<Level>,

    /// ロガー名
    #[arg(short, long)]
    pub name: Option<String>,

    /// 実行環境（server / edge / browser / test）
    #[arg(short, long)]
    pub env: Option<Environment>,

    /// ログファイルの出力ディレクトリ
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// ファイル出力を無効化
    #[arg(long, conflicts_with = "dir")]
    pub no_file: bool,

    /// コンソール出力を無効化
    #[arg(long)]
    pub no_console: bool,

    /// 色付けを無効化
    #[arg(long)]
    pub no_color: bool,

    /// 同期書き込み
    #[arg(long)]
    pub sync: bool,

    /// 設定ファイルのパス
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// コンテキスト（JSONオブジェクト）
    #[arg(long)]
    pub context: Option<String>,

    /// メッセージ
    #[arg(required = true)]
    pub message: Vec<String>,
}

impl EmitArgs {
    /// コマンドライン引数で指定された項目だけを設定に変換
    fn cli_options(&self) -> LoggerOptions {
        let mut options = LoggerOptions::new();
        options.level = self.min_level;
        options.name = self.name.clone();
        options.environment = self.env;

        if self.no_file {
            options = options.without_file();
        } else if let Some(ref dir) = self.dir {
            options = options.with_file_dir(dir);
        }
        if self.no_console {
            options.console = Some(false);
        }
        if self.no_color {
            options.colors = Some(false);
        }
        if self.sync {
            options.sync = Some(true);
        }
        options
    }

    /// コンテキストとメッセージをログ引数に変換
    fn log_args(&self) -> Result<Vec<Value>> {
        let mut args = Vec::new();
        if let Some(context) = parse_context(self.context.as_deref())? {
            args.push(Value::Object(context));
        }
        args.push(Value::from(self.message.join(" ")));
        Ok(args)
    }
}

/// CLIエントリポイント
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli.command).await
}

async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Detect => {
            let signals = Signals::capture();
            println!("environment:     {}", signals.classify());
            println!(
                "test_marker:     {}",
                signals.test_marker.as_deref().unwrap_or("-")
            );
            println!("edge_globals:    {}", signals.edge_globals);
            println!(
                "process_runtime: {}",
                signals.process_runtime.as_deref().unwrap_or("-")
            );
        }
        Commands::Emit(args) => {
            emit(&args).await?;
        }
        Commands::Config { config } => {
            let options = load_options(config.as_deref())?;
            print_config(&options);
        }
    }

    Ok(())
}

/// ロガーを作成して1件出力
async fn emit(args: &EmitArgs) -> Result<()> {
    let options = load_options(args.config.as_deref())?.overlay(&args.cli_options());
    let log_args = args.log_args()?;
    debug!(?options, "ログを出力します");

    let logger = logent::create_logger(options);
    logger
        .log_at(args.level, log_args)
        .await
        .context("ログを出力できませんでした")?;
    logger.flush();
    Ok(())
}

/// 設定ファイルを読み込む
///
/// パス未指定でデフォルトの設定ファイルもなければ空の設定
fn load_options(path: Option<&Path>) -> Result<LoggerOptions> {
    match path {
        Some(path) => LoggerOptions::load(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display())),
        None => {
            let default_path = LoggerOptions::default_path();
            if default_path.exists() {
                LoggerOptions::load(&default_path).with_context(|| {
                    format!("設定ファイルを読み込めません: {}", default_path.display())
                })
            } else {
                Ok(LoggerOptions::default())
            }
        }
    }
}

fn parse_context(raw: Option<&str>) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(raw).context("コンテキストのJSONを解析できません")? {
        Value::Object(map) => Ok(Some(map)),
        _ => bail!("--context にはJSONオブジェクトを指定してください"),
    }
}

fn print_config(options: &LoggerOptions) {
    let config = Config::resolve(options);
    println!("name:        {}", config.name);
    println!("level:       {}", config.level);
    println!("console:     {}", config.console);
    println!("colors:      {}", config.colors);
    match config.file {
        FileOutput::Enabled(ref dir) => println!("file:        {}", dir.display()),
        FileOutput::Disabled => println!("file:        disabled"),
    }
    match options.environment {
        Some(environment) => println!("environment: {}", environment),
        None => println!("environment: auto ({})", logent::detect()),
    }
}
