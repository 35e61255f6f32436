//! logent - 実行環境を判別するロギングファサードのCLI

mod cli;
mod logging;

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    cli::run().await
}
