use std::process;

use clap::Parser;
use shopctl::Shopctl;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let app = Shopctl::parse();
    let status = app.run_from_args().await;
    process::exit(status)
}
