use clap::Parser;

use outreachdesk::cli::{Cli, Commands};
use outreachdesk::config::{get_config, init_config};
use outreachdesk::runtime::modes::{run_cli, run_server};
use outreachdesk::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    match cli.command {
        None | Some(Commands::Serve) => {
            // guard 必须活到进程结束
            let _guard = init_logging(&config.logging);
            run_server(&config).await
        }
        Some(cmd) => {
            if let Err(e) = run_cli(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
