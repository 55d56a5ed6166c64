use clap::Parser;

use handline::cli::{Cli, Commands};
use handline::config::{get_config, init_config_with_path};
use handline::errors::HandlineError;
use handline::runtime::modes;
use handline::system::init_logging;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::HashPassword { password }) => modes::cli::run_hash_password(password),
        Some(Commands::Config { action }) => modes::cli::run_config(action),
        Some(Commands::Serve) | None => serve(cli.config.clone()),
    };

    if let Err(e) = result {
        match e.downcast_ref::<HandlineError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn serve(config_path: Option<String>) -> anyhow::Result<()> {
    init_config_with_path(config_path);
    let config = get_config();

    // guard 必须存活到进程退出
    let _log_guard = init_logging(&config.logging)?;

    actix_web::rt::System::new().block_on(modes::run_server())
}
