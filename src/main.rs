use rentguard::{
    cli::{self, Cli, CliHandler},
    error::RentGuardError,
    logging,
};
use std::process;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {}", e);
            process::exit(cli::EXIT_USAGE);
        }
    };

    logging::init_tracing(cli.is_verbose(), cli.is_debug());

    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            match e {
                RentGuardError::InvalidArguments(_) | RentGuardError::MissingCredential => {
                    cli::EXIT_USAGE
                }
                RentGuardError::Remote(_) => cli::EXIT_REMOTE,
                _ => cli::EXIT_GENERAL,
            }
        }
    };

    process::exit(exit_code);
}
