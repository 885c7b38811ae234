use anyhow::Result;
use iosplint::cli::{self, Commands};
use iosplint::commands::{self, CheckConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Check {
            models,
            format,
            output,
            config,
            min_metric,
            no_parallel,
            jobs,
            include_generated,
            plain,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            let check_config = CheckConfig {
                models,
                format,
                output,
                config,
                min_metric,
                no_parallel,
                jobs,
                include_generated,
                plain,
            };
            // Violations are warnings; the exit status stays zero
            commands::check_models(check_config)?;
            Ok(())
        }
        Commands::Init { force } => {
            cli::init_logging(0);
            commands::init_config(force)
        }
        Commands::Explain { config } => {
            cli::init_logging(0);
            commands::explain_rule(config.as_deref())
        }
    }
}
