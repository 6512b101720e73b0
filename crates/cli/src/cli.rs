// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::telemetry::setup_tracing;
use crate::{donate, print_config, start};
use anyhow::{bail, Result};
use clap::{command, ArgAction, Parser, Subcommand};
use qf_config::{load_config, AppConfig};
use qf_indexer::ProjectReference;
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "qf-frame")]
#[command(about = "Serve quadratic funding donation frames that settle cross-chain", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `qf-frame -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        let config = match self.load_config() {
            Ok(cfg) => cfg,
            Err(e)
                if matches!(
                    e.downcast_ref::<std::io::Error>(),
                    Some(ioe) if ioe.kind() == std::io::ErrorKind::NotFound
                ) =>
            {
                bail!(
                    "{e}. Create a qf-frame.config.yaml or pass one with `qf-frame --config <path>`."
                );
            }
            Err(e) => return Err(e),
        };

        setup_tracing(self.log_level());
        info!("Config loaded from: {:?}", config.config_file());

        match self.command {
            Commands::Start => start::execute(config).await?,
            Commands::Donate { project, amount } => {
                donate::execute(&config, &project, &amount).await?
            }
            Commands::PrintConfig => print_config::execute(&config)?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        load_config(self.config.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the donation frames over HTTP
    Start,

    /// Prepare a single donation transaction and print it
    Donate {
        /// Project reference as <network>/<round>/<project>
        project: ProjectReference,

        /// Amount to donate in ether, eg. 0.01
        #[arg(long)]
        amount: String,
    },

    /// Print the resolved configuration
    PrintConfig,
}
