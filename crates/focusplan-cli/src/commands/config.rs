use clap::Subcommand;
use focusplan_core::Config;

use super::CommandResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Show { json } => {
            let config = Config::load_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
                println!("# effective plans dir: {}", config.plans_dir()?.display());
            }
            Ok(())
        }
    }
}
