mod auth;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod ledger;
mod models;
mod reports;
mod settings;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ReportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, user } => cli::init::run(data_dir, user),
        Commands::Add {
            date,
            amount,
            remark,
        } => cli::add::run(&date, amount, &remark),
        Commands::List => cli::list::run(),
        Commands::Edit {
            id,
            date,
            amount,
            remark,
        } => cli::edit::run(id, date.as_deref(), amount, remark.as_deref()),
        Commands::Delete { ids } => cli::delete::run(&ids),
        Commands::Import { file, yes } => cli::import::run(&file, yes),
        Commands::Report { command } => match command {
            ReportCommands::Range { from, to } => cli::report::range(&from, &to),
            ReportCommands::Summary => cli::report::summary(),
            ReportCommands::Monthly => cli::report::monthly(),
        },
        Commands::Export { from, to, output } => cli::export::run(&from, &to, output),
        Commands::Check { fix } => cli::check::run(fix),
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "lodger", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
