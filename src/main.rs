use anyhow::Result;
use clap::{Parser, Subcommand};

use farmbook::auth::PasswordAuthenticator;
use farmbook::cli::{
    handle_expense_command, handle_income_command, handle_journal_command,
    handle_register_command, handle_report_command, login, ExpenseCommands, IncomeCommands,
    JournalCommands, ReportCommands,
};
use farmbook::config::{logging::init_logging, paths::FarmbookPaths, settings::Settings};
use farmbook::display::{format_category_tree, format_config};
use farmbook::storage::CsvRecordStore;

#[derive(Parser)]
#[command(
    name = "farmbook",
    version,
    about = "Double-entry bookkeeping for small farms",
    long_about = "Farmbook records farm income and expenses, posts the matching \
                  double-entry journal lines, and produces summaries, ledgers, \
                  income statements and balance sheets from the command line."
)]
struct Cli {
    /// User to act as
    #[arg(short, long, global = true, env = "FARMBOOK_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    Register,

    /// Income commands
    #[command(subcommand, alias = "pemasukan")]
    Income(IncomeCommands),

    /// Expense commands
    #[command(subcommand, alias = "pengeluaran")]
    Expense(ExpenseCommands),

    /// Journal commands
    #[command(subcommand, alias = "jurnal")]
    Journal(JournalCommands),

    /// Financial reports
    #[command(subcommand, alias = "laporan")]
    Report(ReportCommands),

    /// Show income sources and expense categories
    Categories,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FarmbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = CsvRecordStore::new(paths.clone())?;
    let authenticator = PasswordAuthenticator::from_paths(&paths);
    let username = cli.user.as_deref();

    match cli.command {
        Some(Commands::Register) => {
            handle_register_command(&authenticator, username)?;
        }
        Some(Commands::Income(cmd)) => {
            let user = login(&authenticator, username)?;
            handle_income_command(&store, &settings, &user, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let user = login(&authenticator, username)?;
            handle_expense_command(&store, &settings, &user, cmd)?;
        }
        Some(Commands::Journal(cmd)) => {
            let user = login(&authenticator, username)?;
            handle_journal_command(&store, &user, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let user = login(&authenticator, username)?;
            handle_report_command(&store, &settings, &user, cmd)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_tree(&settings));
        }
        Some(Commands::Config) => {
            print!("{}", format_config(&paths, &settings));
        }
        None => {
            println!("Farmbook - double-entry bookkeeping for small farms");
            println!();
            println!("Run 'farmbook --help' for usage information.");
            println!("Run 'farmbook --user <name> register' to create an account.");
        }
    }

    Ok(())
}
