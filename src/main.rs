use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use famfolio::core::growth::CompoundingFrequency;
use famfolio::core::log::init_logging;
use famfolio::core::model::FundDraft;
use std::str::FromStr;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for famfolio::AppCommand {
    fn from(cmd: Commands) -> famfolio::AppCommand {
        match cmd {
            Commands::Register { name, pin } => famfolio::AppCommand::Register { name, pin },
            Commands::Login { name, pin } => famfolio::AppCommand::Login { name, pin },
            Commands::Logout => famfolio::AppCommand::Logout,
            Commands::Whoami => famfolio::AppCommand::Whoami,
            Commands::Member(MemberCommands::Add { name }) => {
                famfolio::AppCommand::MemberAdd { name }
            }
            Commands::Member(MemberCommands::Remove { member_id }) => {
                famfolio::AppCommand::MemberRemove { member_id }
            }
            Commands::Member(MemberCommands::List) => famfolio::AppCommand::MemberList,
            Commands::Fund(FundCommands::Add {
                member_id,
                name,
                units,
                value,
                date,
                purchase_nav,
            }) => famfolio::AppCommand::FundAdd {
                member_id,
                draft: FundDraft {
                    name,
                    units,
                    value,
                    purchase_date: date,
                    purchase_nav,
                },
            },
            Commands::Fund(FundCommands::Remove { member_id, fund_id }) => {
                famfolio::AppCommand::FundRemove { member_id, fund_id }
            }
            Commands::Summary => famfolio::AppCommand::Summary,
            Commands::Search { query } => famfolio::AppCommand::Search { query },
            Commands::Nav { scheme_code } => famfolio::AppCommand::Nav { scheme_code },
            Commands::Simulate {
                rate,
                years,
                frequency,
                value,
            } => famfolio::AppCommand::Simulate {
                rate,
                years,
                frequency,
                value,
            },
            Commands::ClearData { .. } => famfolio::AppCommand::ClearData,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Create an account (name + 4-digit PIN) and log in
    Register {
        name: String,
        #[arg(long)]
        pin: String,
    },
    /// Log in with name and PIN
    Login {
        name: String,
        #[arg(long)]
        pin: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Manage family members
    #[command(subcommand)]
    Member(MemberCommands),
    /// Manage a member's fund holdings
    #[command(subcommand)]
    Fund(FundCommands),
    /// Display the full portfolio summary
    Summary,
    /// Search mutual funds by name
    Search { query: String },
    /// Show the latest NAV and day change for a scheme
    Nav { scheme_code: String },
    /// Project compound growth of the portfolio
    Simulate {
        /// Expected annual return in percent
        #[arg(long)]
        rate: f64,
        /// Number of years to project
        #[arg(long)]
        years: u32,
        /// Compounding frequency: yearly or monthly
        #[arg(long, default_value = "yearly", value_parser = CompoundingFrequency::from_str)]
        frequency: CompoundingFrequency,
        /// Starting value; defaults to the portfolio's current value
        #[arg(long)]
        value: Option<f64>,
    },
    /// Delete all stored data for the logged-in user
    ClearData {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Add a family member
    Add { name: String },
    /// Remove a member and all their funds
    Remove { member_id: String },
    /// List members with their totals
    List,
}

#[derive(Subcommand)]
enum FundCommands {
    /// Add a fund holding to a member
    Add {
        member_id: String,
        /// Scheme name
        #[arg(long)]
        name: String,
        /// Units held
        #[arg(long)]
        units: f64,
        /// Current value of the holding
        #[arg(long)]
        value: f64,
        /// Purchase date (YYYY-MM-DD)
        #[arg(long, value_parser = NaiveDate::from_str)]
        date: NaiveDate,
        /// NAV at purchase time
        #[arg(long)]
        purchase_nav: Option<f64>,
    },
    /// Remove a fund holding
    Remove { member_id: String, fund_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => famfolio::cli::setup::run(),
        Some(Commands::ClearData { yes: false }) => {
            Err(anyhow::anyhow!("Refusing to clear data without --yes"))
        }
        Some(cmd) => famfolio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
