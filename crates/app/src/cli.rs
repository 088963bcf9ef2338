//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use lockwallet_domain::Amount;

/// Lock money into spending categories and pay from the locks
#[derive(Parser, Debug)]
#[command(name = "lockwallet")]
#[command(about = "Lock money into spending categories and pay from the locks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./lockwallet.toml if present)
    #[arg(long, global = true, env = "LOCKWALLET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    SignIn {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(long, env = "LOCKWALLET_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    SignOut,

    /// Restore the stored session and show who is signed in
    Whoami,

    /// Show the wallet balance
    Balance,

    /// Manage budget locks
    #[command(subcommand)]
    Locks(LocksCommand),

    /// List outlets and vendors
    Outlets {
        /// Only outlets in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Buy airtime
    Airtime {
        /// Recipient phone number
        #[arg(long)]
        phone: String,

        /// Mobile network, e.g. mtn
        #[arg(long)]
        network: String,

        /// Amount in major units, e.g. 500 or 500.50
        #[arg(long)]
        amount: Amount,

        /// Pay from this lock instead of the free balance
        #[arg(long)]
        lock: Option<String>,
    },

    /// Buy a data bundle
    Data {
        /// Recipient phone number
        #[arg(long)]
        phone: String,

        /// Mobile network, e.g. mtn
        #[arg(long)]
        network: String,

        /// Plan id from `data-plans`
        #[arg(long)]
        plan: String,

        /// Pay from this lock instead of the free balance
        #[arg(long)]
        lock: Option<String>,
    },

    /// List the data bundles a network sells
    DataPlans {
        /// Mobile network, e.g. mtn
        network: String,
    },

    /// Show transaction history
    Transactions,
}

/// `locks` subcommands.
#[derive(Subcommand, Debug)]
pub enum LocksCommand {
    /// List locks
    List,

    /// Lock funds for a category
    Create {
        /// Spending category, e.g. food
        #[arg(long)]
        category: String,

        /// Amount in major units
        #[arg(long)]
        amount: Amount,

        /// Optional label
        #[arg(long)]
        title: Option<String>,

        /// Expiry as RFC 3339, e.g. 2026-12-31T23:59:59Z
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,
    },

    /// Spend from a lock at an outlet
    Spend {
        /// Lock id
        lock_id: String,

        /// Outlet id
        #[arg(long)]
        outlet: String,

        /// Amount in major units
        #[arg(long)]
        amount: Amount,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_amounts_in_major_units() {
        let cli = Cli::try_parse_from([
            "lockwallet",
            "locks",
            "create",
            "--category",
            "food",
            "--amount",
            "2500.50",
        ])
        .unwrap();

        let Command::Locks(LocksCommand::Create { amount, category, .. }) = cli.command else {
            panic!("expected locks create");
        };
        assert_eq!(category, "food");
        assert_eq!(amount, Amount::from_minor(250_050));
    }

    #[test]
    fn test_rejects_bad_amount() {
        let result = Cli::try_parse_from([
            "lockwallet", "airtime", "--phone", "08031234567", "--network", "mtn", "--amount",
            "1.234",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lockwallet", "balance", "--ephemeral"]).unwrap();
        assert!(cli.ephemeral);
        assert!(matches!(cli.command, Command::Balance));
    }
}
