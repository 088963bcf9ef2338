//! Command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use lockwallet_application::{
    ApiClient, AuthState, InitializeAuth, SignIn, SignInInput, SignOut, WalletApi,
};
use lockwallet_domain::{AirtimePurchase, DataPurchase, Lock, NewLock, Spend, Transaction};

use crate::cli::{Command, LocksCommand};

/// Runs one command against the API.
pub async fn run(command: Command, client: &ApiClient) -> Result<()> {
    match command {
        Command::SignIn { email, password } => sign_in(client, email, password).await,
        Command::SignOut => {
            SignOut::new(client.clone()).execute().await;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => whoami(client).await,
        Command::Balance => balance(&wallet(client).await?).await,
        Command::Locks(command) => locks(&wallet(client).await?, command).await,
        Command::Outlets { category } => outlets(&wallet(client).await?, category).await,
        Command::Airtime {
            phone,
            network,
            amount,
            lock,
        } => {
            let purchase = AirtimePurchase {
                phone_number: phone,
                network,
                amount,
                lock_id: lock,
            };
            print_receipt(&wallet(client).await?.buy_airtime(&purchase).await?);
            Ok(())
        }
        Command::Data {
            phone,
            network,
            plan,
            lock,
        } => {
            let purchase = DataPurchase {
                phone_number: phone,
                network,
                plan_id: plan,
                lock_id: lock,
            };
            print_receipt(&wallet(client).await?.buy_data(&purchase).await?);
            Ok(())
        }
        Command::DataPlans { network } => data_plans(&wallet(client).await?, &network).await,
        Command::Transactions => transactions(&wallet(client).await?).await,
    }
}

async fn sign_in(client: &ApiClient, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let output = SignIn::new(client.clone())
        .execute(SignInInput { email, password })
        .await
        .context("sign-in failed")?;
    println!("Signed in as {}.", output.user.display_name());
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn whoami(client: &ApiClient) -> Result<()> {
    match InitializeAuth::new(client.clone()).execute().await? {
        AuthState::Anonymous => println!("Not signed in."),
        AuthState::Authenticated { user } => {
            println!("Signed in as {} <{}>.", user.display_name(), user.email);
        }
        AuthState::Stale { user, error } => {
            match user {
                Some(user) => println!("Signed in as {} <{}> (cached).", user.display_name(), user.email),
                None => println!("Signed in."),
            }
            eprintln!("Could not reach the server: {error}");
        }
        AuthState::SignedOut { reason } => bail!("session ended: {reason}"),
    }
    Ok(())
}

/// Restores the stored session; wallet commands need one.
async fn wallet(client: &ApiClient) -> Result<WalletApi> {
    if !InitializeAuth::new(client.clone()).restore().await? {
        bail!("not signed in; run `lockwallet sign-in` first");
    }
    Ok(WalletApi::new(client.clone()))
}

async fn balance(api: &WalletApi) -> Result<()> {
    let wallet = api.wallet().await?;
    println!("Balance:   {} {}", wallet.balance, wallet.currency);
    println!("Locked:    {} {}", wallet.locked_balance, wallet.currency);
    println!("Available: {} {}", wallet.available(), wallet.currency);
    Ok(())
}

async fn locks(api: &WalletApi, command: LocksCommand) -> Result<()> {
    match command {
        LocksCommand::List => print_locks(&api.locks().await?),
        LocksCommand::Create {
            category,
            amount,
            title,
            expires_at,
        } => {
            let lock = api
                .create_lock(&NewLock {
                    category,
                    amount,
                    title,
                    expires_at,
                })
                .await?;
            println!("Created lock {} ({} for {}).", lock.id, lock.amount, lock.category);
        }
        LocksCommand::Spend {
            lock_id,
            outlet,
            amount,
            note,
        } => {
            let locks = api.locks().await?;
            let Some(lock) = locks.iter().find(|lock| lock.id == lock_id) else {
                bail!("no lock with id {lock_id}");
            };
            let spend = Spend {
                outlet_id: outlet,
                amount,
                note,
            };
            print_receipt(&api.spend_from(lock, &spend).await?);
        }
    }
    Ok(())
}

async fn outlets(api: &WalletApi, category: Option<String>) -> Result<()> {
    for outlet in api.outlets(category.as_deref()).await? {
        let address = outlet.address.as_deref().unwrap_or("-");
        println!("{:<24} {:<32} {:<12} {address}", outlet.id, outlet.name, outlet.category);
    }
    Ok(())
}

async fn data_plans(api: &WalletApi, network: &str) -> Result<()> {
    for plan in api.data_plans(network).await? {
        let validity = plan.validity.as_deref().unwrap_or("-");
        println!("{:<16} {:<24} {:>12} {validity}", plan.id, plan.name, plan.price.to_string());
    }
    Ok(())
}

async fn transactions(api: &WalletApi) -> Result<()> {
    let transactions = api.transactions().await?;
    if transactions.is_empty() {
        println!("No transactions yet.");
    }
    for tx in transactions {
        println!(
            "{} {:<8} {:>12} {}",
            tx.created_at.format("%Y-%m-%d %H:%M"),
            tx.kind.to_string(),
            tx.amount.to_string(),
            tx.description
        );
    }
    Ok(())
}

fn print_locks(locks: &[Lock]) {
    if locks.is_empty() {
        println!("No locks yet.");
        return;
    }
    for lock in locks {
        println!(
            "{:<24} {:<12} {:>12} / {:>12} {}",
            lock.id,
            lock.category,
            lock.remaining().to_string(),
            lock.amount.to_string(),
            lock.status
        );
    }
}

fn print_receipt(tx: &Transaction) {
    let reference = tx.reference.as_deref().unwrap_or(&tx.id);
    println!("Paid {} ({}), reference {reference}.", tx.amount, tx.kind);
}
