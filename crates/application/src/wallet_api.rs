//! Typed wallet operations on top of the authenticated client.

use lockwallet_domain::{
    AirtimePurchase, ApiRequest, DataPlan, DataPurchase, Lock, NewLock, Outlet, Spend,
    Transaction, User, Wallet, validate_lock_id,
};
use serde::Deserialize;
use tracing::info;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiResult;

#[derive(Deserialize)]
struct UserData {
    user: User,
}

#[derive(Deserialize)]
struct WalletData {
    wallet: Wallet,
}

#[derive(Deserialize)]
struct LocksData {
    locks: Vec<Lock>,
}

#[derive(Deserialize)]
struct LockData {
    lock: Lock,
}

#[derive(Deserialize)]
struct OutletsData {
    outlets: Vec<Outlet>,
}

#[derive(Deserialize)]
struct TransactionData {
    transaction: Transaction,
}

#[derive(Deserialize)]
struct TransactionsData {
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct PlansData {
    plans: Vec<DataPlan>,
}

/// Wallet, lock and bill-payment endpoints.
///
/// Inputs are validated before anything is sent; a validation failure
/// surfaces as `ApiError::Validation`.
#[derive(Clone)]
pub struct WalletApi {
    client: ApiClient,
}

impl WalletApi {
    /// Wraps an authenticated client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the signed-in user's profile.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn profile(&self) -> ApiResult<User> {
        let data: UserData = self.client.send_data(ApiRequest::get(endpoints::PROFILE)).await?;
        Ok(data.user)
    }

    /// Fetches the wallet balance.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn wallet(&self) -> ApiResult<Wallet> {
        let data: WalletData = self.client.send_data(ApiRequest::get(endpoints::WALLET)).await?;
        Ok(data.wallet)
    }

    /// Lists the user's budget locks.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn locks(&self) -> ApiResult<Vec<Lock>> {
        let data: LocksData = self.client.send_data(ApiRequest::get(endpoints::LOCKS)).await?;
        Ok(data.locks)
    }

    /// Moves funds into a new budget lock.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for a non-positive amount or empty
    /// category, otherwise any request error.
    pub async fn create_lock(&self, input: &NewLock) -> ApiResult<Lock> {
        input.validate()?;
        let request = ApiRequest::post(endpoints::LOCKS).with_json(input)?;
        let data: LockData = self.client.send_data(request).await?;
        info!(lock_id = %data.lock.id, amount = %data.lock.amount, "lock created");
        Ok(data.lock)
    }

    /// Lists outlets, optionally restricted to one category.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn outlets(&self, category: Option<&str>) -> ApiResult<Vec<Outlet>> {
        let mut request = ApiRequest::get(endpoints::OUTLETS);
        if let Some(category) = category {
            request = request.with_query("category", category);
        }
        let data: OutletsData = self.client.send_data(request).await?;
        Ok(data.outlets)
    }

    /// Spends from a lock at an outlet.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for invalid input or a lock id that is
    /// not a single path segment, otherwise any request error.
    pub async fn spend(&self, lock_id: &str, input: &Spend) -> ApiResult<Transaction> {
        validate_lock_id(lock_id)?;
        input.validate()?;
        let request = ApiRequest::post(endpoints::lock_spend(lock_id)).with_json(input)?;
        let data: TransactionData = self.client.send_data(request).await?;
        info!(lock_id, amount = %input.amount, "spent from lock");
        Ok(data.transaction)
    }

    /// Spends from a known lock, checking its status and remaining amount first.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` if the lock cannot cover the amount,
    /// otherwise the same errors as [`WalletApi::spend`].
    pub async fn spend_from(&self, lock: &Lock, input: &Spend) -> ApiResult<Transaction> {
        lock.can_spend(input.amount)?;
        self.spend(&lock.id, input).await
    }

    /// Buys airtime.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for an invalid phone number or
    /// amount, otherwise any request error.
    pub async fn buy_airtime(&self, input: &AirtimePurchase) -> ApiResult<Transaction> {
        input.validate()?;
        let request = ApiRequest::post(endpoints::AIRTIME).with_json(input)?;
        let data: TransactionData = self.client.send_data(request).await?;
        Ok(data.transaction)
    }

    /// Buys a data bundle.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` for an invalid phone number or plan,
    /// otherwise any request error.
    pub async fn buy_data(&self, input: &DataPurchase) -> ApiResult<Transaction> {
        input.validate()?;
        let request = ApiRequest::post(endpoints::DATA).with_json(input)?;
        let data: TransactionData = self.client.send_data(request).await?;
        Ok(data.transaction)
    }

    /// Lists the data bundles a network sells.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn data_plans(&self, network: &str) -> ApiResult<Vec<DataPlan>> {
        let request = ApiRequest::get(endpoints::DATA_PLANS).with_query("network", network);
        let data: PlansData = self.client.send_data(request).await?;
        Ok(data.plans)
    }

    /// Lists past transactions, newest first as returned by the server.
    ///
    /// # Errors
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn transactions(&self) -> ApiResult<Vec<Transaction>> {
        let data: TransactionsData = self
            .client
            .send_data(ApiRequest::get(endpoints::TRANSACTIONS))
            .await?;
        Ok(data.transactions)
    }
}
