use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    client::{
        data::{RestClient, ZTokenBackend},
        error::{backend::BackendError, Error},
    },
    model::ztoken::{ResetResult, ResetStatus},
};

const GET_RESET_STATUS_RPC: &str = "get_ztoken_reset_status";
const RESET_DAILY_RPC: &str = "reset_daily_ztoken";
const RESET_MANUAL_RPC: &str = "reset_ztoken_manual";
const SHOULD_RUN_RESET_RPC: &str = "should_run_daily_ztoken_reset";

/// Set-returning procedures answer with an array even for a single row
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_single(self, function: &str) -> Result<T, Error> {
        match self {
            Self::One(value) => Ok(value),
            Self::Many(values) => values.into_iter().next().ok_or_else(|| {
                BackendError::Rejected(format!("{} returned no rows", function)).into()
            }),
        }
    }
}

#[async_trait]
impl ZTokenBackend for RestClient {
    async fn get_reset_status(&self) -> Result<ResetStatus, Error> {
        let status: OneOrMany<ResetStatus> = self.rpc(GET_RESET_STATUS_RPC).await?;
        status.into_single(GET_RESET_STATUS_RPC)
    }

    async fn reset_daily(&self) -> Result<ResetResult, Error> {
        let result: OneOrMany<ResetResult> = self.rpc(RESET_DAILY_RPC).await?;
        result.into_single(RESET_DAILY_RPC)
    }

    async fn reset_manual(&self) -> Result<ResetResult, Error> {
        let result: OneOrMany<ResetResult> = self.rpc(RESET_MANUAL_RPC).await?;
        result.into_single(RESET_MANUAL_RPC)
    }

    async fn should_run_daily_reset(&self) -> Result<bool, Error> {
        self.rpc(SHOULD_RUN_RESET_RPC).await
    }
}
