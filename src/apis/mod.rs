//! Clients for the processor APIs.

use crate::client::Environment;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::{Debug, Formatter};

pub mod accounts;
pub mod transfers;

pub(crate) struct PayConnectClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) environment: Environment,
}

impl Debug for PayConnectClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayConnectClientInner")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
