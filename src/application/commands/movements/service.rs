use std::sync::Arc;

use crate::{
    application::{commands::retry::RetryPolicy, ports::time::Clock},
    domain::ledger::StockLedger,
};

pub struct MovementCommandService {
    pub(super) ledger: Arc<dyn StockLedger>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) retry: RetryPolicy,
}

impl MovementCommandService {
    pub fn new(ledger: Arc<dyn StockLedger>, clock: Arc<dyn Clock>, retry: RetryPolicy) -> Self {
        Self {
            ledger,
            clock,
            retry,
        }
    }
}
