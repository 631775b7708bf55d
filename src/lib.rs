//! Moneta ties the reporting core, domain models, and the JSON storage
//! backend together for hosts that want the whole stack: open a ledger
//! store, hand it to a [`DashboardService`], get dashboard reports back.

pub use moneta_core as core;
pub use moneta_domain as domain;
pub use moneta_storage_json as storage;

pub use moneta_core::{
    CoreError, CoreResult, DashboardService, ProfitPolicy, ReportConfig, SystemClock,
};
pub use moneta_domain::{DashboardReport, MonthKey};
pub use moneta_storage_json::JsonLedgerStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("moneta=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Moneta tracing initialized.");
    });
}
