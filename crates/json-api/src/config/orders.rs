//! Orders Config

use clap::Args;
use dailybrew_app::domain::orders::TransitionPolicy;

/// Order workflow settings.
#[derive(Debug, Args)]
pub struct OrdersConfig {
    /// Whether status transitions validate the prior state
    #[arg(
        long,
        env = "TRANSITION_POLICY",
        value_enum,
        default_value = "permissive"
    )]
    pub transition_policy: TransitionPolicy,
}
