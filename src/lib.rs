// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod catalogue;
pub mod client;
pub mod rule;
pub mod notifier;
pub mod slack;
pub mod checker;
pub mod report;

// Re-export commonly used items
pub use types::*;
pub use error::{CheckError, DateFormatError, DateFormatReason, LoadError, NotifyError, ResolveError};
pub use config::{load_config, load_config_with_env, parse_log_level, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use client::{EndOfLifeHttpClient, ReleaseInfoResolver, DEFAULT_API_BASE_URL};
pub use rule::{is_near_end_of_life, parse_eol_date, LookaheadWindow, DEFAULT_LOOKAHEAD_MONTHS};
pub use notifier::{NilNotifier, Notifier};
pub use slack::{build_slack_payload, send_to_slack, SlackNotifier};
pub use checker::{CatalogueChecker, CatalogueSource};
pub use report::{CheckEntry, CheckReport};
