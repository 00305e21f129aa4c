pub mod auth;
pub mod cli;
pub mod core;
pub mod data;
pub mod portfolio;
pub mod providers;
pub mod store;

use crate::auth::AuthService;
use crate::core::config::AppConfig;
use crate::core::growth::CompoundingFrequency;
use crate::core::model::FundDraft;
use crate::core::valuation;
use crate::data::UserData;
use crate::portfolio::PortfolioService;
use crate::providers::fallback::FallbackSearchProvider;
use crate::providers::mfapi::MfApiProvider;
use crate::providers::static_funds::StaticFundProvider;
use crate::store::remote::{FallbackCollection, RemoteCollection};
use crate::store::{KeyValueCollection, KeyValueStore};
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the CLI can ask for, decoupled from clap so integration
/// tests can drive the app directly.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Register { name: String, pin: String },
    Login { name: String, pin: String },
    Logout,
    Whoami,
    MemberAdd { name: String },
    MemberRemove { member_id: String },
    MemberList,
    FundAdd { member_id: String, draft: FundDraft },
    FundRemove { member_id: String, fund_id: String },
    Summary,
    Search { query: String },
    Nav { scheme_code: String },
    Simulate {
        rate: f64,
        years: u32,
        frequency: CompoundingFrequency,
        value: Option<f64>,
    },
    ClearData,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Family fund tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_path = config.default_data_path()?;
    let store = KeyValueStore::open(&data_path.join("store"))?;

    // Auth stays local even when a remote store is configured.
    let auth = AuthService::new(store.collection("auth", true)?);

    match command {
        AppCommand::Register { name, pin } => cli::auth::register(&auth, &name, &pin).await,
        AppCommand::Login { name, pin } => cli::auth::login(&auth, &name, &pin).await,
        AppCommand::Logout => cli::auth::logout(&auth).await,
        AppCommand::Whoami => cli::auth::whoami(&auth).await,

        AppCommand::Search { query } => {
            let provider = search_provider(&config, &store)?;
            cli::search::run(provider.as_ref(), &query).await
        }
        AppCommand::Nav { scheme_code } => {
            let provider = MfApiProvider::new(
                config.mfapi_base_url(),
                store.collection("mfapi", true)?,
            );
            cli::nav::run(&provider, &scheme_code).await
        }

        command => {
            let Some(user) = auth.current_user().await else {
                bail!("Not logged in. Run `famfolio login` or `famfolio register` first.");
            };
            debug!("Running as user {}", user.id);

            let data = UserData::new(user_collection(&config, &store)?, &user.id);
            let service = PortfolioService::new(data.clone());

            match command {
                AppCommand::MemberAdd { name } => cli::members::add(&service, &name).await,
                AppCommand::MemberRemove { member_id } => {
                    cli::members::remove(&service, &member_id).await
                }
                AppCommand::MemberList => cli::members::list(&service).await,
                AppCommand::FundAdd { member_id, draft } => {
                    cli::funds::add(&service, &member_id, draft).await
                }
                AppCommand::FundRemove { member_id, fund_id } => {
                    cli::funds::remove(&service, &member_id, &fund_id).await
                }
                AppCommand::Summary => cli::summary::run(&service.portfolio().await),
                AppCommand::Simulate {
                    rate,
                    years,
                    frequency,
                    value,
                } => {
                    let start_value = match value {
                        Some(value) => value,
                        None => {
                            let portfolio = service.portfolio().await;
                            valuation::portfolio_totals(&portfolio).current_value
                        }
                    };
                    cli::simulate::run(start_value, rate, years, frequency)
                }
                AppCommand::ClearData => {
                    data.clear().await;
                    println!("Cleared all stored data for {}.", user.name);
                    Ok(())
                }
                // Session-free commands are handled in the outer match.
                _ => unreachable!("command dispatched twice"),
            }
        }
    }
}

/// User data goes through the remote store when one is configured, with
/// the local collection as fallback; otherwise it is local only.
fn user_collection(
    config: &AppConfig,
    store: &KeyValueStore,
) -> Result<Arc<dyn KeyValueCollection>> {
    let local = store.collection("data", true)?;
    Ok(match &config.remote_store {
        Some(remote) => Arc::new(FallbackCollection::new(
            Arc::new(RemoteCollection::new(&remote.base_url)),
            local,
        )),
        None => local,
    })
}

fn search_provider(
    config: &AppConfig,
    store: &KeyValueStore,
) -> Result<Arc<FallbackSearchProvider>> {
    let mfapi = MfApiProvider::new(config.mfapi_base_url(), store.collection("mfapi", true)?);
    Ok(Arc::new(FallbackSearchProvider::new(
        Arc::new(mfapi),
        Arc::new(StaticFundProvider),
    )))
}
