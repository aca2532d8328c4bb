use anyhow::Result;
use planes_gobierno::{
    config::Config,
    fetch::Fetcher,
    query,
    schema::Kind,
    store::{Collection, DataStore, LoadStatus},
};
use std::{env, path::PathBuf};
use tokio::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn report<T>(feed: &str, c: &Collection<T>) {
    match c.status() {
        LoadStatus::Ready if c.is_empty() => warn!(feed, "no data"),
        LoadStatus::Ready => info!(feed, records = c.len(), "ready"),
        LoadStatus::Fallback(e) => warn!(feed, records = c.len(), error = %e, "using fallback data"),
        LoadStatus::Failed(e) => error!(feed, error = %e, "unavailable"),
        LoadStatus::Pending => warn!(feed, "not loaded"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    // ─── 2) config ───────────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let config_path = args.next().filter(|a| !a.is_empty()).map(PathBuf::from);
    let search_term = args.next();
    let cfg = Config::load(config_path.as_deref())?;

    // ─── 3) load every feed ──────────────────────────────────────────
    let fetcher = Fetcher::from_config(&cfg)?;
    let mut store = DataStore::new();
    let start = Instant::now();
    store.refresh_all(&fetcher, &cfg.feeds).await;
    info!(elapsed = ?start.elapsed(), "feeds loaded");

    report("profiles", store.profiles());
    report("comparisons", store.comparisons());
    report("factchecks", store.factchecks());
    report("density", store.density());

    // ─── 4) optional search ──────────────────────────────────────────
    if let Some(term) = search_term {
        for kind in [Kind::Partido, Kind::Candidato] {
            let found = query::filter_profiles(store.profiles().items(), &kind, &term);
            info!(kind = kind.as_str(), term = %term, matches = found.len(), "search");
            for p in found {
                info!(id = %p.id, nombre = %p.nombre, candidato = %p.candidato, "match");
            }
        }
    }

    info!("all done");
    Ok(())
}
