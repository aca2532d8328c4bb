// src/store/mod.rs
//
// Application state: the four feed collections and the operations that
// (re)load them. Each collection is rebuilt off to the side and moved in
// whole, so readers never see a half-loaded feed.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{error, info, warn};

use crate::config::Feeds;
use crate::fetch::{Fetcher, Sleeper, Transport};
use crate::process::{load_factcheck_table, load_table};
use crate::query::collate::spanish_cmp;
use crate::schema::{parse_density, DensityEntry, FactCheck, Kind, Profile, Proposal};

/// Outcome of the last load of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Never loaded.
    Pending,
    Ready,
    /// Load failed; the collection is empty.
    Failed(String),
    /// Load failed; the collection holds stand-in data.
    Fallback(String),
}

#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    status: LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Pending,
            loaded_at: None,
        }
    }
}

impl<T> Collection<T> {
    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items,
            status: LoadStatus::Ready,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Failed(error),
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn fallback(items: Vec<T>, error: String) -> Self {
        Self {
            items,
            status: LoadStatus::Fallback(error),
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loaded fine but the feed had no data rows.
    pub fn is_no_data(&self) -> bool {
        self.status == LoadStatus::Ready && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(e) | LoadStatus::Fallback(e) => Some(e),
            _ => None,
        }
    }
}

/// Load the party/candidate sheet. Failures yield an empty, failed collection.
pub async fn load_profiles<T: Transport, S: Sleeper>(
    fetcher: &Fetcher<T, S>,
    feeds: &Feeds,
) -> Collection<Profile> {
    match fetcher.fetch("profiles", &feeds.profiles).await {
        Ok(text) => {
            let items: Vec<Profile> = load_table(&text)
                .records
                .into_iter()
                .map(Profile::from_record)
                .collect();
            info!(feed = "profiles", records = items.len(), "loaded");
            Collection::ready(items)
        }
        Err(e) => {
            error!(feed = "profiles", error = %format!("{:#}", e), "load failed");
            Collection::failed(format!("{:#}", e))
        }
    }
}

/// Load the comparison sheet. Failures yield an empty, failed collection.
pub async fn load_comparisons<T: Transport, S: Sleeper>(
    fetcher: &Fetcher<T, S>,
    feeds: &Feeds,
) -> Collection<Proposal> {
    match fetcher.fetch("comparisons", &feeds.comparisons).await {
        Ok(text) => {
            let items: Vec<Proposal> = load_table(&text)
                .records
                .into_iter()
                .map(Proposal::from_record)
                .collect();
            info!(feed = "comparisons", records = items.len(), "loaded");
            Collection::ready(items)
        }
        Err(e) => {
            error!(feed = "comparisons", error = %format!("{:#}", e), "load failed");
            Collection::failed(format!("{:#}", e))
        }
    }
}

/// Load the fact-check sheet, falling back to one example entry.
pub async fn load_factchecks<T: Transport, S: Sleeper>(
    fetcher: &Fetcher<T, S>,
    feeds: &Feeds,
) -> Collection<FactCheck> {
    match fetcher.fetch("factchecks", &feeds.factchecks).await {
        Ok(text) => {
            let items: Vec<FactCheck> = load_factcheck_table(&text)
                .records
                .into_iter()
                .map(FactCheck::from_record)
                .collect();
            info!(feed = "factchecks", records = items.len(), "loaded");
            Collection::ready(items)
        }
        Err(e) => {
            warn!(feed = "factchecks", error = %format!("{:#}", e), "load failed, using example data");
            Collection::fallback(vec![FactCheck::example()], format!("{:#}", e))
        }
    }
}

/// Load the density document, falling back to a single placeholder party.
pub async fn load_density<T: Transport, S: Sleeper>(
    fetcher: &Fetcher<T, S>,
    feeds: &Feeds,
) -> Collection<DensityEntry> {
    let res = match fetcher.fetch("density", &feeds.density).await {
        Ok(text) => parse_density(&text),
        Err(e) => Err(e),
    };
    match res {
        Ok(items) => {
            info!(feed = "density", parties = items.len(), "loaded");
            Collection::ready(items)
        }
        Err(e) => {
            warn!(feed = "density", error = %format!("{:#}", e), "load failed, using placeholder");
            Collection::fallback(vec![DensityEntry::placeholder()], format!("{:#}", e))
        }
    }
}

/// Owner of every loaded dataset.
#[derive(Clone, Debug, Default)]
pub struct DataStore {
    profiles: Collection<Profile>,
    comparisons: Collection<Proposal>,
    factchecks: Collection<FactCheck>,
    density: Collection<DensityEntry>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> &Collection<Profile> {
        &self.profiles
    }

    pub fn comparisons(&self) -> &Collection<Proposal> {
        &self.comparisons
    }

    pub fn factchecks(&self) -> &Collection<FactCheck> {
        &self.factchecks
    }

    pub fn density(&self) -> &Collection<DensityEntry> {
        &self.density
    }

    pub fn set_profiles(&mut self, c: Collection<Profile>) {
        self.profiles = c;
    }

    pub fn set_comparisons(&mut self, c: Collection<Proposal>) {
        self.comparisons = c;
    }

    pub fn set_factchecks(&mut self, c: Collection<FactCheck>) {
        self.factchecks = c;
    }

    pub fn set_density(&mut self, c: Collection<DensityEntry>) {
        self.density = c;
    }

    pub async fn refresh_profiles<T: Transport, S: Sleeper>(
        &mut self,
        fetcher: &Fetcher<T, S>,
        feeds: &Feeds,
    ) {
        self.profiles = load_profiles(fetcher, feeds).await;
    }

    pub async fn refresh_comparisons<T: Transport, S: Sleeper>(
        &mut self,
        fetcher: &Fetcher<T, S>,
        feeds: &Feeds,
    ) {
        self.comparisons = load_comparisons(fetcher, feeds).await;
    }

    pub async fn refresh_factchecks<T: Transport, S: Sleeper>(
        &mut self,
        fetcher: &Fetcher<T, S>,
        feeds: &Feeds,
    ) {
        self.factchecks = load_factchecks(fetcher, feeds).await;
    }

    pub async fn refresh_density<T: Transport, S: Sleeper>(
        &mut self,
        fetcher: &Fetcher<T, S>,
        feeds: &Feeds,
    ) {
        self.density = load_density(fetcher, feeds).await;
    }

    /// Reload all four feeds concurrently. Each collection is replaced as a
    /// unit; one feed failing leaves the others untouched.
    pub async fn refresh_all<T: Transport, S: Sleeper>(
        &mut self,
        fetcher: &Fetcher<T, S>,
        feeds: &Feeds,
    ) {
        let (profiles, comparisons, factchecks, density) = futures::join!(
            load_profiles(fetcher, feeds),
            load_comparisons(fetcher, feeds),
            load_factchecks(fetcher, feeds),
            load_density(fetcher, feeds),
        );
        self.profiles = profiles;
        self.comparisons = comparisons;
        self.factchecks = factchecks;
        self.density = density;
        info!(
            profiles = self.profiles.len(),
            comparisons = self.comparisons.len(),
            factchecks = self.factchecks.len(),
            density = self.density.len(),
            "refresh complete"
        );
    }

    /// Profiles of one kind, sorted by `nombre` in Spanish collation order.
    pub fn listing(&self, kind: &Kind) -> Vec<&Profile> {
        let mut out: Vec<&Profile> = self
            .profiles
            .items()
            .iter()
            .filter(|p| &p.kind == kind)
            .collect();
        sort_by_name(&mut out);
        out
    }

    pub fn profile_by_id(&self, id: &str) -> Option<&Profile> {
        self.profiles.items().iter().find(|p| p.id == id)
    }

    pub fn party_by_id(&self, id: &str) -> Option<&Profile> {
        self.profiles
            .items()
            .iter()
            .find(|p| p.id == id && p.kind == Kind::Partido)
    }

    /// The party row a profile belongs to: itself for parties, the party whose
    /// `nombre` matches the candidate's party name otherwise.
    pub fn resolve_party<'a>(&'a self, profile: &'a Profile) -> Option<&'a Profile> {
        if profile.kind == Kind::Partido {
            return Some(profile);
        }
        let name = profile.party_name();
        self.profiles
            .items()
            .iter()
            .find(|p| p.kind == Kind::Partido && p.nombre == name)
    }

    /// First comparison row for `(party_id, theme)`.
    pub fn proposal_for(&self, party_id: &str, theme: &str) -> Option<&Proposal> {
        self.comparisons
            .items()
            .iter()
            .find(|c| c.partido_id == party_id && c.tema == theme)
    }

    pub fn density_for(&self, party_id: &str) -> Option<&DensityEntry> {
        self.density.items().iter().find(|d| d.id == party_id)
    }
}

pub(crate) fn by_name(a: &&Profile, b: &&Profile) -> Ordering {
    spanish_cmp(&a.nombre, &b.nombre)
}

pub(crate) fn sort_by_name(profiles: &mut [&Profile]) {
    profiles.sort_by(by_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheBust, FeedSource};
    use crate::fetch::retry::tests::FakeSleeper;
    use crate::fetch::tests::FakeTransport;
    use crate::fetch::RetryPolicy;
    use std::time::Duration;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,planes_gobierno=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const PROFILES_URL: &str = "https://sheets.test/profiles.csv";
    const COMPARE_URL: &str = "https://sheets.test/compare.csv";
    const FACTS_URL: &str = "https://docs.google.com/facts/export";
    const DENSITY_URL: &str = "https://static.test/densidad.json";

    const PROFILES_CSV: &str = "id,tipo,nombre,candidato,nombrepartido\n\
        1,partido,Ñandú Libre,,\n\
        2,partido,Acción Popular,,\n\
        3,candidato,Zoila Vega,Zoila Vega,Acción Popular\n\
        4,partido,Nueva Era,,\n\
        5,partido,árbol verde,,\n";

    const COMPARE_CSV: &str = "partidoid,tema,propuestas,titulopropuesta\n\
        2,salud,\"- Más postas\n- Más médicos\",Salud primero\n\
        2,salud,- Duplicado,Ignorado\n\
        4,educacion,- Becas,Educar\n";

    const FACTS_CSV: &str = "partido,candidato,frase,veredicto,justificacion,fuentes_consultadas\n\
        Acción Popular,Zoila Vega,Haremos X,Factible,Porque sí,\"INEI\nhttps://inei.gob.pe\"\n\
        ,,,,,\n";

    const DENSITY_JSON: &str =
        r#"{"partidos":[{"id":2,"nombre":"Acción Popular","densidad":{"salud":40,"educacion":10}}]}"#;

    fn feeds() -> Feeds {
        let src = |url: &str, cache_bust, retry| FeedSource {
            url: url.to_string(),
            cache_bust,
            retry,
        };
        Feeds {
            profiles: src(PROFILES_URL, CacheBust::Always, false),
            comparisons: src(COMPARE_URL, CacheBust::Always, true),
            factchecks: src(FACTS_URL, CacheBust::GoogleSheets, false),
            density: src(DENSITY_URL, CacheBust::Never, true),
        }
    }

    fn fetcher(transport: FakeTransport) -> Fetcher<FakeTransport, FakeSleeper> {
        init_logging();
        Fetcher::new(transport, FakeSleeper::default(), RetryPolicy::default())
    }

    fn full_transport() -> FakeTransport {
        FakeTransport::default()
            .with(PROFILES_URL, PROFILES_CSV)
            .with(COMPARE_URL, COMPARE_CSV)
            .with(FACTS_URL, FACTS_CSV)
            .with(DENSITY_URL, DENSITY_JSON)
    }

    #[tokio::test]
    async fn test_refresh_all_loads_every_feed() {
        let f = fetcher(full_transport());
        let mut store = DataStore::new();
        assert_eq!(store.profiles().status(), &LoadStatus::Pending);

        store.refresh_all(&f, &feeds()).await;

        assert_eq!(store.profiles().len(), 5);
        assert_eq!(store.comparisons().len(), 3);
        assert_eq!(store.factchecks().len(), 1);
        assert_eq!(store.density().len(), 1);
        assert_eq!(store.profiles().status(), &LoadStatus::Ready);
        assert!(store.profiles().loaded_at().is_some());
    }

    #[tokio::test]
    async fn test_listing_sorted_in_spanish_order() {
        let f = fetcher(full_transport());
        let mut store = DataStore::new();
        store.refresh_profiles(&f, &feeds()).await;

        let names: Vec<&str> = store
            .listing(&Kind::Partido)
            .iter()
            .map(|p| p.nombre.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Acción Popular", "árbol verde", "Nueva Era", "Ñandú Libre"]
        );
        assert_eq!(store.listing(&Kind::Candidato).len(), 1);
    }

    #[tokio::test]
    async fn test_feed_failures_are_isolated() {
        let transport = full_transport();
        transport.remove(PROFILES_URL);
        transport.remove(DENSITY_URL);
        transport.remove(FACTS_URL);
        let f = fetcher(transport);
        let mut store = DataStore::new();

        store.refresh_all(&f, &feeds()).await;

        assert!(store.profiles().is_empty());
        assert!(matches!(store.profiles().status(), LoadStatus::Failed(_)));
        assert!(!store.profiles().is_no_data());

        assert_eq!(store.comparisons().status(), &LoadStatus::Ready);
        assert_eq!(store.comparisons().len(), 3);

        assert_eq!(store.factchecks().items(), &[FactCheck::example()]);
        assert!(matches!(store.factchecks().status(), LoadStatus::Fallback(_)));

        assert_eq!(store.density().items(), &[DensityEntry::placeholder()]);
        assert!(store.density().error().unwrap().contains("HTTP 404"));
        // density retried three times, the others once
        assert_eq!(f.sleeper().total(), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_malformed_density_uses_placeholder() {
        let transport = full_transport();
        transport.set(DENSITY_URL, "{\"partidos\": 3}");
        let f = fetcher(transport);
        let mut store = DataStore::new();
        store.refresh_density(&f, &feeds()).await;
        assert_eq!(store.density().items(), &[DensityEntry::placeholder()]);
    }

    #[tokio::test]
    async fn test_zero_data_rows_is_no_data_not_error() {
        let transport = full_transport();
        transport.set(PROFILES_URL, "id,tipo,nombre\n");
        let f = fetcher(transport);
        let mut store = DataStore::new();
        store.refresh_profiles(&f, &feeds()).await;
        assert!(store.profiles().is_no_data());
        assert_eq!(store.profiles().error(), None);
    }

    #[tokio::test]
    async fn test_reload_replaces_whole_collection() {
        let transport = full_transport();
        let f = fetcher(transport);
        let mut store = DataStore::new();
        store.refresh_profiles(&f, &feeds()).await;
        assert_eq!(store.profiles().len(), 5);

        f.transport().set(PROFILES_URL, "id,tipo,nombre\n9,partido,Solo\n");
        store.refresh_profiles(&f, &feeds()).await;
        assert_eq!(store.profiles().len(), 1);
        assert_eq!(store.profiles().items()[0].nombre, "Solo");
    }

    #[tokio::test]
    async fn test_lookups() {
        let f = fetcher(full_transport());
        let mut store = DataStore::new();
        store.refresh_all(&f, &feeds()).await;

        let cand = store.profile_by_id("3").unwrap();
        assert_eq!(store.resolve_party(cand).map(|p| p.id.as_str()), Some("2"));
        assert!(store.party_by_id("3").is_none());

        let p = store.proposal_for("2", "salud").unwrap();
        assert_eq!(p.titulo, "Salud primero");
        assert!(store.proposal_for("2", "vivienda").is_none());

        assert_eq!(store.density_for("2").unwrap().percentage("salud"), 40.0);
    }
}
