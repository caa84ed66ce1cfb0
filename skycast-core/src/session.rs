//! Dashboard state: what is on screen, the unit preference, favorites and
//! recent searches. Talks to the gateway and owns the persisted lists.

use std::sync::Arc;

use crate::{
    gateway::WeatherGateway,
    model::{UnitSystem, WeatherBundle},
    store::KeyValueStore,
};

pub const FAVORITES_KEY: &str = "weatherFavorites";
pub const RECENT_KEY: &str = "recentSearches";
pub const MAX_RECENT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("No weather has been loaded yet")]
    NothingLoaded,

    #[error("Weather for {0} was superseded by a newer search")]
    Superseded(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct DashboardSession<S> {
    gateway: Arc<WeatherGateway>,
    store: S,
    unit: UnitSystem,
    /// City whose results should be displayed; anything else is stale.
    desired: Option<String>,
    current: Option<WeatherBundle>,
    favorites: Vec<String>,
    recent: Vec<String>,
}

impl<S: KeyValueStore> DashboardSession<S> {
    pub fn new(gateway: Arc<WeatherGateway>, store: S, unit: UnitSystem) -> Self {
        let favorites = load_list(&store, FAVORITES_KEY);
        let recent = load_list(&store, RECENT_KEY);

        Self {
            gateway,
            store,
            unit,
            desired: None,
            current: None,
            favorites,
            recent,
        }
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn current(&self) -> Option<&WeatherBundle> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.iter().any(|f| f == city)
    }

    /// Validate a query and mark its city as the one to display.
    pub fn request(&mut self, query: &str) -> Result<String, SessionError> {
        let city = query.trim();
        if city.is_empty() {
            tracing::debug!("Rejected blank search");
            return Err(SessionError::EmptyQuery);
        }

        self.desired = Some(city.to_string());
        Ok(city.to_string())
    }

    /// Swap in a bundle if it is still wanted. Returns whether it was applied.
    pub fn apply(&mut self, bundle: WeatherBundle) -> bool {
        let wanted = self.desired.as_deref() == Some(bundle.city.as_str()) && bundle.unit == self.unit;

        if !wanted {
            tracing::debug!(city = %bundle.city, "Discarding stale weather");
            return false;
        }

        self.current = Some(bundle);
        true
    }

    /// Search for a city, show its weather and remember the query.
    pub async fn search(&mut self, query: &str) -> Result<&WeatherBundle, SessionError> {
        let city = self.request(query)?;
        let bundle = self.gateway.fetch_bundle(&city, self.unit).await;
        self.complete(bundle)
    }

    /// Apply the result of a search started with [`request`](Self::request)
    /// and remember it as a recent search. A stale bundle is rejected and
    /// leaves the displayed weather untouched.
    pub fn complete(&mut self, bundle: WeatherBundle) -> Result<&WeatherBundle, SessionError> {
        let city = bundle.city.clone();
        if !self.apply(bundle) {
            return Err(SessionError::Superseded(city));
        }

        self.push_recent(&city)?;
        self.current.as_ref().ok_or(SessionError::NothingLoaded)
    }

    /// Change units and reload whatever city is on screen.
    pub async fn set_unit(&mut self, unit: UnitSystem) -> Result<(), SessionError> {
        if unit == self.unit {
            return Ok(());
        }
        self.unit = unit;

        if let Some(city) = self.desired.clone() {
            let bundle = self.gateway.fetch_bundle(&city, unit).await;
            self.apply(bundle);
        }

        Ok(())
    }

    /// Toggle the displayed place in favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self) -> Result<bool, SessionError> {
        let name = self
            .current
            .as_ref()
            .map(|bundle| bundle.snapshot.name.clone())
            .ok_or(SessionError::NothingLoaded)?;

        self.toggle_favorite_city(&name)
    }

    pub fn toggle_favorite_city(&mut self, city: &str) -> Result<bool, SessionError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        let now_favorite = if self.is_favorite(city) {
            self.favorites.retain(|f| f != city);
            false
        } else {
            self.favorites.push(city.to_string());
            true
        };

        save_list(&mut self.store, FAVORITES_KEY, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn clear_recent(&mut self) -> Result<(), SessionError> {
        self.recent.clear();
        self.store.remove(RECENT_KEY)?;
        Ok(())
    }

    fn push_recent(&mut self, city: &str) -> Result<(), SessionError> {
        self.recent.retain(|r| r != city);
        self.recent.insert(0, city.to_string());
        self.recent.truncate(MAX_RECENT);

        save_list(&mut self.store, RECENT_KEY, &self.recent)?;
        Ok(())
    }
}

fn load_list(store: &impl KeyValueStore, key: &str) -> Vec<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, "Failed to read stored list: {e:#}");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, "Ignoring corrupt stored list: {e}");
        Vec::new()
    })
}

fn save_list(store: &mut impl KeyValueStore, key: &str, list: &[String]) -> anyhow::Result<()> {
    let json = serde_json::to_string(list)?;
    store.set(key, &json)
}
