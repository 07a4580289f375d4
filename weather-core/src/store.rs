use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    error::{NotFoundError, StorageError, ValidationError},
    model::{CardInput, WeatherCard},
    storage::Storage,
};

pub const DEFAULT_STORAGE_KEY: &str = "weatherCards";

/// Ordered collection of weather cards, mirrored to `Storage` after every
/// mutation.
///
/// The in-memory collection is the source of truth for the session: a
/// failed write is logged and the mutation still stands.
#[derive(Debug)]
pub struct CardStore {
    storage: Box<dyn Storage>,
    key: String,
    cards: Vec<WeatherCard>,
}

impl CardStore {
    /// Create a store over `storage` and load whatever is persisted under `key`.
    pub fn open(storage: Box<dyn Storage>, key: impl Into<String>) -> Self {
        let mut store = Self { storage, key: key.into(), cards: Vec::new() };
        store.load();
        store
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Absent, unreadable or unparsable data yields an empty collection.
    pub fn load(&mut self) -> &[WeatherCard] {
        self.cards = match self.storage.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WeatherCard>>(&raw) {
                Ok(cards) => cards,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "discarding unparsable card data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read cards, starting empty");
                Vec::new()
            }
        };

        debug!(key = %self.key, count = self.cards.len(), "cards loaded");
        &self.cards
    }

    pub fn add(&mut self, input: &CardInput) -> Result<WeatherCard, ValidationError> {
        self.add_at(input, Utc::now())
    }

    /// Same as [`CardStore::add`] with an explicit clock reading.
    ///
    /// The id is the creation time in ms, bumped past the newest existing id
    /// when the clock has not moved forward since the last insert.
    pub fn add_at(
        &mut self,
        input: &CardInput,
        now: DateTime<Utc>,
    ) -> Result<WeatherCard, ValidationError> {
        let created_at = now.timestamp_millis();
        let id = match self.cards.iter().map(|c| c.id).max() {
            Some(last) if last >= created_at => {
                last.checked_add(1).ok_or(ValidationError::IdsExhausted(last))?
            }
            _ => created_at,
        };

        let card = input.build(id, created_at)?;

        self.cards.push(card.clone());
        self.persist();

        debug!(id = card.id, city = %card.city, "card added");
        Ok(card)
    }

    pub fn remove(&mut self, id: i64) -> Result<WeatherCard, NotFoundError> {
        let index = self.cards.iter().position(|c| c.id == id).ok_or(NotFoundError { id })?;

        let card = self.cards.remove(index);
        self.persist();

        debug!(id, city = %card.city, "card removed");
        Ok(card)
    }

    /// Drop every card. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards.clear();
        self.persist();

        debug!(removed, "cards cleared");
        removed
    }

    /// Write the current collection under the store's key.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.cards)
            .map_err(|e| StorageError::Unavailable(format!("failed to encode cards: {e}")))?;

        self.storage.set(&self.key, &json)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(key = %self.key, error = %e, "card changes kept in memory only");
        }
    }

    pub fn cards(&self) -> &[WeatherCard] {
        &self.cards
    }

    pub fn get(&self, id: i64) -> Option<&WeatherCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
