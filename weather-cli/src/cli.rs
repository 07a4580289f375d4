use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use tracing::debug;
use weather_core::{
    CardInput, CardStore, Config, MemoryStorage, Storage, StorageKind, storage::storage_from_config,
};

use crate::{notify::Notification, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-cards", version, about = "Record and display weather cards")]
pub struct Cli {
    /// Keep cards in memory for this run instead of the configured backend.
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a card.
    Add(AddArgs),

    /// Remove the card with the given id.
    Remove {
        /// Card id, as shown by `list`.
        id: i64,
    },

    /// Remove every card.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Show all cards in insertion order.
    List,

    /// Choose where cards are stored.
    Configure,
}

/// Raw form fields. Values are passed through as text and validated by the store.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// City name.
    pub city: Option<String>,

    /// Temperature, e.g. 23 or -4.5.
    #[arg(long, short, allow_hyphen_values = true)]
    pub temp: Option<String>,

    /// Country code; defaults to "XX".
    #[arg(long)]
    pub country: Option<String>,

    /// °C or °F (aliases: c, f, celsius, fahrenheit).
    #[arg(long, short)]
    pub unit: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub feels_like: Option<String>,

    /// Free-text condition, e.g. "Heavy Rain"; defaults to "Clear".
    #[arg(long, short)]
    pub condition: Option<String>,

    /// Relative humidity in percent.
    #[arg(long)]
    pub humidity: Option<String>,

    #[arg(long)]
    pub wind_speed: Option<String>,

    /// km/h, mph or m/s.
    #[arg(long)]
    pub wind_unit: Option<String>,
}

impl From<AddArgs> for CardInput {
    fn from(args: AddArgs) -> Self {
        CardInput {
            city: args.city,
            country: args.country,
            unit: args.unit,
            temperature: args.temp,
            feels_like: args.feels_like,
            condition: args.condition,
            humidity: args.humidity,
            wind_speed: args.wind_speed,
            wind_unit: args.wind_unit,
        }
    }
}

const MEMORY_NOTICE: &str =
    "Memory storage keeps cards only while this command runs; they are gone once it exits.";

impl Cli {
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let memory = uses_memory_storage(self.memory, &config);

        match self.command {
            Command::Add(args) => {
                warn_if_memory(memory);
                add(&mut open_store(self.memory, &config)?, args.into()).show();
            }
            Command::Remove { id } => {
                warn_if_memory(memory);
                remove(&mut open_store(self.memory, &config)?, id).show();
            }
            Command::Clear { yes } => {
                warn_if_memory(memory);
                clear(&mut open_store(self.memory, &config)?, yes)?.show();
            }
            Command::List => {
                let store = open_store(self.memory, &config)?;
                println!("{}", render::card_list(store.cards(), Utc::now()));
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

/// True when cards will not outlive the process.
fn uses_memory_storage(flag: bool, config: &Config) -> bool {
    flag || matches!(config.storage_kind(), Ok(StorageKind::Memory))
}

fn warn_if_memory(memory: bool) {
    if memory {
        Notification::warning(MEMORY_NOTICE).show();
    }
}

fn open_store(memory: bool, config: &Config) -> anyhow::Result<CardStore> {
    let storage: Box<dyn Storage> = if memory {
        Box::new(MemoryStorage::new())
    } else {
        storage_from_config(config)?
    };
    debug!(memory, key = %config.storage.key, "opening card store");

    Ok(CardStore::open(storage, config.storage.key.clone()))
}

fn add(store: &mut CardStore, input: CardInput) -> Notification {
    match store.add(&input) {
        Ok(card) => Notification::success(format!("{} added!", card.city)),
        Err(e) => Notification::error(e),
    }
}

fn remove(store: &mut CardStore, id: i64) -> Notification {
    match store.remove(id) {
        Ok(card) => Notification::success(format!("{} removed", card.city)),
        Err(e) => Notification::error(e),
    }
}

fn clear(store: &mut CardStore, yes: bool) -> anyhow::Result<Notification> {
    let count = store.len();

    if count > 0 && !yes {
        let confirmed = Confirm::new(&format!("Remove all {count} cards?"))
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;

        if !confirmed {
            return Ok(Notification::error("Nothing removed"));
        }
    }

    let removed = store.clear();
    Ok(Notification::success(format!("Cleared {removed} cards")))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.storage_kind().unwrap_or(StorageKind::File);
    let start = StorageKind::all().iter().position(|k| *k == current).unwrap_or(0);

    let kind = Select::new("Storage backend:", StorageKind::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read storage backend")?;
    config.set_storage_kind(kind);

    if kind == StorageKind::Memory {
        Notification::warning(MEMORY_NOTICE).show();
    }

    if kind == StorageKind::File {
        let default_dir = config.data_dir()?.display().to_string();
        let dir = Text::new("Data directory:")
            .with_default(&default_dir)
            .prompt()
            .context("Failed to read data directory")?;

        if dir != default_dir {
            config.storage.data_dir = Some(dir.into());
        }
    }

    let key = Text::new("Storage key:")
        .with_default(&config.storage.key)
        .prompt()
        .context("Failed to read storage key")?;
    config.storage.key = key;

    config.save()?;
    Notification::success(format!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    ))
    .show();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> (MemoryStorage, CardStore) {
        let storage = MemoryStorage::new();
        let store = CardStore::open(Box::new(storage.clone()), "weatherCards");
        (storage, store)
    }

    #[test]
    fn memory_storage_is_detected_from_flag_or_config() {
        let mut cfg = Config::default();
        assert!(!uses_memory_storage(false, &cfg));
        assert!(uses_memory_storage(true, &cfg));

        cfg.set_storage_kind(StorageKind::Memory);
        assert!(uses_memory_storage(false, &cfg));
    }

    #[test]
    fn add_args_parse_into_card_input() {
        let cli = Cli::try_parse_from([
            "weather-cards", "add", "Reykjavik", "--temp", "-3", "--unit", "c", "--humidity", "90",
        ])
        .unwrap();

        let Command::Add(args) = cli.command else { panic!("expected add") };
        let input = CardInput::from(args);

        assert_eq!(input.city.as_deref(), Some("Reykjavik"));
        assert_eq!(input.temperature.as_deref(), Some("-3"));
        assert_eq!(input.unit.as_deref(), Some("c"));
        assert_eq!(input.humidity.as_deref(), Some("90"));
        assert_eq!(input.country, None);
    }

    #[test]
    fn add_reports_success_and_validation_errors() {
        let (_, mut store) = memory_store();

        let ok = add(&mut store, CardInput::new("Tokyo", "23"));
        assert_eq!(ok, Notification::success("Tokyo added!"));

        let err = add(&mut store, CardInput { city: Some("Tokyo".into()), ..CardInput::default() });
        assert_eq!(err, Notification::error("Temperature is required"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_city_or_missing_id() {
        let (_, mut store) = memory_store();
        let card = store.add(&CardInput::new("Lima", "19")).unwrap();

        assert_eq!(remove(&mut store, card.id), Notification::success("Lima removed"));
        assert_eq!(
            remove(&mut store, card.id),
            Notification::error(format!("No card with id {}", card.id))
        );
    }

    #[test]
    fn clear_with_yes_skips_prompt() {
        let (storage, mut store) = memory_store();
        store.add(&CardInput::new("Lima", "19")).unwrap();
        store.add(&CardInput::new("Quito", "14")).unwrap();

        let note = clear(&mut store, true).unwrap();

        assert_eq!(note, Notification::success("Cleared 2 cards"));
        assert!(store.is_empty());
        assert_eq!(storage.write_count(), 3);
    }

    #[test]
    fn clear_on_empty_store_does_not_prompt() {
        let (_, mut store) = memory_store();

        let note = clear(&mut store, false).unwrap();
        assert_eq!(note, Notification::success("Cleared 0 cards"));
    }
}
