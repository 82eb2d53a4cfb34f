//! Store profile commands.

use std::io::Write;

use clap::{Args, Subcommand};

use achei::{
    hours::{OperatingDay, OperatingDays},
    stores::{AccountUuid, Store, StoreUuid},
};
use achei_app::admin::{AdminConsole, StoreDraft};

use crate::{commands::app_context, config::CliConfig, errors::CliError};

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    /// Show a store profile
    Show {
        /// Store id
        store: StoreUuid,
    },

    /// Register the store of an account
    Create {
        /// Owner account id
        #[arg(long)]
        owner: AccountUuid,

        #[command(flatten)]
        form: StoreForm,
    },

    /// Replace a store profile
    Update {
        /// Store id
        store: StoreUuid,

        #[command(flatten)]
        form: StoreForm,
    },
}

#[derive(Debug, Args)]
struct StoreForm {
    /// Store name
    #[arg(long)]
    name: String,

    /// WhatsApp contact
    #[arg(long)]
    whatsapp: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// State
    #[arg(long)]
    state: Option<String>,

    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Opening time, HH:MM
    #[arg(long)]
    opening_time: Option<String>,

    /// Closing time, HH:MM
    #[arg(long)]
    closing_time: Option<String>,

    /// Operating days, e.g. monday,tuesday (defaults to Monday to Friday)
    #[arg(long, value_delimiter = ',', value_parser = parse_day)]
    days: Vec<OperatingDay>,
}

impl From<&StoreForm> for StoreDraft {
    fn from(form: &StoreForm) -> Self {
        Self {
            name: form.name.clone(),
            whatsapp: form.whatsapp.clone(),
            address: form.address.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            latitude: form.latitude,
            longitude: form.longitude,
            opening_time: form.opening_time.clone(),
            closing_time: form.closing_time.clone(),
            operating_days: Some(OperatingDays::new(form.days.iter().copied())),
        }
    }
}

fn parse_day(text: &str) -> Result<OperatingDay, String> {
    OperatingDay::from_token(text).ok_or_else(|| format!("unknown day {text:?}"))
}

pub(crate) async fn run(
    config: &CliConfig,
    command: &StoreCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;

    let store = match &command.command {
        StoreSubcommand::Show { store } => context.stores.get_store(*store).await?,
        StoreSubcommand::Create { owner, form } => {
            AdminConsole::from_context(&context)
                .create_store(*owner, form.into())
                .await?
        }
        StoreSubcommand::Update { store, form } => {
            AdminConsole::from_context(&context)
                .update_store(*store, form.into())
                .await?
        }
    };

    write_store(&store, out)
}

fn write_store(store: &Store, out: &mut impl Write) -> Result<(), CliError> {
    let hours = store.hours();

    writeln!(out, "{} ({})", store.name, store.id)?;
    writeln!(out, "Status: {}", hours.status_now())?;
    writeln!(out, "WhatsApp: {}", store.whatsapp)?;
    writeln!(out, "Endereço: {}", store.address)?;

    if let Some(city) = &store.city {
        writeln!(out, "Cidade: {city}")?;
    }

    if let Some(label) = hours.hours_label() {
        writeln!(out, "Horário: {label}")?;
    }

    if let Some(label) = hours.days_label() {
        writeln!(out, "Dias: {label}")?;
    }

    Ok(())
}
