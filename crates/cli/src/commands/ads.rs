//! Carousel advertisement commands.

use std::io::Write;

use clap::{Args, Subcommand};

use achei::{
    advertisements::{Advertisement, AdvertisementUuid, carousel},
    stores::{AccountUuid, StoreUuid},
};
use achei_app::admin::{AdvertisementDesk, AdvertisementDraft};

use crate::{commands::app_context, config::CliConfig, errors::CliError, tables};

#[derive(Debug, Args)]
pub(crate) struct AdsCommand {
    #[command(subcommand)]
    command: AdsSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdsSubcommand {
    /// Show the carousel, or every banner for an administrator
    List {
        /// Administrator account; includes hidden banners
        #[arg(long)]
        account: Option<AccountUuid>,
    },

    /// Add a banner
    Create {
        /// Administrator account
        #[arg(long)]
        account: AccountUuid,

        #[command(flatten)]
        form: AdvertisementForm,
    },

    /// Show a hidden banner or hide a shown one
    Toggle {
        /// Administrator account
        #[arg(long)]
        account: AccountUuid,

        /// Advertisement id
        advertisement: AdvertisementUuid,
    },

    /// Delete a banner
    Delete {
        /// Administrator account
        #[arg(long)]
        account: AccountUuid,

        /// Advertisement id
        advertisement: AdvertisementUuid,
    },
}

#[derive(Debug, Args)]
struct AdvertisementForm {
    /// Headline
    #[arg(long)]
    title: String,

    /// Line under the headline
    #[arg(long)]
    subtitle: String,

    /// Button text
    #[arg(long)]
    cta: Option<String>,

    /// Banner style classes
    #[arg(long)]
    gradient: Option<String>,

    /// Background image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Position in the carousel, lowest first
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    order: i32,

    /// Create the banner hidden
    #[arg(long)]
    hidden: bool,

    /// Store being promoted
    #[arg(long)]
    store: Option<StoreUuid>,
}

impl From<&AdvertisementForm> for AdvertisementDraft {
    fn from(form: &AdvertisementForm) -> Self {
        Self {
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            cta_text: form.cta.clone(),
            gradient: form.gradient.clone(),
            image_url: form.image_url.clone(),
            is_active: !form.hidden,
            display_order: form.order,
            store_id: form.store,
        }
    }
}

pub(crate) async fn run(
    config: &CliConfig,
    command: &AdsCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;

    match &command.command {
        AdsSubcommand::List { account: None } => {
            let advertisements = context.advertisements.list_active().await?;

            write_list(&carousel(&advertisements), out)?;
        }
        AdsSubcommand::List {
            account: Some(account),
        } => {
            let desk = AdvertisementDesk::from_context(&context, *account).await?;
            let advertisements = desk.list().await?;

            write_list(&advertisements.iter().collect::<Vec<_>>(), out)?;
        }
        AdsSubcommand::Create { account, form } => {
            let desk = AdvertisementDesk::from_context(&context, *account).await?;
            let advertisement = desk.create(form.into()).await?;

            write_saved(&advertisement, out)?;
        }
        AdsSubcommand::Toggle {
            account,
            advertisement,
        } => {
            let desk = AdvertisementDesk::from_context(&context, *account).await?;
            let advertisement = desk.toggle(*advertisement).await?;

            write_saved(&advertisement, out)?;
        }
        AdsSubcommand::Delete {
            account,
            advertisement,
        } => {
            AdvertisementDesk::from_context(&context, *account)
                .await?
                .delete(*advertisement)
                .await?;

            writeln!(out, "Propaganda {advertisement} removida")?;
        }
    }

    Ok(())
}

fn write_list(advertisements: &[&Advertisement], out: &mut impl Write) -> Result<(), CliError> {
    if advertisements.is_empty() {
        writeln!(out, "Nenhuma propaganda cadastrada")?;
    } else {
        writeln!(out, "{}", tables::advertisements(advertisements))?;
    }

    Ok(())
}

fn write_saved(advertisement: &Advertisement, out: &mut impl Write) -> Result<(), CliError> {
    let state = if advertisement.is_active {
        "ativa"
    } else {
        "oculta"
    };

    writeln!(
        out,
        "{} ({}) - {state}",
        advertisement.title, advertisement.id
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use crate::commands::Command;

    use super::*;

    #[test]
    fn create_form_maps_to_a_draft() -> TestResult {
        let config = CliConfig::try_parse_from([
            "achei",
            "ads",
            "create",
            "--account",
            "0190a6f4-5b1e-7c3a-9d2e-3f4a5b6c7d8e",
            "--title",
            "Parcele em até 12x",
            "--subtitle",
            "Sem juros no cartão",
            "--order",
            "-1",
            "--hidden",
        ])?;

        let Command::Ads(AdsCommand {
            command: AdsSubcommand::Create { form, .. },
        }) = config.command
        else {
            return Err("expected ads create".into());
        };

        let draft = AdvertisementDraft::from(&form);

        assert_eq!(draft.title, "Parcele em até 12x");
        assert_eq!(draft.display_order, -1);
        assert!(!draft.is_active);
        assert_eq!(draft.cta_text, None);

        Ok(())
    }

    #[test]
    fn toggle_requires_an_account() {
        let result = CliConfig::try_parse_from([
            "achei",
            "ads",
            "toggle",
            "0190a6f4-5b1e-7c3a-9d2e-3f4a5b6c7d8e",
        ]);

        assert!(result.is_err());
    }
}
