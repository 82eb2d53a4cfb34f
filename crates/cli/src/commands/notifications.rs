//! Store notification commands.

use std::{io::Write, sync::Arc};

use clap::{Args, Subcommand};
use jiff::Timestamp;
use tokio::signal;
use tracing::info;

use achei::{
    notifications::{INBOX_LIMIT, NotificationInbox, NotificationUuid, format_relative},
    stores::StoreUuid,
};
use achei_app::domain::notifications::NotificationFeed;

use crate::{commands::app_context, config::CliConfig, errors::CliError, tables};

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    /// Show the most recent notifications
    List {
        /// Store id
        store: StoreUuid,
    },

    /// Print notifications as they arrive until interrupted
    Watch {
        /// Store id
        store: StoreUuid,
    },

    /// Mark notifications as read
    Read {
        /// Store id
        store: StoreUuid,

        /// Notification ids; every unread one when omitted
        ids: Vec<NotificationUuid>,
    },
}

pub(crate) async fn run(
    config: &CliConfig,
    command: &NotificationsCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let context = app_context(&config.backend)?;

    match &command.command {
        NotificationsSubcommand::List { store } => {
            let mut inbox = NotificationInbox::new();
            inbox.replace(context.notifications.list_recent(*store, INBOX_LIMIT).await?);

            if inbox.is_empty() {
                writeln!(out, "Nenhuma notificação")?;

                return Ok(());
            }

            writeln!(out, "{}", tables::notifications(inbox.notifications(), Timestamp::now()))?;

            if let Some(badge) = inbox.unread_badge() {
                writeln!(out, "{badge} não lida(s)")?;
            }
        }
        NotificationsSubcommand::Watch { store } => {
            let feed = NotificationFeed::new(
                Arc::clone(&context.notifications),
                config.poll_interval(),
            );

            let mut subscription = feed.subscribe(*store, Timestamp::now());

            writeln!(out, "Aguardando notificações (Ctrl+C para sair)")?;
            out.flush()?;

            loop {
                tokio::select! {
                    notification = subscription.recv() => {
                        let Some(notification) = notification else {
                            break;
                        };

                        writeln!(
                            out,
                            "[{}] {}",
                            format_relative(notification.created_at, Timestamp::now()),
                            notification.message
                        )?;
                        out.flush()?;
                    }
                    interrupted = signal::ctrl_c() => {
                        interrupted?;
                        info!(store_id = %store, "stopped watching notifications");
                        break;
                    }
                }
            }

            subscription.unsubscribe();
        }
        NotificationsSubcommand::Read { store, ids } => {
            let ids = if ids.is_empty() {
                let mut inbox = NotificationInbox::new();
                inbox.replace(context.notifications.list_recent(*store, INBOX_LIMIT).await?);
                inbox.mark_all_read()
            } else {
                ids.clone()
            };

            let count = context.notifications.mark_read(ids).await?;

            writeln!(out, "{count} notificação(ões) marcada(s) como lida(s)")?;
        }
    }

    Ok(())
}
