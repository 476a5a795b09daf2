//! storefront-admin console entry point.
//!
//! ```text
//! storefront-admin <customers|order-statuses|payment-methods> [page]
//! storefront-admin <customers|order-statuses|payment-methods> delete <id> [--yes]
//! ```
//!
//! Loads one page of the chosen list (or deletes an entity and reloads)
//! and logs the resulting state and every notification.

use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use storefront_admin::config::ConsoleConfig;
use storefront_admin::controller::{ListController, LoadOutcome};
use storefront_admin::domain::{EntityId, ListEntity, NotificationBus, NotificationLevel};
use storefront_admin::ports::{
    Authorization, ConfirmOutcome, ConfirmationSurface, FixedConfirmation, RoleAuthorization,
    StaticCredentials, Transport,
};
use storefront_admin::service::{
    CollectionService, CustomerService, OrderStatusService, PaymentMethodService,
};
use storefront_admin::transport::HttpTransport;

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Customers,
    OrderStatuses,
    PaymentMethods,
}

impl std::str::FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customers" => Ok(Self::Customers),
            "order-statuses" => Ok(Self::OrderStatuses),
            "payment-methods" => Ok(Self::PaymentMethods),
            other => bail!("unknown list `{other}`"),
        }
    }
}

#[derive(Debug)]
enum Command {
    Show { page: u32 },
    Delete { id: EntityId, confirmed: bool },
}

#[derive(Debug)]
struct Wiring {
    authorization: Arc<dyn Authorization>,
    notifications: NotificationBus,
    page_size: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(list) = args.next() else {
        bail!(
            "usage: storefront-admin <customers|order-statuses|payment-methods> \
             [page | delete <id> [--yes]]"
        );
    };
    let kind: ListKind = list.parse()?;
    let command = parse_command(args.collect())?;

    // Load configuration
    let config = ConsoleConfig::from_env()?;
    tracing::info!(
        api = %config.api_url,
        role = %config.role,
        policy = %config.read_error_policy,
        "starting storefront-admin"
    );

    let credentials = Arc::new(StaticCredentials::new(config.api_token.clone()));
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(
        config.api_url.clone(),
        credentials,
    ));
    let authorization: Arc<dyn Authorization> = Arc::new(RoleAuthorization::new(&config.role));
    let notifications = NotificationBus::new(config.notification_capacity);
    let toasts = spawn_toast_logger(&notifications);

    let wiring = Wiring {
        authorization: Arc::clone(&authorization),
        notifications,
        page_size: config.page_size,
    };

    let result = match kind {
        ListKind::Customers => {
            let service = CustomerService::new(transport, authorization);
            run(service, wiring, command).await
        }
        ListKind::OrderStatuses => {
            let service =
                OrderStatusService::new(transport, authorization, config.read_error_policy);
            run(service, wiring, command).await
        }
        ListKind::PaymentMethods => {
            let service =
                PaymentMethodService::new(transport, authorization, config.read_error_policy);
            run(service, wiring, command).await
        }
    };

    // The controller owned the last sender; the logger drains and exits.
    toasts.await.context("notification logger failed")?;
    result
}

fn parse_command(args: Vec<String>) -> anyhow::Result<Command> {
    match args.as_slice() {
        [] => Ok(Command::Show { page: 1 }),
        [page] => Ok(Command::Show {
            page: page.parse().with_context(|| format!("invalid page `{page}`"))?,
        }),
        [verb, id, rest @ ..] if verb == "delete" => Ok(Command::Delete {
            id: EntityId::new(id.as_str()),
            confirmed: rest.iter().any(|flag| flag == "--yes"),
        }),
        _ => bail!("unexpected arguments: {}", args.join(" ")),
    }
}

fn spawn_toast_logger(bus: &NotificationBus) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            let toast = match rx.recv().await {
                Ok(toast) => toast,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification logger lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            match toast.level {
                NotificationLevel::Success => tracing::info!(text = %toast.message, "success"),
                NotificationLevel::Warning => tracing::warn!(text = %toast.message, "warning"),
                NotificationLevel::Error => tracing::error!(text = %toast.message, "error"),
            }
        }
    })
}

async fn run<S: CollectionService>(
    service: S,
    wiring: Wiring,
    command: Command,
) -> anyhow::Result<()> {
    let Wiring {
        authorization,
        notifications,
        page_size,
    } = wiring;

    let confirmation: Arc<dyn ConfirmationSurface> = match &command {
        Command::Delete { confirmed: true, .. } => Arc::new(FixedConfirmation::accept()),
        _ => Arc::new(FixedConfirmation::dismiss()),
    };
    let controller = ListController::new(
        Arc::new(service),
        authorization,
        Arc::new(notifications),
        confirmation,
        page_size,
    );

    let outcome = match command {
        Command::Show { page } if page > 1 => controller.load_page(page).await,
        Command::Show { .. } => controller.reload().await,
        Command::Delete { id, .. } => {
            if controller.reload().await == LoadOutcome::Failed {
                bail!("could not load the list");
            }
            let snapshot = controller.snapshot().await;
            let Some(entity) = snapshot.items.iter().find(|item| item.id() == &id) else {
                bail!("{} `{id}` is not on the first page", S::Entity::LABEL);
            };
            match controller.open_delete_confirmation(entity).await {
                Ok(ConfirmOutcome::Confirmed) => LoadOutcome::Loaded,
                Ok(ConfirmOutcome::Dismissed) => {
                    tracing::info!(%id, "delete not confirmed, pass --yes to proceed");
                    LoadOutcome::Skipped
                }
                Err(err) => {
                    controller.dispose().await;
                    return Err(err.into());
                }
            }
        }
    };

    let state = controller.snapshot().await;
    tracing::info!(
        ?outcome,
        page = state.current_page,
        total_pages = controller.total_pages().await,
        total = state.total_items,
        "{} loaded",
        S::Entity::PLURAL_LABEL
    );
    for item in &state.items {
        tracing::info!(id = %item.id(), name = item.display_name(), "item");
    }
    controller.dispose().await;

    if let Some(error) = state.error {
        bail!(error);
    }
    Ok(())
}
