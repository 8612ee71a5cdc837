use agrilink_core::listing::{PagedCollection, PagedQuery};
use agrilink_core::models::{Notification, ReadFilter, Role};
use chrono::Utc;

use crate::cli::{NotificationCommands, ReadState};
use crate::commands::common::{
    format_notification_lines, format_page_footer, notification_to_list_item, notifications_route,
    print_json, print_lines, AppContext, NotificationListItem,
};
use crate::error::CliError;

impl From<ReadState> for ReadFilter {
    fn from(state: ReadState) -> Self {
        match state {
            ReadState::All => Self::All,
            ReadState::Unread => Self::Unread,
            ReadState::Read => Self::Read,
        }
    }
}

pub async fn run_notifications(
    command: NotificationCommands,
    ctx: &mut AppContext,
) -> Result<(), CliError> {
    let role = ctx.role()?;
    ctx.require_route(notifications_route(role))?;

    match command {
        NotificationCommands::List {
            page,
            limit,
            state,
            json,
        } => {
            let collection = fetch_notifications(ctx, role, page, limit, state.into()).await?;
            let now = Utc::now();
            if json {
                let items = collection
                    .items()
                    .iter()
                    .map(|notification| notification_to_list_item(notification, now))
                    .collect::<Vec<NotificationListItem>>();
                return print_json(&items);
            }
            print_lines(
                &format_notification_lines(collection.items(), now),
                "No notifications",
            );
            println!("{}", format_page_footer(&collection.page_info()));
            Ok(())
        }
        NotificationCommands::Read { id } => {
            let result = match role {
                Role::Farmer => ctx.api.farmer().mark_notification_read(&id).await,
                Role::Employee => ctx.api.employee().mark_notification_read(&id).await,
                Role::Admin => ctx.api.admin().mark_notification_read(&id).await,
            };
            ctx.checked(result)?;
            println!("Marked {id} as read");
            Ok(())
        }
        NotificationCommands::ReadAll => {
            let result = match role {
                Role::Farmer => ctx.api.farmer().mark_all_read().await,
                Role::Employee => ctx.api.employee().mark_all_read().await,
                Role::Admin => {
                    return Err(CliError::InvalidInput(
                        "Admins mark notifications read one at a time".to_string(),
                    ))
                }
            };
            ctx.checked(result)?;
            println!("All notifications marked as read");
            Ok(())
        }
    }
}

async fn fetch_notifications(
    ctx: &mut AppContext,
    role: Role,
    page: u32,
    limit: u32,
    filter: ReadFilter,
) -> Result<PagedCollection<Notification, ReadFilter>, CliError> {
    let mut query = PagedQuery::new(limit, filter);
    query.set_page(page);
    let mut collection = PagedCollection::new(query);

    let ticket = collection.begin_fetch();
    let (page, limit, filter) = (
        ticket.query.page(),
        ticket.query.limit(),
        *ticket.query.filters(),
    );
    let result = match role {
        Role::Farmer => ctx.api.farmer().notifications(page, limit, filter).await,
        Role::Employee => ctx.api.employee().notifications(page, limit, filter).await,
        Role::Admin => ctx.api.admin().notifications(page, limit, filter).await,
    };
    let page = ctx.checked(result)?;
    collection.apply(&ticket, Ok::<_, CliError>(page));
    Ok(collection)
}
