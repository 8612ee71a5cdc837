use agrilink_core::navigation::{menu_for, NavItem};
use serde::Serialize;

use crate::commands::common::{print_json, AppContext};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

impl From<&NavItem> for MenuItem {
    fn from(item: &NavItem) -> Self {
        Self {
            label: item.label,
            path: item.route.path(),
        }
    }
}

pub fn run_menu(ctx: &AppContext, as_json: bool) -> Result<(), CliError> {
    let user = ctx.user()?;
    let items = menu_for(user.role)
        .iter()
        .map(MenuItem::from)
        .collect::<Vec<_>>();

    if as_json {
        return print_json(&items);
    }

    println!("{} ({})", user.display_name(), user.role.label());
    for item in &items {
        println!("  {:<20}  {}", item.label, item.path);
    }
    Ok(())
}
