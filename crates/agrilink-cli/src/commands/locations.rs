use agrilink_core::api::{LocationFilters, NearbyQuery};
use agrilink_core::listing::PagedQuery;
use agrilink_core::models::{DeviceInfo, EmployeeLocation, LocationUpdate};
use agrilink_core::navigation::Route;
use agrilink_core::presence::maps_link;
use agrilink_core::util::normalize_text_option;
use chrono::Utc;

use crate::cli::LocationCommands;
use crate::commands::common::{
    format_location_lines, format_page_footer, location_to_list_item, print_json, print_lines,
    AppContext, LocationListItem,
};
use crate::error::CliError;

const CLIENT_NAME: &str = "agrilink-cli";

pub async fn run_locations(command: LocationCommands, ctx: &mut AppContext) -> Result<(), CliError> {
    match command {
        LocationCommands::List {
            page,
            limit,
            status,
            search,
            json,
        } => {
            ctx.require_route(Route::AdminEmployeeLocations)?;
            let mut query = PagedQuery::new(
                limit,
                LocationFilters {
                    status,
                    search: normalize_text_option(search),
                },
            );
            query.set_page(page);

            let result = ctx
                .api
                .admin()
                .employee_locations(query.page(), query.limit(), query.filters())
                .await;
            let locations = ctx.checked(result)?;

            if json {
                return print_location_json(&locations.items);
            }
            print_lines(
                &format_location_lines(&locations.items, Utc::now()),
                "No employee locations",
            );
            println!("{}", format_page_footer(&locations.pagination));
            Ok(())
        }
        LocationCommands::Nearby {
            lat,
            lng,
            radius,
            json,
        } => {
            ctx.require_route(Route::AdminEmployeeLocations)?;
            let nearby = NearbyQuery {
                radius_km: radius,
                ..NearbyQuery::new(lat, lng)
            };
            let result = ctx.api.admin().nearby(&nearby).await;
            let locations = ctx.checked(result)?;

            if json {
                return print_location_json(&locations);
            }
            print_lines(
                &format_location_lines(&locations, Utc::now()),
                &format!("No employees within {radius} km"),
            );
            Ok(())
        }
        LocationCommands::Update {
            lat,
            lng,
            accuracy,
            address,
            status,
        } => {
            ctx.require_route(Route::EmployeeLocation)?;
            let update = LocationUpdate {
                latitude: lat,
                longitude: lng,
                accuracy,
                address: normalize_text_option(address),
                status,
                device_info: Some(DeviceInfo::current(CLIENT_NAME)),
            };
            let result = ctx.api.employee().update_location(&update).await;
            let location = ctx.checked(result)?;
            println!(
                "Location updated: {} ({})",
                maps_link(location.latitude, location.longitude),
                location.status
            );
            Ok(())
        }
    }
}

fn print_location_json(locations: &[EmployeeLocation]) -> Result<(), CliError> {
    let now = Utc::now();
    let items = locations
        .iter()
        .map(|location| location_to_list_item(location, now))
        .collect::<Vec<LocationListItem>>();
    print_json(&items)
}
