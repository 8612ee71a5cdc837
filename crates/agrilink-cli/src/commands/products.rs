use agrilink_core::models::ProductDraft;
use agrilink_core::navigation::Route;

use crate::cli::{ProductCommands, ProductFields};
use crate::commands::common::{format_product_lines, print_json, print_lines, AppContext};
use crate::error::CliError;

impl From<ProductFields> for ProductDraft {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            category: fields.category,
            price: fields.price,
            manufacturer: fields.manufacturer,
        }
    }
}

pub async fn run_products(command: ProductCommands, ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.require_route(Route::AdminProducts)?;

    match command {
        ProductCommands::List { json } => {
            let result = ctx.api.admin().products().await;
            let products = ctx.checked(result)?;
            if json {
                return print_json(&products);
            }
            print_lines(&format_product_lines(&products), "No products");
            Ok(())
        }
        ProductCommands::Add { fields } => {
            let draft = ProductDraft::from(fields);
            let result = ctx.api.admin().create_product(&draft).await;
            let product = ctx.checked(result)?;
            println!("{}", product.id);
            Ok(())
        }
        ProductCommands::Update { id, fields } => {
            let draft = ProductDraft::from(fields);
            let result = ctx.api.admin().update_product(&id, &draft).await;
            let product = ctx.checked(result)?;
            println!("Updated {} ({})", product.id, product.name);
            Ok(())
        }
        ProductCommands::Delete { id } => {
            let result = ctx.api.admin().delete_product(&id).await;
            ctx.checked(result)?;
            println!("Deleted {id}");
            Ok(())
        }
    }
}
