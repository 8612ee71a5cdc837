//! Product catalog management for admins

use agrilink_core::models::{Product, ProductDraft};
use agrilink_core::Route;
use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant, Field};
use crate::state::AppState;

/// Text form state; the price stays a string until submit.
#[derive(Debug, Clone, Default, PartialEq)]
struct ProductForm {
    editing: Option<String>,
    name: String,
    description: String,
    category: String,
    price: String,
    manufacturer: String,
}

impl ProductForm {
    fn edit(product: &Product) -> Self {
        let draft = ProductDraft::from(product);
        Self {
            editing: Some(product.id.clone()),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price.to_string(),
            manufacturer: draft.manufacturer,
        }
    }

    fn to_draft(&self) -> Result<ProductDraft, String> {
        let price = if self.price.trim().is_empty() {
            0.0
        } else {
            self.price
                .trim()
                .parse::<f64>()
                .map_err(|_| "Price must be a number".to_string())?
        };
        let draft = ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            price,
            manufacturer: self.manufacturer.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[component]
pub fn Products() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut products = use_signal(Vec::<Product>::new);
    let mut error = use_signal(|| None::<String>);
    let mut reload = use_signal(|| 0_u64);
    let mut form = use_signal(|| None::<ProductForm>);

    use_effect(move || {
        reload();
        let Some(api) = state.api() else {
            return;
        };
        if let Some(cached) = state
            .preloader()
            .cached_as::<Vec<Product>>(Route::AdminProducts)
        {
            products.set(cached);
        }
        spawn(async move {
            match api.admin().products().await {
                Ok(loaded) => {
                    state.preloader().store(
                        Route::AdminProducts,
                        serde_json::to_value(&loaded).unwrap_or_default(),
                    );
                    products.set(loaded);
                    error.set(None);
                }
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
        });
    });

    let save = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        let Some(current) = form() else {
            return;
        };
        let draft = match current.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        spawn(async move {
            let result = match current.editing.as_deref() {
                Some(id) => api.admin().update_product(id, &draft).await,
                None => api.admin().create_product(&draft).await,
            };
            match result {
                Ok(product) => {
                    tracing::info!("Saved product {}", product.id);
                    form.set(None);
                    error.set(None);
                    *reload.write() += 1;
                }
                Err(save_error) => error.set(Some(state.describe_error(&save_error))),
            }
        });
    };

    let remove = move |id: String| {
        let Some(api) = state.api() else {
            return;
        };
        spawn(async move {
            match api.admin().delete_product(&id).await {
                Ok(()) => *reload.write() += 1,
                Err(delete_error) => error.set(Some(state.describe_error(&delete_error))),
            }
        });
    };

    let mut edit_field = move |update: fn(&mut ProductForm, String), value: String| {
        if let Some(current) = form.write().as_mut() {
            update(current, value);
        }
    };

    let list = products();

    rsx! {
        div {
            if let Some(message) = error() {
                Alert { message }
            }

            if let Some(current) = form() {
                div {
                    style: "max-width: 520px; padding: 16px; margin-bottom: 20px; border: 1px solid {colors.border}; border-radius: 8px;",
                    h3 {
                        style: "margin: 0 0 12px 0; font-size: 15px;",
                        if current.editing.is_some() { "Edit product" } else { "New product" }
                    }
                    Field { label: "Name", value: current.name.clone(), oninput: move |value| edit_field(|form, value| form.name = value, value) }
                    Field {
                        label: "Description",
                        multiline: true,
                        value: current.description.clone(),
                        oninput: move |value| edit_field(|form, value| form.description = value, value),
                    }
                    Field { label: "Category", value: current.category.clone(), oninput: move |value| edit_field(|form, value| form.category = value, value) }
                    Field { label: "Price", value: current.price.clone(), oninput: move |value| edit_field(|form, value| form.price = value, value) }
                    Field {
                        label: "Manufacturer",
                        value: current.manufacturer.clone(),
                        oninput: move |value| edit_field(|form, value| form.manufacturer = value, value),
                    }
                    div {
                        style: "display: flex; gap: 8px;",
                        Button { onclick: save, "Save" }
                        Button { variant: ButtonVariant::Secondary, onclick: move |_| form.set(None), "Cancel" }
                    }
                }
            } else {
                div {
                    style: "margin-bottom: 14px;",
                    Button { onclick: move |_| form.set(Some(ProductForm::default())), "Add product" }
                }
            }

            if list.is_empty() {
                div { style: "padding: 24px; text-align: center; color: {colors.text_muted};", "No products" }
            } else {
                table {
                    style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                    thead {
                        tr {
                            style: "text-align: left; color: {colors.text_secondary};",
                            th { "Name" }
                            th { "Category" }
                            th { "Manufacturer" }
                            th { "Price" }
                            th {}
                        }
                    }
                    tbody {
                        for product in list {
                            {
                                let price = format!("{:.2}", product.price);
                                let delete_id = product.id.clone();
                                let editable = ProductForm::edit(&product);
                                rsx! {
                                    tr {
                                        key: "{product.id}",
                                        style: "border-bottom: 1px solid {colors.border};",
                                        td { "{product.name}" }
                                        td { "{product.category}" }
                                        td { "{product.manufacturer}" }
                                        td { "{price}" }
                                        td {
                                            style: "display: flex; gap: 6px; padding: 6px 0;",
                                            Button {
                                                variant: ButtonVariant::Secondary,
                                                onclick: move |_| form.set(Some(editable.clone())),
                                                "Edit"
                                            }
                                            Button {
                                                variant: ButtonVariant::Destructive,
                                                onclick: move |_| remove(delete_id.clone()),
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_price_means_free() {
        let form = ProductForm {
            name: " Neem oil ".to_string(),
            ..ProductForm::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.name, "Neem oil");
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn bad_price_and_missing_name_are_rejected() {
        let form = ProductForm {
            name: "Neem oil".to_string(),
            price: "cheap".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.to_draft().unwrap_err(), "Price must be a number");
        assert!(ProductForm::default().to_draft().is_err());
    }

    #[test]
    fn editing_prefills_from_product() {
        let product = Product {
            id: "p1".to_string(),
            name: "Copper fungicide".to_string(),
            description: String::new(),
            category: "fungicide".to_string(),
            price: 12.5,
            manufacturer: "Agro".to_string(),
            created_at: None,
        };
        let form = ProductForm::edit(&product);
        assert_eq!(form.editing.as_deref(), Some("p1"));
        assert_eq!(form.price, "12.5");
    }
}
