//! Products command: browse the catalog.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_api::{HttpProductApi, ProductApi};
use shop_cart::catalog::{Product, ProductSort};

use super::ProductsArgs;
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductsView<'a> {
    page: u32,
    total_pages: u32,
    sort: &'static str,
    products: &'a [Product],
}

/// List one page of products.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let api = HttpProductApi::new(ctx.config.api_config())
        .context("Failed to create product API client")?;
    let sort = ProductSort::from(args.sort);

    let spinner = ctx.output.spinner("Loading products...");
    let result = api.list_products(args.page).await;
    spinner.finish_and_clear();

    let mut listing = result.with_context(|| {
        format!("Failed to load products from {}", api.config().base_url)
    })?;
    sort.apply(&mut listing.products);

    if ctx.output.is_json() {
        ctx.output.json(&ProductsView {
            page: args.page,
            total_pages: listing.total_pages,
            sort: sort.as_str(),
            products: &listing.products,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products (page {} of {})",
        args.page, listing.total_pages
    ));
    ctx.output.product_table(&listing.products);

    if args.page < listing.total_pages {
        ctx.output
            .info(&format!("More: shop products --page {}", args.page + 1));
    }
    Ok(())
}
