//! Cart commands: show, add, remove, set, clear.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use shop_api::{HttpProductApi, ProductApi};
use shop_cache::KeyValueStore;
use shop_cart::cart::{CartLine, CartState, MAX_QUANTITY_PER_LINE};
use shop_cart::catalog::Product;
use shop_cart::store::CartStore;
use shop_cart::summary::CartSummary;
use shop_cart::{Money, ProductId};

use super::{AddArgs, ClearArgs, RemoveArgs, SetArgs};
use crate::context::Context;
use crate::output::line_label;

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    summary: CartSummary,
}

/// Print the cart and its totals.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    render(ctx, store.state())
}

/// Add a product in a size, filling name, price and image from the catalog.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if args.quantity == 0 {
        ctx.output.warn("Quantity is 0, nothing added");
        return Ok(());
    }
    if args.quantity > MAX_QUANTITY_PER_LINE {
        ctx.output.warn(&format!(
            "Quantity capped at {} per line",
            MAX_QUANTITY_PER_LINE
        ));
    }

    let product_id = ProductId::new(args.product_id.as_str());
    let product = if args.offline {
        None
    } else {
        Some(fetch_product(ctx, &product_id).await?)
    };

    let mut store = ctx.open_cart()?;
    let in_cart = store
        .state()
        .line(&product_id, &args.size)
        .map_or(0, |line| line.quantity);

    let line = build_line(&args, product.as_ref(), in_cart)?;
    if line.quantity < args.quantity.min(MAX_QUANTITY_PER_LINE) {
        ctx.output
            .warn(&format!("Quantity capped at {} by available stock", line.quantity));
    }

    let label = line_label(&line);
    let (added, total) = add_to_cart(&mut store, line);
    if added == 0 {
        ctx.output.warn(&format!(
            "{} already has the maximum of {} per line",
            label, MAX_QUANTITY_PER_LINE
        ));
    } else {
        ctx.output
            .success(&format!("Added {} x{} ({} in cart)", label, added, total));
    }
    render(ctx, store.state())
}

async fn fetch_product(ctx: &Context, id: &ProductId) -> Result<Product> {
    let api = HttpProductApi::new(ctx.config.api_config())
        .context("Failed to create product API client")?;

    let spinner = ctx.output.spinner("Looking up product...");
    let result = api.get_product(id).await;
    spinner.finish_and_clear();

    result.with_context(|| {
        format!("Failed to look up product {id}; use --offline with --price to add it anyway")
    })
}

/// Build the line to add.
///
/// With a catalog product the quantity is capped at the stock not already in
/// the cart. Flags override the catalog's price, name and image. Without a
/// product a price is required.
fn build_line(args: &AddArgs, product: Option<&Product>, in_cart: u32) -> Result<CartLine> {
    let price = args
        .price
        .as_deref()
        .map(|raw| {
            raw.parse::<Money>()
                .with_context(|| format!("Invalid price: {}", raw))
        })
        .transpose()?;

    let mut line = match product {
        Some(product) => {
            let available = product.in_stock.saturating_sub(in_cart);
            if product.is_in_stock() && product.offers_size(&args.size) && available == 0 {
                bail!(
                    "All {} in stock of {} are already in the cart",
                    product.in_stock,
                    product.id
                );
            }
            product.to_cart_line(&args.size, args.quantity.min(available))?
        }
        None => {
            let Some(price) = price else {
                bail!("A price is required when the product is not looked up");
            };
            CartLine::new(args.product_id.as_str(), args.size.as_str(), price, args.quantity)
        }
    };

    if let Some(price) = price {
        line.unit_price = price;
    }
    if let Some(name) = &args.name {
        line.name = name.clone();
    }
    if let Some(image) = &args.image {
        line.image = image.clone();
    }
    Ok(line)
}

/// Merge `line` into the cart, returning `(units actually added, units now on the line)`.
fn add_to_cart<S: KeyValueStore>(store: &mut CartStore<S>, line: CartLine) -> (u32, u32) {
    let key = line.key();
    let quantity_of = |store: &CartStore<S>| {
        store
            .state()
            .line(&key.product_id, &key.size)
            .map_or(0, |l| l.quantity)
    };

    let before = quantity_of(store);
    store.add_line(line);
    let after = quantity_of(store);
    (after.saturating_sub(before), after)
}

pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let before = store.state().line_count();
    store.remove_line(args.product_id.as_str(), &args.size);

    if store.state().line_count() < before {
        ctx.output
            .success(&format!("Removed {} ({})", args.product_id, args.size));
    } else {
        ctx.output.warn(&format!(
            "No line for {} in size {}",
            args.product_id, args.size
        ));
    }
    render(ctx, store.state())
}

pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let known = store
        .state()
        .line(&ProductId::new(args.product_id.as_str()), &args.size)
        .is_some();
    store.set_quantity(args.product_id.as_str(), &args.size, args.quantity);

    if !known {
        ctx.output.warn(&format!(
            "No line for {} in size {}",
            args.product_id, args.size
        ));
    } else if args.quantity <= 0 {
        ctx.output
            .success(&format!("Removed {} ({})", args.product_id, args.size));
    } else {
        ctx.output.success(&format!(
            "Set {} ({}) to {}",
            args.product_id, args.size, args.quantity
        ));
    }
    render(ctx, store.state())
}

pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    if store.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store.clear();
    ctx.output.success("Cart cleared");
    if ctx.output.is_json() {
        render(ctx, store.state())?;
    }
    Ok(())
}

/// Print lines and totals, or the JSON view in `--json` mode.
pub(crate) fn render(ctx: &Context, state: &CartState) -> Result<()> {
    let summary = CartSummary::from_state(state, ctx.config.tax_rate()?);

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: state.lines(),
            summary,
        });
        return Ok(());
    }

    ctx.output.cart_table(state);
    if !state.is_empty() {
        println!();
        ctx.output.summary(&summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_cache::MemoryStore;
    use shop_cart::error::CatalogError;
    use shop_cart::store::StoreOptions;

    fn args(quantity: u32) -> AddArgs {
        AddArgs {
            product_id: "shoe1".to_string(),
            size: "9".to_string(),
            quantity,
            price: None,
            name: None,
            image: None,
            offline: false,
        }
    }

    fn product(in_stock: u32) -> Product {
        Product {
            id: ProductId::new("shoe1"),
            name: "Black Pill".to_string(),
            price: Money::from_cents(4999),
            rating: 4.8,
            reviews: 12,
            description: String::new(),
            sizes: vec!["9".to_string(), "10".to_string()],
            in_stock,
            images: vec!["/images/black-pill.png".to_string()],
        }
    }

    #[test]
    fn test_build_line_from_catalog() {
        let line = build_line(&args(2), Some(&product(5)), 0).unwrap();
        assert_eq!(line.name, "Black Pill");
        assert_eq!(line.unit_price.cents(), 4999);
        assert_eq!(line.image, "/images/black-pill.png");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_build_line_caps_at_remaining_stock() {
        assert_eq!(build_line(&args(10), Some(&product(3)), 0).unwrap().quantity, 3);
        assert_eq!(build_line(&args(10), Some(&product(3)), 2).unwrap().quantity, 1);

        let err = build_line(&args(1), Some(&product(3)), 3).unwrap_err();
        assert!(err.to_string().contains("already in the cart"), "{err}");
    }

    #[test]
    fn test_build_line_reports_catalog_errors() {
        let mut wrong_size = args(1);
        wrong_size.size = "13".to_string();
        let err = build_line(&wrong_size, Some(&product(3)), 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::UnknownSize { .. })
        ));

        let err = build_line(&args(1), Some(&product(0)), 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::OutOfStock(_))
        ));
    }

    #[test]
    fn test_flags_override_catalog() {
        let mut overridden = args(1);
        overridden.price = Some("39.50".to_string());
        overridden.name = Some("Black Pill (sample)".to_string());
        let line = build_line(&overridden, Some(&product(5)), 0).unwrap();
        assert_eq!(line.unit_price.cents(), 3950);
        assert_eq!(line.name, "Black Pill (sample)");
        assert_eq!(line.image, "/images/black-pill.png");
    }

    #[test]
    fn test_offline_line_needs_price() {
        let mut offline = args(2);
        offline.offline = true;
        assert!(build_line(&offline, None, 0).is_err());

        offline.price = Some("49.99".to_string());
        let line = build_line(&offline, None, 0).unwrap();
        assert_eq!(line.unit_price.cents(), 4999);
        assert_eq!(line.quantity, 2);
        assert!(line.name.is_empty());

        offline.price = Some("forty".to_string());
        assert!(build_line(&offline, None, 0).is_err());
    }

    #[test]
    fn test_add_to_cart_reports_units_actually_added() {
        let mut store = CartStore::open(MemoryStore::new(), StoreOptions::default());
        let line = |qty| CartLine::new("shoe1", "9", Money::from_cents(4999), qty);

        assert_eq!(add_to_cart(&mut store, line(2)), (2, 2));
        let bulk = MAX_QUANTITY_PER_LINE - 3;
        assert_eq!(
            add_to_cart(&mut store, line(bulk)),
            (bulk, MAX_QUANTITY_PER_LINE - 1)
        );
        assert_eq!(add_to_cart(&mut store, line(5)), (1, MAX_QUANTITY_PER_LINE));
        assert_eq!(add_to_cart(&mut store, line(1)), (0, MAX_QUANTITY_PER_LINE));
    }

    #[test]
    fn test_line_label() {
        let line = CartLine::new("shoe1", "9", Money::from_cents(5000), 1);
        assert_eq!(line_label(&line), "shoe1");
        assert_eq!(line_label(&line.with_name("Black Pill")), "Black Pill [shoe1]");
    }
}
