//! Checkout command: collect delivery details and submit the order.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input};
use shop_api::{place_order, HttpOrderApi, OrderError};
use shop_cart::checkout::{DeliveryInfo, OrderRequest};
use shop_cart::summary::CartSummary;
use shop_cart::CheckoutError;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let summary = CartSummary::from_state(store.state(), ctx.config.tax_rate()?);
    ctx.output.header("Checkout");
    ctx.output.summary(&summary);

    let yes = args.yes;
    let dry_run = args.dry_run;
    let interactive = !ctx.output.is_json();
    let delivery = collect_delivery(args, interactive)?;

    let request = match OrderRequest::from_cart(store.state(), &delivery) {
        Ok(request) => request,
        Err(CheckoutError::InvalidDelivery(errors)) => {
            for error in &errors {
                ctx.output.error(&error.to_string());
            }
            bail!("Delivery details have {} error(s)", errors.len());
        }
        Err(e) => return Err(e.into()),
    };

    if dry_run {
        ctx.output.info("Dry run - order not submitted");
        ctx.output.json(&request);
        return Ok(());
    }

    if !yes && interactive {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Place order for {} as {}?",
                ctx.output.price(summary.total),
                delivery.full_name()
            ))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let api = HttpOrderApi::new(ctx.config.api_config())
        .context("Failed to create order API client")?;

    let spinner = ctx.output.spinner("Placing order...");
    let result = place_order(&api, store.state(), &delivery).await;
    spinner.finish_and_clear();

    let payment_url = match result {
        Ok(url) => url,
        Err(OrderError::Checkout(CheckoutError::MissingPaymentUrl)) => {
            bail!("Order was not accepted: payment URL not received")
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to place order at {}", api.orders_url()))
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "paymentUrl": payment_url }));
    } else {
        ctx.output.success("Order created");
        ctx.output.kv("Pay at", &payment_url);
    }

    Ok(())
}

/// Fill delivery details from flags, prompting for whatever is missing.
fn collect_delivery(args: CheckoutArgs, interactive: bool) -> Result<DeliveryInfo> {
    Ok(DeliveryInfo {
        first_name: field(args.first_name, "First name", interactive)?,
        last_name: field(args.last_name, "Last name", interactive)?,
        address: field(args.address, "Address", interactive)?,
        city: field(args.city, "City", interactive)?,
        zip_code: field(args.zip_code, "Zip code", interactive)?,
        mobile_number: field(args.mobile_number, "Mobile number", interactive)?,
        email: field(args.email, "Email", interactive)?,
    })
}

fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value.trim().to_string()),
        None if interactive => {
            let input: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            Ok(input.trim().to_string())
        }
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CheckoutArgs {
        CheckoutArgs {
            first_name: Some(" Ada ".to_string()),
            last_name: Some("Lovelace".to_string()),
            address: Some("12 Analytical Row".to_string()),
            city: Some("London".to_string()),
            zip_code: Some("94102".to_string()),
            mobile_number: Some("4155550123".to_string()),
            email: Some("ada@example.com".to_string()),
            yes: true,
            dry_run: true,
        }
    }

    #[test]
    fn test_collect_delivery_from_flags() {
        let delivery = collect_delivery(args(), false).unwrap();
        assert_eq!(delivery.first_name, "Ada");
        assert!(delivery.validate().is_ok());
    }

    #[test]
    fn test_missing_flags_without_prompt_fail_validation() {
        let mut args = args();
        args.email = None;
        let delivery = collect_delivery(args, false).unwrap();
        assert!(delivery.email.is_empty());
        assert!(matches!(
            delivery.validate(),
            Err(CheckoutError::InvalidDelivery(ref errors)) if errors.len() == 1
        ));
    }
}
