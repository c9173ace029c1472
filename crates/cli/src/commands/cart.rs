//! Cart, checkout and purchase history commands.

#![allow(clippy::print_stdout)]

use shopfront_core::{ProductId, ShippingAddress};
use shopfront_storefront::catalog::Catalog;
use shopfront_storefront::purchase::PurchaseReceipt;

use super::{CliError, Session, format_price, product_price};

/// Print cart lines and checkout totals.
pub async fn show(session: &Session) -> Result<(), CliError> {
    let cart = session.cart();
    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        match session.catalog().get_by_id(&line.product_id).await? {
            Some(product) => println!(
                "{:>4}  {:<26} {:>3} x {:>10}",
                line.product_id.as_str(),
                product.name,
                line.quantity,
                product_price(&product)
            ),
            None => println!(
                "{:>4}  {:<26} {:>3}",
                line.product_id.as_str(),
                "(no longer available)",
                line.quantity
            ),
        }
    }

    let summary = cart.summary().await?;
    println!("\n{} items", cart.count());
    println!("Subtotal: {:>10}", format_price(summary.subtotal));
    println!("Shipping: {:>10}", format_price(summary.shipping));
    println!("Tax:      {:>10}", format_price(summary.tax));
    println!("Total:    {:>10}", format_price(summary.total));
    Ok(())
}

pub async fn add(session: &mut Session, id: ProductId, quantity: u32) -> Result<(), CliError> {
    if session.cart_mut().add(id, quantity).await {
        Ok(())
    } else {
        Err(CliError::Rejected("Cart was not updated"))
    }
}

pub async fn remove(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    if session.cart_mut().remove(id).await {
        Ok(())
    } else {
        Err(CliError::Rejected("Cart was not updated"))
    }
}

pub async fn set(session: &mut Session, id: &ProductId, quantity: i64) -> Result<(), CliError> {
    if session.cart_mut().set_quantity(id, quantity).await {
        println!("{id}: quantity {}", session.cart().cart().quantity_of(id));
        Ok(())
    } else {
        Err(CliError::Rejected("Cart was not updated"))
    }
}

pub async fn clear(session: &mut Session) -> Result<(), CliError> {
    if session.cart_mut().clear().await {
        println!("Cart cleared");
        Ok(())
    } else {
        Err(CliError::Rejected("Cart was not cleared"))
    }
}

/// Purchase every product in the cart.
pub async fn checkout(session: &mut Session) -> Result<(), CliError> {
    if session.cart().is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    let receipt = session
        .checkout()
        .await
        .ok_or(CliError::Rejected("Checkout failed"))?;
    print_receipt(&receipt);
    Ok(())
}

/// Place an order for the whole cart.
pub async fn order(session: &mut Session, address: &ShippingAddress) -> Result<(), CliError> {
    let receipt = session.place_order(address).await?;
    print_receipt(&receipt);
    println!(
        "Shipping to {}, {}, {} {}, {}",
        address.full_name, address.city, address.state, address.zip_code, address.country
    );
    Ok(())
}

/// Print purchased products, oldest first.
pub async fn history(session: &Session) -> Result<(), CliError> {
    let history = session.purchases().history().await?;
    if history.is_empty() {
        println!("No purchases yet");
        return Ok(());
    }

    for id in history.iter() {
        let name = session
            .catalog()
            .get_by_id(id)
            .await?
            .map_or_else(|| "(no longer available)".to_string(), |p| p.name);
        println!("{:>4}  {name}", id.as_str());
    }
    Ok(())
}

fn print_receipt(receipt: &PurchaseReceipt) {
    println!(
        "Order {} placed at {} for {} products",
        receipt.order_id,
        receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        receipt.product_ids.len()
    );
}
