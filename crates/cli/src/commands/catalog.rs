//! Catalog browsing commands.

#![allow(clippy::print_stdout)]

use shopfront_core::{PageRequest, ProductId};
use shopfront_storefront::catalog::Catalog;
use shopfront_storefront::pagination::ScrollState;

use super::{CliError, Session, product_line, product_price};

/// Print one page of products.
pub async fn products(session: &Session, page: u32) -> Result<(), CliError> {
    let request = PageRequest::new(page, session.scroll().page_size());
    let listing = session.catalog().list(request).await?;

    for product in &listing.items {
        println!("{}", product_line(product));
    }
    println!(
        "\nPage {} ({} of {} products)",
        request.page,
        listing.items.len(),
        listing.total
    );
    if listing.has_more {
        println!("More available: shopfront products --page {}", request.page + 1);
    }
    Ok(())
}

/// Scroll to the end of the catalog, one page per fetch.
pub async fn browse(session: &mut Session) -> Result<(), CliError> {
    let mut shown = 0;
    loop {
        let before = session.scroll().state();
        if !session.load_more().await {
            break;
        }
        let after = session.scroll().state();
        if after == before {
            return Err(CliError::Rejected("Could not load the next page"));
        }

        let items = session.scroll().items();
        for product in items.iter().skip(shown) {
            println!("{}", product_line(product));
        }
        shown = items.len();

        let page = after.page().unwrap_or_default();
        if matches!(after, ScrollState::Exhausted { .. }) {
            println!("-- page {page}, end of catalog --");
        } else {
            println!("-- page {page} --");
        }
    }

    println!(
        "\n{} products in {} fetches",
        session.scroll().items().len(),
        session.scroll().fetches_issued()
    );
    Ok(())
}

/// Print a product with related products.
pub async fn product(session: &Session, id: &ProductId) -> Result<(), CliError> {
    let detail = session.product(id).await?;
    let product = &detail.product;

    println!("{}", product.name);
    println!("  {}", product.description);
    println!("  Price:    {}", product_price(product));
    println!("  Category: {}", product.category);
    println!("  Rating:   {:.1}/5", product.rating.value());
    println!("  Stock:    {}", product.stock);
    if let Some(image) = &product.image {
        println!("  Image:    {image}");
    }

    if !detail.related.is_empty() {
        println!("\nYou might also like:");
        for related in &detail.related {
            println!("{}", product_line(related));
        }
    }
    Ok(())
}

/// Print recommendations.
pub async fn recommend(session: &Session, exclude: Option<&ProductId>) -> Result<(), CliError> {
    let picks = session.recommendations(exclude).await?;
    println!("Recommended for you:");
    for product in &picks {
        println!("{}", product_line(product));
    }
    Ok(())
}
