//! Favorites commands.

#![allow(clippy::print_stdout)]

use shopfront_core::ProductId;

use super::{CliError, Session, product_line};

/// Print favorite products.
pub async fn show(session: &Session) -> Result<(), CliError> {
    let products = session.favorite_products().await?;
    if products.is_empty() {
        println!("No favorites yet");
    }
    for product in &products {
        println!("{}", product_line(product));
    }
    Ok(())
}

pub async fn toggle(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    let was_favorite = session.favorites().contains(id);
    let is_favorite = session.favorites_mut().toggle(id).await;
    if is_favorite == was_favorite {
        return Err(CliError::Rejected("Favorites were not saved"));
    }

    if is_favorite {
        println!("Added {id} to favorites");
    } else {
        println!("Removed {id} from favorites");
    }
    Ok(())
}

pub async fn add(session: &mut Session, id: ProductId) -> Result<(), CliError> {
    if session.favorites_mut().add(id).await {
        Ok(())
    } else {
        Err(CliError::Rejected("Favorites were not saved"))
    }
}

pub async fn remove(session: &mut Session, id: &ProductId) -> Result<(), CliError> {
    if session.favorites_mut().remove(id).await {
        Ok(())
    } else {
        Err(CliError::Rejected("Favorites were not saved"))
    }
}
