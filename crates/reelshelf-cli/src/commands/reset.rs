use super::Session;
use crate::output::{Notice, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::Confirm;
use std::io::IsTerminal;

pub async fn run_reset(session: &Session, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            return Err(eyre!("Refusing to reset without confirmation; pass --yes"));
        }
        let confirmed = Confirm::new()
            .with_prompt("Replace every stored movie with the built-in catalog?")
            .default(false)
            .interact()
            .map_err(|e| eyre!("Failed to read confirmation: {}", e))?;
        if !confirmed {
            output.info("Reset cancelled");
            return Ok(());
        }
    }

    let mut catalog = session.open_catalog()?;
    let seeded = catalog.movies.reset_and_reseed();

    output.success(
        Notice::new(format!("Catalog reset with {} built-in movies", seeded))
            .with("seeded", seeded)
            .with("watchlist", catalog.watchlist.len()),
    );
    Ok(())
}
