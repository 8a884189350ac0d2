//! Collection CLI Example
//!
//! Walks a session end to end: start it against the built-in catalog,
//! claim the daily bonus, pull a ten-draw, and print the resulting
//! inventory and rank.

use gacha_session::{Session, SessionConfig};

#[tokio::main]
async fn main() {
    env_logger::init();
    println!("=== Gacha Collection Example ===\n");

    let config = SessionConfig::new("./gacha-data", "https://cards.example");
    let mut session = match Session::start(config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start session: {e}");
            return;
        }
    };

    println!(
        "Catalog loaded: {} ({} cards, {} scouts)",
        session.data_loaded(),
        session.cards().len(),
        session.scouts().len()
    );

    if let Some(granted) = session.check_daily_bonus() {
        println!("Daily bonus: +{granted} credits");
    } else {
        println!("Next bonus at {}", session.next_bonus_at());
    }

    match session.redeem_code("WELCOME2025") {
        Ok(receipt) => println!("Gift code: {}", receipt.message),
        Err(e) => println!("Gift code: {e}"),
    }

    println!("Credits: {}\n", session.state().credits);

    let won = session.pull_gacha(10, Some("vol1"));
    println!("Ten-draw results:");
    for card in &won {
        println!("  {} {}", card.rarity, card.name);
    }

    println!("\nInventory:");
    for entry in session.formatted_inventory() {
        println!("  {} x{}", entry.card.name, entry.count);
    }

    let rank = session.rank_info();
    println!(
        "\nRank {} with {} points (next rank at {:?})",
        rank.rank, rank.points, rank.next_rank_points
    );
    println!("Credits remaining: {}", session.state().credits);
}
