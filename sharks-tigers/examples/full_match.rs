use chrono::Duration;
use sharks_tigers::{Amount, GameFactory, Mark};
use uuid::Uuid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let factory = GameFactory::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let wager = Amount::from_units(100);

    println!("Alice creates a game, marking position 0 with Shark...");
    let handle = factory.create_game(alice, 0, Mark::Shark, Duration::seconds(30), None, wager)?;

    {
        let game = handle.lock();
        println!("Game #{} is {:?}", game.id(), game.state());
        println!("Escrowed: {}", game.total_escrowed());
    }

    println!("\nBob joins at position 2 with a matching stake...");
    handle.lock().join_game(bob, 2, wager)?;

    println!("Playing out the left column for Alice...");
    {
        let mut game = handle.lock();
        game.make_move(alice, 3)?;
        game.make_move(bob, 5)?;
        game.make_move(alice, 6)?;

        println!("State: {:?}", game.state());
        println!("Winner: {:?}", game.winner());
    }

    let payout = handle.lock().claim_reward(alice)?;
    println!("\nAlice claims the pot: {}", payout);

    println!("\nGame history:");
    for event in handle.lock().events() {
        println!("  {:?}", event);
    }

    Ok(())
}
