// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_chain::prelude::*;
use std::sync::Arc;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    decimal_chain::utils::init_tracing(tracing::Level::DEBUG);

    println!("=== Decimal Chain Example ===\n");

    // Native f64 vs. the engine
    println!("0.1 + 0.2");
    println!("  native: {}", 0.1 + 0.2);
    println!("  exact:  {}\n", compute_chain([0.1, 0.2], Operation::Add)?);

    println!("19.9 * 100");
    println!("  native: {}", 19.9 * 100.0);
    println!("  exact:  {}\n", compute_chain([19.9, 100.0], Operation::Multiply)?);

    // Percent literals
    let ops = Operand::parse_all(["12.5%", "80"])?;
    println!("12.5% of 80 = {}\n", compute_chain(&ops, Operation::Multiply)?);

    // A fluent chain with event logging
    let recorder = Arc::new(RecordingEventHandler::new());
    let mut chain = ChainBuilder::new()
        .with_event_handler(recorder.clone())
        .build()?;

    println!("Running chain...");
    println!("  add [1.1, 2.2, 3.3]  -> {}", chain.add([1.1, 2.2, 3.3])?);
    println!("  multiply [0.5]       -> {}", chain.multiply([0.5])?);
    println!("  divide [3]           -> {}", chain.divide([3])?);
    println!("  mod [10, 3]          -> {}", chain.modulo([10, 3])?);

    println!("\n=== Chain Events ===");
    for event in recorder.take() {
        match event {
            ChainEvent::Seeded { seed, .. } => println!("  seeded with {}", seed),
            ChainEvent::Reseeded { seed, previous, .. } => {
                println!("  reseeded with {} (was {:?})", seed, previous)
            },
            ChainEvent::Folded {
                operation,
                lhs,
                rhs,
                result,
                ..
            } => println!("  {} {} {} = {}", lhs, operation, rhs, result),
            ChainEvent::Completed { result, .. } => println!("  -> {}", result),
        }
    }

    // Subtract keeps its historical misaligned-scale behaviour by default
    let mut legacy = Chain::default();
    let mut corrected = ChainBuilder::new().corrected_subtract().build()?;
    println!("\n1 - 0.5");
    println!("  legacy:    {}", legacy.subtract([1.0, 0.5])?);
    println!("  corrected: {}", corrected.subtract([1.0, 0.5])?);

    Ok(())
}
