//! Phase Walkthrough
//!
//! Walks a session through the sample workflow table, showing accepted and
//! rejected transitions, the effect-based path, and checkpoint/resume.
//!
//! Run with: RUST_LOG=debug cargo run --example phase_walkthrough

use globex_phases::checkpoint::Checkpoint;
use globex_phases::core::{FileReference, Phase, TransitionTable};
use globex_phases::effects::PhaseSession;
use stillwater::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Phase Walkthrough ===\n");

    let mut session = PhaseSession::new(TransitionTable::workflow());
    println!("Start: {}", session.current_phase());

    session.request(Phase::Interview)?;
    session.update(|state| {
        state
            .file_references
            .push(FileReference::at_line("src/auth.rs", 42));
    });

    // Skipping ahead is refused, with the legal moves attached.
    if let Err(rejection) = session.request(Phase::Ralph) {
        println!(
            "You are in {}; valid moves are {}",
            rejection.from, rejection.valid_targets
        );
    }

    // Effect-based path: describe, run, then apply.
    let staged = session.request_effect::<()>(Phase::Plan).run(&()).await?;
    session.apply(staged)?;

    let saved = session.checkpoint().to_json()?;
    let mut resumed =
        PhaseSession::from_checkpoint(TransitionTable::workflow(), Checkpoint::from_json(&saved)?)?;

    for phase in [
        Phase::PlanInterview,
        Phase::Features,
        Phase::Ralph,
        Phase::Wiggum,
        Phase::Complete,
    ] {
        resumed.request(phase)?;
    }

    let path: Vec<&str> = resumed.history().path().into_iter().map(Phase::name).collect();
    println!("\nPath: {}", path.join(" -> "));
    println!("Terminal: {}", resumed.is_terminal());

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}
