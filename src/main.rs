use glam::Vec2;

use startrek_quadrant::io::{InstantEffect, SilentSound, TerminalConsole};
use startrek_quadrant::{QuadrantPosition, QuadrantSummary, Simulation};

/// Headless demo drive: populate a quadrant, run the sim for a few
/// seconds, issue one impulse command, and print the scan grid.
fn main() {
    env_logger::init();

    println!("*** STAR TREK ***");
    println!();

    let summary = QuadrantSummary {
        klingons: 2,
        commanders: 1,
        starbases: 1,
        stars: 6,
        ..Default::default()
    };
    let seed: u64 = 0;

    let mut sim = match Simulation::new(seed, QuadrantPosition::new(3, 3), &summary) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let mut sounds = SilentSound;
    let mut console = TerminalConsole;
    let effect = InstantEffect;

    println!("ENTERING QUADRANT {}", sim.enterprise().quadrant);
    print_grid(&sim);

    // Five simulated seconds of hostile movement.
    for _ in 0..50 {
        if let Err(e) = sim.tick(0.1, &mut sounds, &mut console, &effect) {
            eprintln!("tick failed: {}", e);
            std::process::exit(1);
        }
    }

    // Impulse toward the center of the grid.
    let target = Vec2::new(350.0, 350.0);
    if let Err(e) = sim.impulse(target, &mut sounds, &mut console) {
        println!("HELM REFUSED: {}", e);
    }

    print_grid(&sim);
    println!(
        "CONDITION {}   ENERGY {}",
        sim.enterprise().condition.label(),
        sim.enterprise().energy as i32
    );
}

fn print_grid(sim: &Simulation) {
    let border = "-=--=--=--=--=--=--=--=-";
    println!("{}", border);
    for row in sim.render_grid() {
        println!("{}", row);
    }
    println!("{}", border);
}
