use rand::RngCore;
use wssim::main_phase::{FourthCancelBonus, RevealClockClimaxes, SeedTopStack};
use wssim::print::PrintExt;
use wssim::{
    cumulative_distribution, resolve_damage, run_scenarios, Card, DeckConfig, DeckState,
    MainPhaseStep,
};

fn main() -> wssim::Result<()> {
    let deck = DeckConfig::builder()
        .total_cards(50)
        .climax_cards(8)
        .waiting_room_cards(10)
        .waiting_room_climax_cards(1)
        .build()?;

    let burn_two = |state: &mut DeckState, rng: &mut dyn RngCore| -> wssim::Result<u32> {
        resolve_damage(state, 2, rng)?.total()
    };
    let scenarios: Vec<(&str, Vec<Box<dyn MainPhaseStep>>)> = vec![
        ("battle only", vec![]),
        ("fourth cancel bonus", vec![boxed(FourthCancelBonus)]),
        (
            "stacked climax, then bonus",
            vec![
                boxed(SeedTopStack::new([Card::Other, Card::Other, Card::Other, Card::Climax])),
                boxed(FourthCancelBonus),
            ],
        ),
        ("reveal nine", vec![boxed(RevealClockClimaxes::default())]),
        ("burn two", vec![boxed(burn_two)]),
    ];

    for (label, samples) in run_scenarios([3u32, 3, 2], &deck, scenarios, 20_000, Some(7))? {
        let mean = samples.iter().map(|&x| f64::from(x)).sum::<f64>() / samples.len() as f64;
        println!("== {label} (mean {mean:.3})");
        cumulative_distribution(&samples)?.print_table();
    }
    Ok(())
}

fn boxed(step: impl MainPhaseStep + 'static) -> Box<dyn MainPhaseStep> {
    Box::new(step)
}
