use simplelog::*;

use chordlsys::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // init logging
    TermLogger::init(
        log::LevelFilter::Info,
        ConfigBuilder::default().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|err| {
        log::error!("init_logger error: {:?}", err);
    });

    // a cycle of fifths which branches into exchanged and contextually transposed chords
    let mut generator = ChordLindenmayer::new();
    generator.set_axiom("S(0,4,7) R48 I0=1 I1=2 I2=3 P=C A");
    generator.add_rule("A", "W [ T7 B ] T5 A");
    generator.add_rule("B", "K O0.25 W L/1.5 Q2 D/ W2 V+");
    generator.set_iteration_count(4);

    generator.generate()?;
    println!("{}", generator.production());
    for event in generator.score() {
        println!("{}", event);
    }
    Ok(())
}
