use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use pastorale_sim::agent::Agent;
use pastorale_sim::{Scene, SimEventKind, Species, WeatherKind};

pub fn run(
    config: Option<&Path>,
    ticks: u64,
    seed: Option<u64>,
    speed: Option<f32>,
    verbose: bool,
) -> Result<(), String> {
    let mut scene = super::build_scene(config, seed, speed)?;
    scene.run(ticks);

    print_header(&scene, ticks);

    if verbose {
        println!("  {}", "Occurrence Log".bold().underline());
        println!();
        for event in scene.events().events() {
            let tick_label = format!("[tick {:>5}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if scene.events().is_empty() {
            println!("  {}", "(nothing happened)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = scene
            .events()
            .events()
            .iter()
            .filter(|e| e.kind.is_notable())
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Occurrences".bold().underline());
            for event in notable {
                println!(
                    "  {} {}",
                    format!("[tick {:>5}]", event.tick).dimmed(),
                    colorize_event(&event.kind, &event.description)
                );
            }
            println!();
        }
    }

    print_villagers(&scene);
    print_animals(&scene);
    Ok(())
}

fn print_header(scene: &Scene, ticks: u64) {
    let clock = scene.clock();
    let weather = scene.weather();
    let seed = scene.config().seed;
    let season_pct = clock.season_progress() / scene.config().clock.season_length * 100.0;

    println!(
        "  {} {}",
        "Pastorale".bold(),
        format!("({ticks} ticks, seed={seed}, speed={})", clock.time_speed()).dimmed()
    );
    println!(
        "  Day {}, {}, {} ({} through)",
        clock.day(),
        format_hour(clock.time_of_day()),
        clock.season(),
        format!("{season_pct:.0}%").dimmed()
    );
    println!(
        "  Weather: {} (intensity {:.2}, wind {:.2})",
        colorize_weather(weather.kind()),
        weather.intensity(),
        weather.wind_strength()
    );
    match scene.scheduler().current() {
        Some(event) => println!("  Happening now: {}", event.to_string().magenta()),
        None => println!("  Happening now: {}", "nothing in particular".dimmed()),
    }
    println!(
        "  {} agents, {} lights, {} particles, {} occurrences logged",
        scene.agent_count(),
        scene.lights().len(),
        scene.metrics().particle_count,
        scene.events().len()
    );
    println!();
}

fn print_villagers(scene: &Scene) {
    println!("  {}", "Villagers".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Activity", "X", "Heading to", "Chatting with"]);
    for v in scene.villagers() {
        table.add_row(vec![
            v.id().to_string(),
            v.state_label().to_string(),
            format!("{:.1}", v.position().x),
            format!("{:.1}", v.target_x()),
            v.partner().map_or_else(|| "--".to_string(), |p| p.to_string()),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_animals(scene: &Scene) {
    println!("  {}", "Animals".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Species", "State", "Position", "Herd"]);
    for a in scene.animals() {
        let herd = match a.species() {
            Species::Bird => "--".to_string(),
            Species::Cow | Species::Sheep => a.herd().to_string(),
        };
        let pos = a.position();
        table.add_row(vec![
            a.id().to_string(),
            a.species().to_string(),
            a.state_label().to_string(),
            format!("({:.1}, {:.1})", pos.x, pos.y),
            herd,
        ]);
    }
    println!("{table}");
    println!();
}

fn format_hour(t: f32) -> String {
    let minutes = (t * 60.0) as u32;
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

fn colorize_weather(kind: WeatherKind) -> colored::ColoredString {
    let name = kind.to_string();
    match kind {
        WeatherKind::Clear => name.yellow(),
        WeatherKind::Rain => name.blue(),
        WeatherKind::Snow => name.white().bold(),
        WeatherKind::Storm => name.red().bold(),
    }
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::SeasonChanged { .. } => description.green().bold(),
        SimEventKind::NewDay { .. } => description.dimmed(),
        SimEventKind::WeatherChanged { .. } => description.blue(),
        SimEventKind::LightningStrike => description.yellow().bold(),
        SimEventKind::ScriptedEventStarted { .. } => description.magenta(),
        SimEventKind::ScriptedEventEnded { .. } => description.magenta().dimmed(),
        SimEventKind::ConversationStarted { .. } => description.cyan(),
    }
}
