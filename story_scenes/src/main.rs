//! Terminal walkthrough of a story config, without camera or window.

use story_scenes::{SceneStore, StoryCommand, StorySequencer};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              Story Config Explorer                   ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "stories/story_config.json".to_string());

    let store = match SceneStore::load(&path) {
        Ok(s)  => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("  {} — {} scenes\n", path, store.len());
    let mut story = StorySequencer::new(store);

    loop {
        print_scene(&story);
        let choice = read_line("Command (n/b/s/r, l=list, q=quit): ")
            .trim()
            .to_ascii_lowercase();

        let cmd = match choice.as_str() {
            "n" => StoryCommand::Advance,
            "b" => StoryCommand::Retreat,
            "s" => StoryCommand::Skip,
            "r" => StoryCommand::Reset,
            "l" => { print_list(&story); continue; }
            "q" => { println!("\nGoodbye!\n"); break; }
            _   => { println!("  ⚠  Unknown command.\n"); continue; }
        };

        if !story.apply(cmd) {
            println!("  ·  {} — already there, nothing to do.", cmd.name());
        }
    }
}

fn print_scene(story: &StorySequencer) {
    let scene = story.current_scene();
    println!();
    println!("  ┌─ Scene {}/{} ─", story.position() + 1, story.len());
    println!("  │  Background : {}", scene.background.display());
    if let Some(ref o) = scene.overlay {
        println!("  │  Overlay    : {}", o.display());
    }
    println!("  │  Gesture    : {}", scene.gesture);
    println!("  │  Text       : {}", scene.text);
    println!("  └─");
}

fn print_list(story: &StorySequencer) {
    println!();
    for (i, scene) in story.scenes().iter().enumerate() {
        let marker = if i == story.position() { "▶" } else { " " };
        println!("  {} [{:>3}]  {}", marker, i + 1, scene.text);
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
