//! Spellplay - terminal front end.
//!
//! A thin stdin/stdout host around the engine crate: it owns the event
//! loop, the score accumulator, and the console feedback capabilities the
//! engines are injected with.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spellplay::{
    Difficulty, DictationEngine, Feedback, MatchOutcome, MatchSession, PeerEvent, PlacementEngine,
    RoundStatus, ScoreSink, Signal, Speech, encode, loopback,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Placement { difficulty, seed } => run_placement(difficulty, rng_from(seed)),
        Command::Dictation { difficulty, seed } => run_dictation(difficulty, rng_from(seed)),
        Command::Duel { difficulty, seed } => run_duel(difficulty, rng_from(seed)),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Score accumulator for a terminal session: running total plus the best
/// total seen so far. Persistent high-score storage belongs to a larger
/// host application, not this demo.
#[derive(Debug, Default)]
struct ConsoleScore {
    total: i32,
    high: i32,
}

impl ScoreSink for ConsoleScore {
    fn report(&mut self, delta: i32) {
        self.total += delta;
        if self.total > self.high {
            self.high = self.total;
        }
        println!("  [score {delta:+} -> total {}]", self.total);
    }
}

/// Console stand-in for audio/visual cues.
#[derive(Debug, Default)]
struct ConsoleFeedback;

impl Feedback for ConsoleFeedback {
    fn signal(&mut self, signal: Signal) {
        match signal {
            Signal::Win => println!("  *ding*"),
            Signal::Error => println!("  *buzz*"),
            Signal::Shake => {}
        }
    }
}

/// The terminal has no speakers; the dictation prompt shows the phonetic
/// transcription instead and the utterance is only logged.
#[derive(Debug, Default)]
struct ConsoleSpeech;

impl Speech for ConsoleSpeech {
    fn say(&mut self, text: &str) {
        debug!(text, "speech playback requested");
    }
}

fn prompt(text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn run_placement(difficulty: Difficulty, rng: StdRng) -> Result<()> {
    let mut engine = PlacementEngine::new(rng);
    let mut score = ConsoleScore::default();
    let mut feedback = ConsoleFeedback;

    println!("Spell the word from its definition.");
    println!("Commands: place <letter>, pick <slot>, hint, shuffle, new, quit");

    new_placement_round(&mut engine, difficulty);
    loop {
        let Some(round) = engine.round() else { break };
        println!();
        println!("  Clue: {}", round.definition());
        println!("  Board: {}", round.board_letters());
        let rack: String = round.rack().iter().map(|t| t.letter).collect();
        println!("  Rack:  {rack}");
        if let Some(message) = round.message() {
            println!("  > {message}");
        }
        if round.status() == RoundStatus::Won {
            println!("  (type `new` for another word, `quit` to stop)");
        }

        let Some(line) = prompt("placement> ")? else {
            break;
        };
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("place"), Some(arg)) => {
                let letter = arg.chars().next().unwrap_or(' ').to_ascii_uppercase();
                let id = engine
                    .round()
                    .and_then(|r| r.rack().iter().find(|t| t.letter == letter).map(|t| t.id));
                match id {
                    Some(id) => {
                        engine.place_from_rack(id, &mut score, &mut feedback);
                    }
                    None => println!("  no {letter} on the rack"),
                }
            }
            (Some("pick"), Some(arg)) => {
                let slot: usize = arg.parse().unwrap_or(usize::MAX);
                if !engine.pick_up(slot) {
                    println!("  nothing movable there");
                }
            }
            (Some("hint"), _) => {
                engine.use_hint(&mut score, &mut feedback);
            }
            (Some("shuffle"), _) => engine.shuffle_rack(),
            (Some("new"), _) => new_placement_round(&mut engine, difficulty),
            (Some("quit"), _) => break,
            _ => println!("  commands: place <letter>, pick <slot>, hint, shuffle, new, quit"),
        }
        // Transient notices would be cleared by a UI timer; the prompt loop
        // simply redraws, so they expire on the next command instead.
    }

    println!("Final total {}, best {}", score.total, score.high);
    Ok(())
}

fn new_placement_round(engine: &mut PlacementEngine<StdRng>, difficulty: Difficulty) {
    let recent = engine.recent_words();
    let entry = spellplay::FallbackWords.draw(difficulty, &recent, engine.rng());
    // The demo binary has no live image provider; every round gets the
    // placeholder illustration.
    engine.start_round(
        &entry.word,
        &entry.definition,
        spellplay::ImageRef::placeholder(),
    );
}

fn run_dictation(difficulty: Difficulty, mut rng: StdRng) -> Result<()> {
    let mut engine = DictationEngine::new();
    let mut score = ConsoleScore::default();
    let mut feedback = ConsoleFeedback;
    let mut speech = ConsoleSpeech;

    println!("Type the word you hear (shown here phonetically).");
    println!("Commands: guess <word>, def, sentence, letter, say, new, quit");

    let entry = spellplay::FallbackWords.draw(difficulty, &[], &mut rng);
    engine.start_round(entry);
    engine.speak_word(&mut speech);

    loop {
        let Some(round) = engine.round() else { break };
        println!();
        println!("  Word: {}", round.entry().phonetic);
        match round.visible_panel() {
            Some(spellplay::Panel::Definition) => {
                println!("  Definition: {}", round.entry().definition);
            }
            Some(spellplay::Panel::Sentence) => {
                println!("  Sentence: {}", round.entry().sentence);
            }
            None => {}
        }
        if !round.input().is_empty() {
            println!("  So far: {}", round.input());
        }
        if let Some(message) = round.message() {
            println!("  > {message}");
        }

        let Some(line) = prompt("dictation> ")? else {
            break;
        };
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match command {
            "guess" => {
                engine.set_input(rest);
                engine.submit(&mut score, &mut feedback);
            }
            "def" => engine.reveal_definition(&mut score),
            "sentence" => engine.reveal_sentence(),
            "letter" => {
                engine.letter_hint(&mut score);
            }
            "say" => engine.speak_word(&mut speech),
            "new" => {
                let entry =
                    spellplay::FallbackWords.draw(difficulty, &engine.recent_words(), &mut rng);
                engine.start_round(entry);
                engine.speak_word(&mut speech);
            }
            "quit" => break,
            _ => println!("  commands: guess <word>, def, sentence, letter, say, new, quit"),
        }
    }

    println!("Final total {}, best {}", score.total, score.high);
    Ok(())
}

/// Plays both sides of a duel over the in-memory loopback pipe, printing
/// every wire message. The guest occasionally peeks at definitions and
/// fumbles a first attempt, so the two scores usually diverge.
fn run_duel(difficulty: Difficulty, mut rng: StdRng) -> Result<()> {
    let (mut host_ch, mut guest_ch) = loopback();
    let mut host = MatchSession::host(difficulty, &mut rng);
    let mut guest = MatchSession::join();
    let mut feedback = ConsoleFeedback;

    host.handle_event(PeerEvent::Open, &mut host_ch)?;
    guest.handle_event(PeerEvent::Open, &mut guest_ch)?;
    pump("host", &mut guest, &mut guest_ch)?;
    info!(rounds = host.rounds().len(), "duel started");

    while host.status() == spellplay::SessionStatus::Playing
        || guest.status() == spellplay::SessionStatus::Playing
    {
        if let Some(word) = host.current_round().map(|r| r.word.clone())
            && host.status() == spellplay::SessionStatus::Playing
        {
            host.set_input(&word);
            host.submit(&mut host_ch, &mut feedback)?;
        }
        if let Some(entry) = guest.current_round().cloned()
            && guest.status() == spellplay::SessionStatus::Playing
        {
            if rng.random_bool(0.4) {
                guest.reveal_definition();
            }
            if rng.random_bool(0.3) {
                guest.set_input("wrong guess");
                guest.submit(&mut guest_ch, &mut feedback)?;
            }
            guest.set_input(&entry.word);
            guest.submit(&mut guest_ch, &mut feedback)?;
        }
        pump("host", &mut guest, &mut guest_ch)?;
        pump("guest", &mut host, &mut host_ch)?;
    }

    println!();
    println!(
        "host:  score {} -> {}",
        host.local_score(),
        verdict(host.outcome())
    );
    println!(
        "guest: score {} -> {}",
        guest.local_score(),
        verdict(guest.outcome())
    );
    Ok(())
}

fn verdict(outcome: Option<MatchOutcome>) -> String {
    outcome.map_or_else(|| "undecided".to_string(), |o| o.to_string())
}

/// Delivers queued messages from the other peer into this session,
/// printing each encoded frame as it crosses.
fn pump(
    from: &str,
    receiver: &mut MatchSession,
    receiver_ch: &mut spellplay::LoopbackEnd,
) -> Result<()> {
    for message in receiver_ch.drain() {
        println!("  {from} -> {}", encode(&message)?);
        receiver.handle_event(PeerEvent::Message(message), receiver_ch)?;
    }
    Ok(())
}
