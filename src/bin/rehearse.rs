//! Rehearsal Replay Tool - verify a recorded capture against a saved opener
//!
//! Reads a capture log (produced by the in-game hook or written by hand),
//! replays it through the recording session, and prints the resulting
//! feedback. Attempts can be appended to the history database.
//!
//! Usage:
//!   cargo run --bin rehearse -- --job NIN --opener Standard capture.log
//!   cargo run --bin rehearse -- --job NIN --opener Standard --db attempts.db capture.log
//!   cargo run --bin rehearse -- --history --db attempts.db

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};

use opener_trainer::{
    ActionTable, AttemptHistory, AttemptOutcome, GroupRegistry, Job, OpenerStore, Recorder,
    SessionCallbacks, TrainerConfig, parse_capture_log,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = RehearseConfig::from_args();

    if config.show_help {
        print_help();
        return;
    }

    let history = match &config.db_path {
        Some(path) => match AttemptHistory::new(path) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("Failed to open history database: {}", e);
                return;
            }
        },
        None => AttemptHistory::disabled(),
    };

    if config.show_history {
        print_history(&history);
        return;
    }

    let Some(capture_path) = &config.capture_path else {
        println!("No capture log given.\n");
        print_help();
        return;
    };

    let Some(job) = config.job else {
        println!("No job given (--job).\n");
        print_help();
        return;
    };

    let store = OpenerStore::load(&config.openers_file, &config.defaults_file);
    let opener = store
        .get(&config.opener_name, job)
        .or_else(|| store.get_default(&config.opener_name, job));
    let Some(opener) = opener else {
        println!("No opener named '{}' for {}.", config.opener_name, job);
        let names = store.names();
        if names.is_empty() {
            println!("The opener store at {} is empty.", config.openers_file.display());
        } else {
            println!("Available openers:");
            for (job, names) in names {
                println!("  {}: {}", job, names.join(", "));
            }
        }
        return;
    };

    let content = match std::fs::read_to_string(capture_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read {}: {}", capture_path.display(), e);
            return;
        }
    };
    let events = parse_capture_log(&content);
    if events.is_empty() {
        println!("No events in {}.", capture_path.display());
        return;
    }

    println!(
        "Replaying {} events against '{}' ({} slots)...\n",
        events.len(),
        opener.name,
        opener.len()
    );

    let catalog = Arc::new(ActionTable::load(&config.actions_file));
    let groups = Arc::new(GroupRegistry::defaults());
    let trainer_config = TrainerConfig::load(&config.config_file);

    let policy = trainer_config.policy();
    let (tx, rx) = mpsc::channel();
    let consumed = Arc::new(AtomicUsize::new(0));
    let consumed_cb = Arc::clone(&consumed);
    let callbacks = SessionCallbacks::noop()
        .with_feedback(move |f| {
            let _ = tx.send(f);
        })
        .with_current_index(move |_| {
            consumed_cb.fetch_add(1, Ordering::SeqCst);
        });

    let recorder = Recorder::new(catalog, groups);
    let local_actor = events[0].actor_id;
    recorder.start(&opener.slots, policy, local_actor, callbacks);

    for event in &events {
        recorder.on_action_used(*event);
    }

    match rx.try_recv() {
        Ok(feedback) => {
            for line in feedback.messages() {
                println!("[{}] {}", line.kind, line.message);
            }
            // With stop-at-first-mistake set, an early abort leaves slots of
            // the opener unconsumed
            let aborted = policy.stop_at_first_mistake
                && feedback.has_errors()
                && consumed.load(Ordering::SeqCst) < opener.len();
            let outcome = AttemptOutcome::from_feedback(&feedback, aborted);
            history.record(job, &opener.name, outcome, &feedback);
            println!("\nOutcome: {}", outcome);
        }
        Err(_) => {
            recorder.stop();
            println!(
                "Capture ended after {} events without filling the opener; nothing to report.",
                events.len()
            );
        }
    }
}

fn print_history(history: &AttemptHistory) {
    let recent = history.recent(20);
    if recent.is_empty() {
        println!("No recorded attempts.");
        return;
    }

    println!("Last {} of {} attempts:\n", recent.len(), history.count());
    for attempt in recent {
        println!(
            "  {} {} '{}' - {}",
            attempt.recorded_at, attempt.job, attempt.opener_name, attempt.outcome
        );
    }
}

/// Configuration for the rehearse tool
struct RehearseConfig {
    capture_path: Option<PathBuf>,
    job: Option<Job>,
    opener_name: String,
    openers_file: PathBuf,
    defaults_file: PathBuf,
    actions_file: PathBuf,
    config_file: PathBuf,
    db_path: Option<PathBuf>,
    show_history: bool,
    show_help: bool,
}

impl Default for RehearseConfig {
    fn default() -> Self {
        Self {
            capture_path: None,
            job: None,
            opener_name: "Standard".to_string(),
            openers_file: PathBuf::from("config/openers.json"),
            defaults_file: PathBuf::from("assets/openers.json"),
            actions_file: PathBuf::from("assets/actions.json"),
            config_file: PathBuf::from(opener_trainer::CONFIG_FILE),
            db_path: None,
            show_history: false,
            show_help: false,
        }
    }
}

impl RehearseConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--job" => {
                    if i + 1 < args.len() {
                        config.job = Job::from_str(&args[i + 1]);
                        i += 1;
                    }
                }
                "--opener" => {
                    if i + 1 < args.len() {
                        config.opener_name = args[i + 1].clone();
                        i += 1;
                    }
                }
                "--openers-file" => {
                    if i + 1 < args.len() {
                        config.openers_file = PathBuf::from(&args[i + 1]);
                        i += 1;
                    }
                }
                "--actions" => {
                    if i + 1 < args.len() {
                        config.actions_file = PathBuf::from(&args[i + 1]);
                        i += 1;
                    }
                }
                "--db" => {
                    if i + 1 < args.len() {
                        config.db_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--history" => {
                    config.show_history = true;
                }
                "--help" | "-h" => {
                    config.show_help = true;
                }
                arg if !arg.starts_with('-') => {
                    // Positional argument: capture log path
                    config.capture_path = Some(PathBuf::from(arg));
                }
                _ => {}
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!("Rehearsal Replay Tool");
    println!();
    println!("Usage: rehearse [OPTIONS] <capture.log>");
    println!();
    println!("Options:");
    println!("  --job <JOB>            Job tag of the opener (e.g. NIN)");
    println!("  --opener <NAME>        Opener name (default: Standard)");
    println!("  --openers-file <PATH>  User openers file (default: config/openers.json)");
    println!("  --actions <PATH>       Action table (default: assets/actions.json)");
    println!("  --db <PATH>            Record the attempt to this history database");
    println!("  --history              Show recent attempts from --db and exit");
    println!("  -h, --help             Show this help");
    println!();
    println!("Capture log format: one 'T:NNNNN|U|actor|action' line per action use.");
}
