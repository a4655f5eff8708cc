use clap::Args;
use focuswell_core::error::Result;
use focuswell_core::{
    AlertDispatcher, Config, Event, Intent, Mode, Request, Runtime, Session, Snapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::host::{DesktopNotifier, SpeechCommand};
use crate::input::{parse_line, Input, HELP};

#[derive(Args)]
pub struct RunArgs {
    /// Focus minutes for this session (overrides config)
    #[arg(long)]
    focus: Option<String>,
    /// Break minutes for this session (overrides config)
    #[arg(long = "break")]
    break_: Option<String>,
    /// Enable desktop notifications at startup
    #[arg(long)]
    notify: bool,
    /// Disable spoken alerts
    #[arg(long)]
    no_speech: bool,
    /// Print snapshots and events as JSON lines
    #[arg(long)]
    json: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let config = Config::load_or_default();

    let mut settings = config.durations();
    if let Some(raw) = args.focus.as_deref() {
        settings.update_from_input(Mode::Focus, raw);
    }
    if let Some(raw) = args.break_.as_deref() {
        settings.update_from_input(Mode::Break, raw);
    }

    let mut alerts = AlertDispatcher::new()
        .with_voice(config.voice())
        .with_icon(config.alerts.icon.clone())
        .with_notifier(Box::new(DesktopNotifier::new()));
    if config.alerts.speech && !args.no_speech {
        match SpeechCommand::detect() {
            Some(cmd) => alerts = alerts.with_speech(Box::new(cmd)),
            None => tracing::debug!("no speech synthesiser found, speech disabled"),
        }
    }

    let mut session = Session::new(settings, alerts);
    if args.notify || config.alerts.notifications {
        session.request_notification_permission();
    }

    let (runtime, snapshots) = Runtime::new(session);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let runtime = runtime.with_events(event_tx);

    let json = args.json;
    print_snapshot(&snapshots.borrow(), json)?;

    let (session, read, ()) = tokio::join!(
        runtime.run(request_rx),
        read_input(request_tx, json),
        print_events(event_rx, json),
    );
    read?;

    tracing::info!(hydration_total = session.hydration_total(), "goodbye");
    Ok(())
}

/// Forward stdin lines as intents until `quit` or end of input.
async fn read_input(requests: mpsc::UnboundedSender<Request>, json: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match parse_line(&line) {
            Ok(Input::Empty) => continue,
            Ok(Input::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(Input::Status) => Intent::Refresh,
            Ok(Input::Intent(Intent::Shutdown)) => {
                let _ = requests.send(Intent::Shutdown.into());
                return Ok(());
            }
            Ok(Input::Intent(intent)) => intent,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        match submit(&requests, intent).await {
            Some(snapshot) => print_snapshot(&snapshot, json)?,
            None => return Ok(()),
        }
    }
    // Dropping the sender ends the session.
    Ok(())
}

/// Send `intent` and wait for the snapshot taken right after it was applied.
/// Returns `None` once the session has ended.
async fn submit(requests: &mpsc::UnboundedSender<Request>, intent: Intent) -> Option<Snapshot> {
    let (request, reply) = Request::with_reply(intent);
    requests.send(request).ok()?;
    reply.await.ok()
}

async fn print_events(mut events: mpsc::UnboundedReceiver<Event>, json: bool) {
    while let Some(event) = events.recv().await {
        if json {
            if let Ok(line) = serde_json::to_string(&event) {
                println!("{line}");
            }
            continue;
        }
        match &event {
            Event::FocusCompleted { next, completion, .. } => {
                println!("** {}: {} (next: {next})", completion.title, completion.body);
            }
            Event::HealthCompleted {
                hydration_total,
                completion,
            } => {
                println!(
                    "** {}: {} (total {hydration_total} ml)",
                    completion.title, completion.body
                );
            }
            Event::NotificationsChanged { enabled, .. } => {
                println!("notifications {}", if *enabled { "on" } else { "off" });
            }
            _ => {}
        }
    }
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }
    println!(
        "[{}] {} {} ({:.0}%) | health {} {} | water {} ml | notifications {} | {}m/{}m",
        snapshot.focus.mode,
        snapshot.focus.display,
        if snapshot.focus.is_running { "running" } else { "paused" },
        snapshot.focus.progress * 100.0,
        snapshot.health.display,
        if snapshot.health.is_running { "running" } else { "paused" },
        snapshot.hydration_total,
        if snapshot.notifications_enabled { "on" } else { "off" },
        snapshot.focus_minutes,
        snapshot.break_minutes,
    );
    Ok(())
}
