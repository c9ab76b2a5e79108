//! Line-based terminal front-end.
//!
//! Plays the part of the browser page: it renders [`SessionView`] after
//! every action, turns input lines into [`Command`]s and answers the
//! party prompts.

use async_trait::async_trait;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tracing::warn;

use netguessr_core::{SessionEvent, SessionEventHandler, SessionView};

use crate::api::GameApi;
use crate::input::{Prompt, Prompter};
use crate::session_client::{
    CreateOutcome, JoinOutcome, LeaveOutcome, SessionClient, SessionError,
};

/// Typed at any prompt to cancel it.
pub const CANCEL: &str = "!";

pub const HELP: &str = "\
Commands:
  <amount>                submit a guess (same as pressing enter in the form)
  guess <value> [amount]  submit a guess with an optional numeric amount
  skip | next             start a new round
  restart                 reset score and start over
  create                  create a party room
  join                    join a party room
  leave                   leave the current party
  party                   refresh the party scoreboard
  lookup <name>           show a celebrity by name
  broken                  report the current image as broken
  help                    show this text
  quit                    exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A bare line: submitted as the guess only when submit is enabled.
    Enter(String),
    Guess { value: String, amount: Option<f64> },
    Skip,
    Next,
    Restart,
    Create,
    Join,
    Leave,
    Party,
    Lookup { name: String },
    BrokenImage,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "skip" => Command::Skip,
            "next" => Command::Next,
            "restart" => Command::Restart,
            "create" => Command::Create,
            "join" => Command::Join,
            "leave" => Command::Leave,
            "party" => Command::Party,
            "broken" => Command::BrokenImage,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "lookup" if !rest.is_empty() => Command::Lookup {
                name: rest.to_string(),
            },
            "lookup" => Command::Help,
            "guess" => {
                let mut parts = rest.split_whitespace();
                let Some(value) = parts.next() else {
                    return Some(Command::Help);
                };
                let amount = match parts.next() {
                    Some(amount) => match amount.parse::<f64>() {
                        Ok(amount) => Some(amount),
                        Err(_) => return Some(Command::Help),
                    },
                    None => None,
                };
                Command::Guess {
                    value: value.to_string(),
                    amount,
                }
            }
            _ => Command::Enter(line.to_string()),
        };

        Some(command)
    }
}

pub enum Step {
    Continue(Option<String>),
    Quit,
}

/// Run one command against the session. Notices are not returned here;
/// they reach the player through [`NoticePrinter`].
pub async fn execute<A: GameApi + 'static>(
    client: &mut SessionClient<A>,
    command: Command,
    prompter: &mut dyn Prompter,
) -> Result<Step, SessionError> {
    let message = match command {
        Command::Enter(value) => {
            if !client.view().controls.submit {
                return Ok(Step::Continue(None));
            }
            client.submit_guess(&value, None).await?;
            None
        }
        Command::Guess { value, amount } => {
            client.submit_guess(&value, amount).await?;
            None
        }
        Command::Skip | Command::Next => {
            client.reset_round().await?;
            None
        }
        Command::Restart => {
            client.restart_game().await?;
            Some("Game restarted".to_string())
        }
        Command::Create => match client.create_party(prompter).await? {
            CreateOutcome::Created { room_code } => {
                Some(format!("Created party {}, share this code", room_code))
            }
            CreateOutcome::Aborted => Some("Party creation cancelled".to_string()),
            CreateOutcome::Failed { .. } => None,
        },
        Command::Join => match client.join_party(prompter).await? {
            JoinOutcome::Joined { code } => Some(format!("Joined party {}", code)),
            JoinOutcome::Aborted => Some("Join cancelled".to_string()),
            JoinOutcome::RoomNotFound { .. } | JoinOutcome::Failed { .. } => None,
        },
        Command::Leave => match client.leave_party().await? {
            LeaveOutcome::Left => Some("Left the party".to_string()),
            LeaveOutcome::Unchanged { .. } => None,
        },
        Command::Party => match client.refresh_party_info().await? {
            Some(_) => None,
            None => Some("You are not in a party".to_string()),
        },
        Command::Lookup { name } => match client.lookup_subject(&name).await? {
            Some(subject) => Some(format!(
                "{}: net worth {} ({})",
                subject.name, subject.networth, subject.image
            )),
            None => Some(format!("No such celeb: {}", name)),
        },
        Command::BrokenImage => {
            client.report_image_error();
            Some("Thanks, the image has been reported".to_string())
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => return Ok(Step::Quit),
    };

    Ok(Step::Continue(message))
}

pub fn render(view: &SessionView) -> String {
    let mut out = String::new();

    match &view.subject {
        Some(subject) => {
            out.push_str(&format!("Guess the net worth of: {}\n", subject.name));
            out.push_str(&format!("Image: {}\n", subject.image));
        }
        None => {
            out.push_str("No celebrity loaded, try `next`\n");
        }
    }

    if let Some(result) = &view.result {
        out.push_str(&format!("[{}] {}\n", result.background, result.message));
        if let Some(net_worth) = &result.net_worth {
            out.push_str(&format!("{}\n", net_worth));
        }
        if let Some(score) = &result.score {
            out.push_str(&format!("{}\n", score));
        }
    }

    if let Some(code) = &view.party.code {
        out.push_str(&format!("Party {}\n", code));
        for (rank, line) in view.party.scoreboard.iter().enumerate() {
            let you = if line.is_current_user { " (you)" } else { "" };
            out.push_str(&format!("  {}. {} {}{}\n", rank + 1, line.username, line.score, you));
        }
    }

    let controls = &view.controls;
    let mut actions = Vec::new();
    if controls.submit {
        actions.push("<amount>");
    }
    if controls.skip {
        actions.push("skip");
    }
    if controls.next {
        actions.push("next");
    }
    if controls.join_visible {
        actions.push("join");
        actions.push("create");
    }
    if controls.leave_visible {
        actions.push("leave");
    }
    actions.extend(["restart", "help", "quit"]);
    out.push_str(&format!("> {}", actions.join(" | ")));

    out
}

/// Reads lines from the terminal, both for commands and for prompts.
pub struct TerminalPrompter<R> {
    lines: Lines<BufReader<R>>,
}

impl TerminalPrompter<Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> TerminalPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    pub async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> Prompter for TerminalPrompter<R> {
    async fn prompt(&mut self, prompt: Prompt) -> Option<String> {
        print!("{} ({} to cancel): ", prompt, CANCEL);
        let _ = std::io::stdout().flush();

        let line = self.next_line().await?;
        if line.trim() == CANCEL {
            return None;
        }
        Some(line)
    }
}

/// Shows notices the way the page showed its alerts: immediately.
pub struct NoticePrinter;

impl SessionEventHandler for NoticePrinter {
    fn handle_event(&mut self, event: SessionEvent) {
        if let SessionEvent::Notice(notice) = event {
            println!("!! {}", notice);
        }
    }
}

pub async fn run<A: GameApi + 'static, R: AsyncRead + Unpin + Send>(
    client: &mut SessionClient<A>,
    terminal: &mut TerminalPrompter<R>,
) {
    println!("{}", render(&client.view()));

    while let Some(line) = terminal.next_line().await {
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match execute(client, command, terminal).await {
            Ok(Step::Quit) => break,
            Ok(Step::Continue(Some(message))) => println!("{}", message),
            Ok(Step::Continue(None)) => {}
            Err(e) => {
                warn!("Command failed: {}", e);
                println!("!! {}", e);
            }
        }

        println!("{}", render(&client.view()));
    }
}
