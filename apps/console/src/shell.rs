//! # Line Shell
//!
//! Reads one command per line and writes one JSON reply per line.
//!
//! ## Line Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Protocol                                        │
//! │                                                                         │
//! │  stdin / --script                       stdout                          │
//! │  ────────────────                       ──────                          │
//! │  wallet                          ──►    {"ok":true,"data":{...}}        │
//! │  redeem session                  ──►    {"ok":false,"error":{...},      │
//! │                                          "feedback":[{"type":"toast"}]} │
//! │  purchase 49.50 "Yoga class"     ──►    {"ok":true,"data":{...},        │
//! │                                          "feedback":[...]}              │
//! │  # comment / blank               ──►    (nothing)                       │
//! │  quit                            ──►    (stops reading)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arguments with spaces go in single or double quotes.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};
use valeo_core::validation::parse_aed;
use valeo_core::{Aed, Points, RedemptionKind, SubscriptionTier, TransactionType};

use crate::commands::{self, CommandResponse};
use crate::error::ApiError;
use crate::feedback::Feedback;
use crate::state::{ConfigState, StoreState};

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "valeo",
    no_binary_name = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Everything a line can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Print the whole store
    State,
    /// Print the active configuration
    Config,
    /// Referral page
    Referrals,
    /// Invite a friend
    Invite,
    /// Copy the invite link
    Share,
    /// Record a referral from a scanned QR code
    Scan,
    /// Convert the oldest pending referral
    Simulate,
    /// Convert a referral by id
    Convert { id: u32 },
    /// Wallet page
    Wallet,
    /// Redeem a reward: credit, session or retreat
    Redeem {
        #[arg(value_parser = parse_kind)]
        kind: RedemptionKind,
    },
    /// Credit points manually
    Earn {
        amount: u64,
        description: String,
        #[arg(long, value_enum, default_value_t = EntryKind::Bonus)]
        kind: EntryKind,
    },
    /// Record a purchase in AED
    Purchase {
        #[arg(value_parser = parse_amount)]
        amount: Aed,
        description: String,
    },
    /// Complete a wellness challenge
    Challenge { name: String, amount: u64 },
    /// Submit a review
    Review,
    /// Subscription plans
    Plans,
    /// Switch plan: free, premium, elite, elite-family, corporate
    Subscribe {
        #[arg(value_parser = parse_tier)]
        tier: SubscriptionTier,
    },
    /// Admin dashboard
    Dashboard,
    /// Stop reading commands
    #[command(alias = "exit")]
    Quit,
}

/// Ledger entry kinds a manual credit may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryKind {
    Earning,
    Bonus,
}

impl From<EntryKind> for TransactionType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Earning => TransactionType::Earning,
            EntryKind::Bonus => TransactionType::Bonus,
        }
    }
}

fn parse_kind(s: &str) -> Result<RedemptionKind, String> {
    s.parse().map_err(|e: valeo_core::ValidationError| e.to_string())
}

fn parse_tier(s: &str) -> Result<SubscriptionTier, String> {
    s.parse().map_err(|e: valeo_core::ValidationError| e.to_string())
}

fn parse_amount(s: &str) -> Result<Aed, String> {
    parse_aed(s).map_err(|e| e.to_string())
}

// =============================================================================
// Parsing
// =============================================================================

/// Splits a line on whitespace, keeping quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, ApiError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::bad_command("Unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// What a parsed line turned into.
#[derive(Debug)]
pub enum Parsed {
    Command(ShellCommand),
    /// `help` or `--help`: the rendered usage text.
    Help(String),
}

/// Parses one non-empty line.
pub fn parse_line(line: &str) -> Result<Parsed, ApiError> {
    let tokens = tokenize(line)?;
    match Line::try_parse_from(tokens) {
        Ok(parsed) => Ok(Parsed::Command(parsed.command)),
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelp => {
            Ok(Parsed::Help(e.render().to_string()))
        }
        Err(e) => Err(ApiError::bad_command(e.render().to_string().trim().to_string())),
    }
}

// =============================================================================
// Replies
// =============================================================================

/// One line of output.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feedback: Vec<Feedback>,
}

impl Reply {
    fn success<T: Serialize>(response: CommandResponse<T>) -> Result<Self, ApiError> {
        let data = serde_json::to_value(&response.data)
            .map_err(|e| ApiError::internal(format!("Failed to serialize reply: {}", e)))?;
        Ok(Reply {
            ok: true,
            data: Some(data),
            error: None,
            feedback: response.feedback,
        })
    }

    fn view<T: Serialize>(data: T) -> Result<Self, ApiError> {
        Self::success(CommandResponse::new(data))
    }

    fn failure(error: ApiError) -> Self {
        Reply {
            ok: false,
            data: None,
            feedback: vec![Feedback::error(error.message.clone())],
            error: Some(error),
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Result of handling one line.
#[derive(Debug)]
pub enum Step {
    Skip,
    Reply(Reply),
    Quit,
}

/// Owns the store for the length of a session.
pub struct Shell {
    store: StoreState,
    config: ConfigState,
    pretty: bool,
}

impl Shell {
    pub fn new(store: StoreState, config: ConfigState) -> Self {
        let pretty = config.pretty_json;
        Shell {
            store,
            config,
            pretty,
        }
    }

    /// Forces indented output regardless of config.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = self.pretty || pretty;
        self
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    /// Handles one raw input line.
    pub fn handle_line(&mut self, line: &str) -> Step {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Step::Skip;
        }

        debug!(line, "Shell input");
        let command = match parse_line(line) {
            Ok(Parsed::Command(ShellCommand::Quit)) => return Step::Quit,
            Ok(Parsed::Command(command)) => command,
            Ok(Parsed::Help(text)) => {
                return Step::Reply(Reply::view(text).unwrap_or_else(Reply::failure))
            }
            Err(e) => {
                warn!(line, "Bad command");
                return Step::Reply(Reply::failure(e));
            }
        };

        Step::Reply(self.execute(command).unwrap_or_else(Reply::failure))
    }

    /// Runs a parsed command against the store.
    pub fn execute(&mut self, command: ShellCommand) -> Result<Reply, ApiError> {
        let store = &mut self.store;
        match command {
            ShellCommand::State => Reply::view(store.state()),
            ShellCommand::Config => Reply::view(commands::config::get_config(&self.config)),
            ShellCommand::Referrals => Reply::view(commands::referral::get_referrals(store)),
            ShellCommand::Invite => Reply::success(commands::referral::invite_friend(store)?),
            ShellCommand::Share => Reply::success(commands::referral::share_link()),
            ShellCommand::Scan => {
                Reply::success(commands::internal_referral::scan_referral_qr(store)?)
            }
            ShellCommand::Simulate => {
                Reply::success(commands::referral::simulate_conversion(store)?)
            }
            ShellCommand::Convert { id } => {
                Reply::success(commands::referral::convert_referral(store, id)?)
            }
            ShellCommand::Wallet => Reply::view(commands::wallet::get_wallet(store)),
            ShellCommand::Redeem { kind } => Reply::success(commands::wallet::redeem(store, kind)?),
            ShellCommand::Earn {
                amount,
                description,
                kind,
            } => Reply::success(commands::wallet::add_points(
                store,
                Points::new(amount),
                &description,
                kind.into(),
            )?),
            ShellCommand::Purchase {
                amount,
                description,
            } => Reply::success(commands::wallet::record_purchase(
                store,
                amount,
                &description,
            )?),
            ShellCommand::Challenge { name, amount } => Reply::success(
                commands::wallet::complete_challenge(store, &name, Points::new(amount))?,
            ),
            ShellCommand::Review => Reply::success(commands::wallet::submit_review(store)?),
            ShellCommand::Plans => Reply::view(commands::subscription::get_plans(store)),
            ShellCommand::Subscribe { tier } => {
                Reply::success(commands::subscription::subscribe(store, tier)?)
            }
            ShellCommand::Dashboard => Reply::view(commands::admin::get_dashboard(store)),
            ShellCommand::Quit => Reply::view("bye"),
        }
    }

    /// Reads lines until EOF or `quit`, writing one reply per command.
    ///
    /// Returns the number of replies written.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<usize> {
        let mut replies = 0;

        for line in input.lines() {
            match self.handle_line(&line?) {
                Step::Skip => continue,
                Step::Quit => break,
                Step::Reply(reply) => {
                    if self.pretty {
                        serde_json::to_writer_pretty(&mut output, &reply)?;
                    } else {
                        serde_json::to_writer(&mut output, &reply)?;
                    }
                    writeln!(output)?;
                    output.flush()?;
                    replies += 1;
                }
            }
        }

        Ok(replies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::store;
    use crate::error::ErrorCode;
    use std::io::Cursor;

    fn shell() -> Shell {
        Shell::new(store(), ConfigState::default())
    }

    fn command(line: &str) -> ShellCommand {
        match parse_line(line).unwrap() {
            Parsed::Command(c) => c,
            Parsed::Help(_) => panic!("expected a command for {line:?}"),
        }
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"purchase 49.50 "Yoga class""#).unwrap(),
            vec!["purchase", "49.50", "Yoga class"]
        );
        assert_eq!(
            tokenize("challenge 'Hydration Week'  300").unwrap(),
            vec!["challenge", "Hydration Week", "300"]
        );
        assert_eq!(tokenize(r#"earn 5 """#).unwrap(), vec!["earn", "5", ""]);
        assert!(tokenize(r#"earn 5 "oops"#).is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(command("wallet"), ShellCommand::Wallet);
        assert_eq!(command("convert 3"), ShellCommand::Convert { id: 3 });
        assert_eq!(
            command("redeem session"),
            ShellCommand::Redeem {
                kind: RedemptionKind::Session
            }
        );
        assert_eq!(
            command("subscribe elite-family"),
            ShellCommand::Subscribe {
                tier: SubscriptionTier::EliteFamily
            }
        );
        assert_eq!(
            command("purchase 12.5 Massage"),
            ShellCommand::Purchase {
                amount: Aed::from_fils(1250),
                description: "Massage".to_string()
            }
        );
        assert_eq!(
            command("earn 150 Welcome --kind earning"),
            ShellCommand::Earn {
                amount: 150,
                description: "Welcome".to_string(),
                kind: EntryKind::Earning
            }
        );
        assert_eq!(command("exit"), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let err = parse_line("redeem yacht").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadCommand);
        assert!(parse_line("fly").is_err());
        assert!(parse_line("convert abc").is_err());
    }

    #[test]
    fn test_help_renders_usage() {
        match parse_line("help").unwrap() {
            Parsed::Help(text) => assert!(text.contains("redeem")),
            Parsed::Command(c) => panic!("unexpected command {c:?}"),
        }
    }

    #[test]
    fn test_error_reply_carries_toast() {
        let mut shell = shell();
        let Step::Reply(reply) = shell.handle_line("redeem session") else {
            panic!("expected a reply");
        };
        assert!(!reply.ok);
        assert_eq!(reply.error.as_ref().unwrap().code, ErrorCode::InsufficientBalance);
        assert_eq!(
            reply.feedback,
            vec![Feedback::error("You need 3800 more VWP to redeem this reward")]
        );
    }

    #[test]
    fn test_run_script() {
        let script = "\
# demo session
wallet

simulate
redeem credit
purchase 50 \"Yoga class\"
quit
dashboard
";
        let mut shell = shell();
        let mut out = Vec::new();
        let written = shell.run(Cursor::new(script), &mut out).unwrap();

        assert_eq!(written, 4);
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l["ok"] == true));
        assert_eq!(lines[0]["data"]["balance"], 1200);
        assert_eq!(lines[2]["data"]["balance"], 700);
        assert_eq!(lines[3]["data"]["balance"], 1200);

        // 1200 + 500 - 1000 + 500
        assert_eq!(shell.store().state().user.points, Points::new(1200));
    }
}
