//! CLI entry point for mailcat.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use humansize::{format_size, BINARY};

use mailcat::config::{self, Config};
use mailcat::deliver::{self, Credentials, SmtpRelay};
use mailcat::model::attachment::Attachment;
use mailcat::model::envelope::Envelope;
use mailcat::{compose, provider};

#[derive(Parser)]
#[command(
    name = "mailcat",
    version,
    about = "Send a single email through an SMTP relay",
    long_about = "Send a single email (HTML body, optional attachments) through an \
                  SMTP relay, authenticating with a username and auth code and \
                  retrying failed submissions a bounded number of times."
)]
struct Cli {
    /// SMTP server name (e.g. 163, qq) or submission URL
    #[arg(short = 's', long, value_name = "NAME_OR_URL")]
    smtp_server: Option<String>,

    /// Account on the SMTP server
    #[arg(short = 'u', long, value_name = "NAME")]
    user_account: Option<String>,

    /// Auth code of the account
    #[arg(short = 'a', long, value_name = "CODE")]
    auth_code: Option<String>,

    /// Sender of the email
    #[arg(short = 'f', long, value_name = "EMAIL_FROM")]
    from: Option<String>,

    /// Recipients of the email (comma-separated for several)
    #[arg(short = 't', long, value_name = "EMAIL_TO")]
    to: Option<String>,

    /// Subject for the email
    #[arg(short = 'S', long, value_name = "SUBJECT")]
    subject: Option<String>,

    /// Attachment for the email (repeat for several: -A 1.txt -A 2.txt)
    #[arg(short = 'A', long = "attachment", value_name = "FILE")]
    attachments: Vec<PathBuf>,

    /// Body of the email (HTML)
    #[arg(value_name = "BODY")]
    body: Option<String>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions and exit
    #[arg(long, value_enum, exclusive = true, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// Generate a man page and exit
    #[arg(long, exclusive = true)]
    manpage: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        return cmd_completions(shell);
    }
    if cli.manpage {
        return cmd_manpage();
    }

    // Load configuration
    let config = config::load_config();

    // Configure logging: stderr + log file in the cache directory
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _guard = setup_logging(log_level, &config);

    run(cli, &config)
}

/// The whole pipeline: resolve flags, load attachments, compose, deliver.
fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    // Flags fall back to config defaults, then missing required ones are
    // reported together.
    let smtp_server = cli.smtp_server.or_else(|| config.smtp.server.clone());
    let user_account = cli.user_account.or_else(|| config.smtp.user_account.clone());
    let auth_code = cli.auth_code;
    let from = cli.from.or_else(|| config.smtp.from.clone());
    let to = cli.to;

    let mut missing = Vec::new();
    if smtp_server.is_none() {
        missing.push("--smtp-server (-s)");
    }
    if user_account.is_none() {
        missing.push("--user-account (-u)");
    }
    if auth_code.is_none() {
        missing.push("--auth-code (-a)");
    }
    if from.is_none() {
        missing.push("--from (-f)");
    }
    if to.is_none() {
        missing.push("--to (-t)");
    }
    if cli.body.is_none() {
        missing.push("<BODY>");
    }
    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required arguments:\n {}\n\nUse --help or -h to check usage.",
            missing.join("\n ")
        );
    }

    // All checked above; destructure without unwrap gymnastics.
    let (Some(smtp_server), Some(user_account), Some(auth_code), Some(from), Some(to), Some(body)) =
        (smtp_server, user_account, auth_code, from, to, cli.body)
    else {
        unreachable!("missing arguments reported above");
    };

    let endpoint = provider::resolve_endpoint(&smtp_server, &config.providers);
    tracing::debug!(server = %smtp_server, endpoint = %endpoint, "Resolved relay endpoint");

    // Load attachments before any network activity; abort the whole send
    // on the first unreadable file.
    let mut attachments = Vec::with_capacity(cli.attachments.len());
    for path in &cli.attachments {
        let att = Attachment::load(path)?;
        tracing::info!(
            filename = %att.filename,
            encoded_size = %format_size(att.content.len() as u64, BINARY),
            "Loaded attachment"
        );
        attachments.push(att);
    }

    let envelope = Envelope {
        from: from.clone(),
        to: to.clone(),
        subject: cli.subject.unwrap_or_default(),
        html_body: body,
        attachments,
    };
    let message = compose::compose(&envelope);
    tracing::debug!(
        size = %format_size(message.len() as u64, BINARY),
        "Composed message"
    );

    let credentials = Credentials {
        username: user_account,
        auth_code,
    };
    let mut relay = SmtpRelay::open(&endpoint, &credentials, &from, &to)?;

    let policy = config.delivery.retry_policy();
    let outcome = deliver::deliver(&mut relay, &message, &policy);

    if outcome.succeeded {
        println!(
            "Email sent successfully ({} attempt{}).",
            outcome.attempts_used,
            if outcome.attempts_used == 1 { "" } else { "s" }
        );
        Ok(())
    } else {
        anyhow::bail!(
            "Delivery failed after {} attempt(s): {}",
            outcome.attempts_used,
            outcome.last_error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
}

/// Set up tracing with stderr output and optional file logging.
///
/// Returns the appender guard; dropping it flushes the log file.
fn setup_logging(
    level: &str,
    config: &Config,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailcat.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        Some(guard)
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailcat", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
