use anyhow::{anyhow, Context, Result};
use getopts::Options;
use letters::{strip_email_attachments, Email, EmailParser, ParseOptions};
use log::debug;
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use std::env;
use std::fs::File;
use std::io;
use std::io::{Read, Write};
use std::path::Path;

mod store;

// Command line option names
const OPT_HELP: &str = "help";
const OPT_SKIP_ATTACHMENTS: &str = "skip-attachments";
const OPT_OUTPUT: &str = "output";
const OPT_RAW: &str = "raw";
const OPT_VERBOSE: &str = "verbose";

fn setup_logger(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Try to create a terminal logger, if this fails use a simple logger
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .or_else(|_| SimpleLogger::init(log_level, Config::default()))
    .map_err(|err| anyhow!("Cannot initialize logger: {}", err))
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options] [FILE]", program);
    print!("{}", opts.usage(&brief));
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut message = Vec::new();
    match path {
        Some(path) => File::open(path)
            .and_then(|mut file| file.read_to_end(&mut message))
            .with_context(|| format!("Cannot read {}", path))?,
        None => io::stdin()
            .read_to_end(&mut message)
            .context("Cannot read stdin")?,
    };
    debug!("Read {} bytes", message.len());
    Ok(message)
}

fn print_summary(email: &Email) {
    let headers = &email.headers;
    let fields = [
        ("From", &headers.from),
        ("To", &headers.to),
        ("Date", &headers.date),
        ("Subject", &headers.subject),
    ];
    for (name, value) in fields.iter() {
        if let Some(value) = value {
            println!("{}: {}", name, String::from_utf8_lossy(value));
        }
    }
    let bodies = [
        ("text/plain", &email.text),
        ("text/enriched", &email.enriched_text),
        ("text/html", &email.html),
    ];
    for (name, body) in bodies.iter() {
        if let Some(body) = body {
            println!("{}: {} characters", name, body.chars().count());
        }
    }
    for file in &email.inline_files {
        println!(
            "inline <{}> {} {} bytes",
            file.content_id,
            file.content_type.mime_type,
            file.data.len()
        );
    }
    for file in &email.attached_files {
        println!(
            "attachment {} {} {} bytes",
            file.filename.as_deref().unwrap_or("(unnamed)"),
            file.content_type.mime_type,
            file.data.len()
        );
    }
    if let Some(text) = &email.text {
        println!();
        print!("{}", text);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optflag("h", OPT_HELP, "print this help menu");
    opts.optflag(
        "s",
        OPT_SKIP_ATTACHMENTS,
        "do not decode inline or attached files",
    );
    opts.optopt(
        "o",
        OPT_OUTPUT,
        "the directory to write decoded files to",
        "DIR",
    );
    opts.optflag(
        "r",
        OPT_RAW,
        "check that the message parses and print it unchanged",
    );
    opts.optflag("v", OPT_VERBOSE, "log debug information to stderr");
    let matches = opts
        .parse(&args[1..])
        .map_err(|err| anyhow!("Error parsing command line: {}", err))?;
    if matches.opt_present(OPT_HELP) {
        print_usage(&args[0], &opts);
        return Ok(());
    }
    setup_logger(matches.opt_present(OPT_VERBOSE))?;
    let message = read_input(matches.free.first().map(String::as_str))?;
    if matches.opt_present(OPT_RAW) {
        let raw = strip_email_attachments(&message[..])?;
        return io::stdout()
            .write_all(&raw)
            .context("Cannot write message");
    }
    let options =
        ParseOptions::new().with_skip_attachments(matches.opt_present(OPT_SKIP_ATTACHMENTS));
    let email = EmailParser::new(options).parse_bytes(&message)?;
    print_summary(&email);
    if let Some(dir) = matches.opt_str(OPT_OUTPUT) {
        store::save_files(Path::new(&dir), &email)
            .with_context(|| format!("Cannot save files to {}", dir))?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
