use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tagpath::web::{FetchError, Source};
use tagpath::{full_selector, path, CompileError, Matches, NodeRef, ParseError, Query};
use thiserror::Error;
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Args(#[from] pico_args::Error),
    #[error("missing arguments: file and target")]
    MissingSource,
    #[error("missing argument: target")]
    MissingQuery,
    #[error("unexpected arguments: {0}")]
    Unexpected(String),
    #[error(transparent)]
    Query(#[from] CompileError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("No matches found")]
    NoMatches,
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

struct Args {
    pub source: String,
    pub query: String,
    pub all: bool,
    pub trace: bool,
}

enum Command {
    Help,
    Run(Args),
}

fn main() -> ExitCode {
    let program = program_name();
    let result = parse_args().and_then(|command| match command {
        Command::Help => {
            eprint!("{}", usage(&program));
            Ok(())
        }
        Command::Run(args) => {
            if args.trace {
                tracing_subscriber::fmt::fmt()
                    .with_span_events(FmtSpan::ACTIVE)
                    .with_max_level(Level::DEBUG)
                    .with_env_filter(EnvFilter::from_default_env())
                    .finish()
                    .init();
                info!("Logger initialized");
            }
            run(&args)
        }
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Name of the running executable without directory or extension
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tagpath".to_string())
}

fn usage(program: &str) -> String {
    format!(
        "{0}, generate query selectors
usage:
\t{0} [options] filename|url '<html element>'
options are:
\t-a, --all: print all matches instead of just the first
\t-t, --trace: log what is being done (filtered by RUST_LOG)
\t-h, --help: show this message
",
        program
    )
}

fn parse_args() -> Result<Command, Error> {
    if std::env::args_os().len() <= 1 {
        return Ok(Command::Help);
    }
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }
    let all = pargs.contains(["-a", "--all"]);
    let trace = pargs.contains(["-t", "--trace"]);
    let source: String = pargs.opt_free_from_str()?.ok_or(Error::MissingSource)?;
    let query: String = pargs.opt_free_from_str()?.ok_or(Error::MissingQuery)?;
    let rest = pargs.finish();
    if !rest.is_empty() {
        let rest: Vec<_> = rest.iter().map(|a| a.to_string_lossy()).collect();
        return Err(Error::Unexpected(rest.join(" ")));
    }
    Ok(Command::Run(Args {
        source,
        query,
        all,
        trace,
    }))
}

fn run(args: &Args) -> Result<(), Error> {
    let query = Query::compile(&args.query)?;
    let source = Source::parse(&args.source)?;
    let matches = query.find_in(source.open()?)?;
    let first = matches.first().ok_or(Error::NoMatches)?;
    info!(matches = matches.len(), "Found matches");

    let span = span!(Level::DEBUG, "Printing result");
    let _enter = span.enter();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.all && matches.len() > 1 {
        show_all(&mut out, &matches)?;
    } else {
        show_first(&mut out, &query, first)?;
    }
    out.flush()?;
    Ok(())
}

fn write_path(out: &mut impl Write, node: NodeRef) -> io::Result<()> {
    for entry in path(node) {
        writeln!(out, "{}\n-", entry)?;
    }
    Ok(())
}

fn show_first(out: &mut impl Write, query: &Query, node: NodeRef) -> io::Result<()> {
    writeln!(out, "single selector:\n{}", query.selector())?;
    writeln!(out, "full selector:\n{}", full_selector(node))?;
    writeln!(out, "path:")?;
    write_path(out, node)
}

fn show_all(out: &mut impl Write, matches: &Matches) -> io::Result<()> {
    for (i, node) in matches.iter().enumerate() {
        writeln!(out, "##{}:", i)?;
        writeln!(out, "query selector:\n{}", full_selector(node))?;
        writeln!(out, "\npath:")?;
        write_path(out, node)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><ul class="menu"><li id="a">one</li><li id="b">two</li></ul></body></html>"#;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_first() {
        let query = Query::compile("<li id=b>").unwrap();
        let matches = query.find_in(PAGE.as_bytes()).unwrap();
        let text = render(|out| show_first(out, &query, matches.first().unwrap()));
        assert_eq!(
            text,
            "single selector:\nli#b\nfull selector:\nhtml > body > ul.menu > li#b\npath:\n\
             <html>\n-\n<body>\n-\n<ul class=\"menu\">\n-\n<li id=\"b\">\n-\n"
        );
    }

    #[test]
    fn test_show_all() {
        let query = Query::compile("li").unwrap();
        let matches = query.find_in(PAGE.as_bytes()).unwrap();
        let text = render(|out| show_all(out, &matches));
        assert!(text.starts_with("##0:\nquery selector:\nhtml > body > ul.menu > li#a\n\npath:\n<html>\n-\n"));
        assert!(text.contains("##1:\nquery selector:\nhtml > body > ul.menu > li#b\n"));
        assert!(text.ends_with("<li id=\"b\">\n-\n"));
    }

    #[test]
    fn test_usage_names_program() {
        let text = usage("finder");
        assert!(text.starts_with("finder, generate query selectors\n"));
        assert!(text.contains("\tfinder [options] filename|url '<html element>'\n"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::MissingSource.to_string(), "missing arguments: file and target");
        assert_eq!(Error::MissingQuery.to_string(), "missing argument: target");
        assert_eq!(Error::NoMatches.to_string(), "No matches found");
        assert_eq!(
            Error::from(CompileError::Empty).to_string(),
            "query can't be empty"
        );
    }
}
