use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use yacc2ebnf::{optimize_grammar, parse_ebnf, parse_yacc, print_grammar};

/// Convert a yacc grammar into W3C EBNF for syntax diagram rendering.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Yacc grammar file; rules are read from between the %% separators
    grammar: PathBuf,

    /// EBNF file supplying definitions for lexical terminals
    #[arg(short, long, value_name = "FILE")]
    terminals: Option<PathBuf>,

    /// Maximum output line width
    #[arg(short, long, default_value_t = 80)]
    width: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(()) => ExitCode::FAILURE,
    }
}

fn run(cli: &Cli) -> Result<String, ()> {
    let grammar_file = cli.grammar.display().to_string();
    let yacc_src = read(&cli.grammar)?;
    let section = grammar_section(&yacc_src);

    let (grammar, leftover) = match parse_yacc(section) {
        Ok(parsed) => parsed,
        Err(e) => {
            e.emit(&grammar_file, section);
            return Err(());
        }
    };
    if let Some(leftover) = leftover {
        eprintln!("{grammar_file}: warning: {leftover}");
    }

    let auxiliary = if let Some(path) = &cli.terminals {
        let terminals_file = path.display().to_string();
        let ebnf_src = read(path)?;
        match parse_ebnf(&ebnf_src) {
            Ok((productions, leftover)) => {
                if let Some(leftover) = leftover {
                    eprintln!("{terminals_file}: warning: {leftover}");
                }
                productions
            }
            Err(e) => {
                e.emit(&terminals_file, &ebnf_src);
                return Err(());
            }
        }
    } else {
        vec![]
    };

    let aux_names: Vec<&str> = auxiliary.iter().map(|p| p.name.as_str()).collect();
    for (definer, referent) in grammar.undefined_references(&aux_names) {
        eprintln!(
            "{grammar_file}: warning: `{definer}` references `{referent}`, which has no definition"
        );
    }

    let productions = optimize_grammar(&grammar, &auxiliary);
    Ok(print_grammar(&productions, cli.width))
}

fn read(path: &Path) -> Result<String, ()> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("{}: {e}", path.display());
    })
}

/// The rules live between the first bare `%%` line and the next one (or end
/// of file). A file with no separator is taken whole.
fn grammar_section(src: &str) -> &str {
    let mut start = None;
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if line.trim() == "%%" {
            match start {
                None => start = Some(offset),
                Some(begin) => return &src[begin..line_start],
            }
        }
    }
    match start {
        Some(begin) => &src[begin..],
        None => src,
    }
}
