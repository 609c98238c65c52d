use clap::Parser;
use flagscan::{Config, FlagTable, ParsedResult, parse_with, split_passthrough, usage};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser, Debug)]
#[command(version, about = "Check an argument vector against a flag table")]
struct Cli {
    #[command(flatten)]
    config: Config,
    #[arg(short, long, help = "JSON flag table, - for stdin")]
    table: PathBuf,
    #[arg(long, help = "Print the usage line of the table and exit")]
    usage: bool,
    #[arg(long, help = "Print the result as JSON")]
    json: bool,
    #[arg(last = true)]
    args: Vec<String>,
}

fn load_table(path: &Path) -> Result<FlagTable, flagscan::Error> {
    let text = if path == Path::new("-") {
        io::read_to_string(io::stdin().lock())?
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_human(
    result: &ParsedResult,
    passthrough: &[String],
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "flags:")?;
    for (name, value) in result.flags() {
        writeln!(out, "  {name} = {value}")?;
    }
    writeln!(out, "positionals: {:?}", result.positionals())?;
    if !passthrough.is_empty() {
        writeln!(out, "passthrough: {passthrough:?}")?;
    }
    Ok(())
}

fn run(cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), flagscan::Error> {
    let table = load_table(&cli.table)?;

    if cli.config.verbose {
        for flag in table.shadowed() {
            writeln!(
                err,
                "warning: table entry {} is shadowed by an earlier entry",
                flag.name()
            )?;
        }
    }

    if cli.usage {
        usage::write_usage(&table, &cli.config, out)?;
        return Ok(());
    }

    let (args, passthrough) = split_passthrough(&cli.args, "--");
    let result = match parse_with(&table, args, &cli.config) {
        Ok(result) => result,
        Err(e) => {
            usage::report(&e, &table, &cli.config, err)?;
            return Err(e.into());
        }
    };

    if cli.json {
        let json = serde_json::json!({
            "flags": result.flags(),
            "positionals": result.positionals(),
            "passthrough": passthrough,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
    } else {
        print_human(&result, passthrough, out)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match run(&cli, &mut stdout, &mut stderr) {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported with usage information
        Err(flagscan::Error::Parse(..)) => ExitCode::FAILURE,
        Err(ref e) => {
            // Nothing sensible to do if stderr is gone
            let _ = flagscan::print_error(e, &mut stderr);
            ExitCode::FAILURE
        }
    }
}
