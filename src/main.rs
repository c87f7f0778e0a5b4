use std::env;
use std::io;
use std::process;

use hsh::error::ShellError;
use hsh::flags::Flags;
use hsh::shell::Shell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HSH_LOG";

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(program: &str, args: &[String]) -> Result<i32, ShellError> {
    let mut flags = Flags::new();
    flags.parse(args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("hsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    init_logging(flags.is_set("debug"));

    let mut shell = Shell::from_flags(program, &flags)?;
    shell.run()
}

fn main() {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "hsh".to_string());
    let args: Vec<String> = args.collect();

    let code = match run(&program, &args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            e.exit_code()
        }
    };
    process::exit(code);
}
