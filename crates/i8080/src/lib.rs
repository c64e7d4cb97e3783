use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use i8080_cpm::{run_com_file, CpmConfig, TestReport};

/// Command line options of the `i8080` runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub config: CpmConfig,
    pub programs: Vec<PathBuf>,
}

pub const USAGE: &str = "\
Usage: i8080 [--require-success] [--cycle-limit N] PROGRAM.COM...

Runs CP/M 8080 test programs (e.g. TST8080.COM, CPUTEST.COM, 8080PRE.COM,
8080EXM.COM) one after another and stops at the first failure.

  --require-success   fail a program that never prints through BDOS function 9
  --cycle-limit N     abort a program after N clock cycles";

/// Parse the arguments following the program name.
pub fn parse_args<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut require_success = false;
    let mut cycle_limit = None;
    let mut programs = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--require-success" => require_success = true,
            "--cycle-limit" => {
                let value = args.next().context("--cycle-limit needs a value")?;
                let limit: u64 = value
                    .parse()
                    .with_context(|| format!("invalid cycle limit '{}'", value))?;
                cycle_limit = Some(limit);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            path => programs.push(PathBuf::from(path)),
        }
    }

    if programs.is_empty() {
        bail!("no program given");
    }

    let config = CpmConfig {
        require_success,
        cycle_limit,
        ..CpmConfig::default()
    };
    Ok(Options { config, programs })
}

/// Run every program in order, echoing BDOS console output to `console`.
pub fn run<W: Write>(options: &Options, mut console: W) -> Result<Vec<TestReport>> {
    let mut reports = Vec::with_capacity(options.programs.len());

    for path in &options.programs {
        writeln!(console, "\n*********************************")?;
        writeln!(console, "Running {}", path.display())?;

        let report = run_com_file(path, options.config.clone(), &mut console)?;
        writeln!(
            console,
            "\nJump to 0000 from {:04X} ({} instructions, {} cycles)",
            report.exit_from, report.instructions, report.cycles
        )?;
        reports.push(report);
    }

    Ok(reports)
}
