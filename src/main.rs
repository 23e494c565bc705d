use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use branchcheck::{
    check, color_enabled_stderr, color_enabled_stdout, execute, exit_code_for_error,
    log_error_stderr, log_info_stderr, log_warn_stderr, paint, report, set_color_mode, Action,
    BranchError, GitRunner, Settings,
};

mod cli;
use cli::Cli;

fn parse_cli() -> Result<Cli, ExitCode> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            Err(ExitCode::SUCCESS)
        }
        Err(e) => {
            // Wrong arity or bad flags: usage to stderr, exit 1, no repository access.
            let err = BranchError::Usage(e.to_string());
            eprint!("{err}");
            eprintln!("Example: branchcheck feature/new-feature");
            Err(ExitCode::from(exit_code_for_error(&err)))
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    #[cfg(feature = "trace")]
    branchcheck::telemetry::init(cli.verbose);

    let settings = match Settings::from_env(cli.overrides()) {
        Ok(s) => s,
        Err(e) => {
            let err = BranchError::Usage(format!("{e:#}"));
            log_error_stderr(color_enabled_stderr(), &format!("branchcheck: {err}"));
            return ExitCode::from(exit_code_for_error(&err));
        }
    };
    set_color_mode(settings.color);
    let use_err = color_enabled_stderr();
    let use_out = color_enabled_stdout();

    let runner = GitRunner::new(&settings.git, &settings.workdir, settings.timeout);
    if cli.verbose {
        log_info_stderr(
            use_err,
            &format!("branchcheck: workdir: {}", runner.workdir().display()),
        );
        log_info_stderr(use_err, &format!("branchcheck: git: {}", runner.git().display()));
        log_info_stderr(
            use_err,
            &format!("branchcheck: timeout: {}s", runner.timeout().as_secs()),
        );
    }
    let decision = check(&runner, &cli.branch);

    if cli.verbose {
        log_info_stderr(
            use_err,
            &format!("branchcheck: decision: {}", decision.action.as_str()),
        );
    }

    if cli.json {
        return match report::to_json(&decision) {
            Ok(s) => {
                println!("{s}");
                if decision.can_proceed {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            Err(e) => {
                log_error_stderr(use_err, &format!("branchcheck: {e}"));
                ExitCode::from(1)
            }
        };
    }

    for line in report::status_lines(&decision, use_out) {
        println!("{line}");
    }

    match decision.action {
        Action::Blocked(blocker) => {
            return ExitCode::from(exit_code_for_error(&BranchError::from(blocker)));
        }
        Action::AlreadyOnBranch => {
            println!(
                "{}",
                paint(use_out, "\x1b[32m", "✅ Already on the target branch.")
            );
            return ExitCode::SUCCESS;
        }
        Action::Switch | Action::Create => {}
    }

    if cli.check {
        return ExitCode::SUCCESS;
    }

    if cli.yes && cli.verbose {
        log_warn_stderr(use_err, "branchcheck: --yes given; skipping confirmation");
    }
    let confirmed = cli.yes || {
        let stdin = io::stdin();
        branchcheck::prompt::confirm(&mut stdin.lock(), &mut io::stdout())
    };
    if !confirmed {
        println!("Operation cancelled.");
        return ExitCode::SUCCESS;
    }

    match execute(&runner, &decision) {
        Ok(msg) => {
            println!("{}", paint(use_out, "\x1b[32m", &format!("✅ {msg}")));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", paint(use_out, "\x1b[31;1m", &format!("❌ {e}")));
            ExitCode::from(exit_code_for_error(&e))
        }
    }
}
