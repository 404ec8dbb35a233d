use std::ffi::OsString;
use std::iter;
use std::path::{Path, PathBuf};

use rules_common::args::{self, Args, Error as ArgsError, Help};
use rules_common::config::Layout;
use rules_terminal as term;

pub mod copy;
pub mod error;
pub mod resolve;

pub use copy::CopyPlan;
pub use error::Error;
pub use resolve::{Source, Target};

pub const HELP: Help = Help {
    name: "rules-sync",
    description: env!("CARGO_PKG_DESCRIPTION"),
    version: env!("CARGO_PKG_VERSION"),
    usage: r#"
Usage

    rules-sync --source <path> --target <path | all> [<option>...]

    If <path> given to `--source` is a file, it is copied to
    `<target>/.cline/<file name>`. If it is a directory, its
    `.copilot-instructions.md` is copied to `<target>/.copilot-instructions.md`.

    Nothing is written unless `--no-dry-run` is given.

Options

    --source, -s <path>     Source rules file or rules directory
    --target, -t <path>     Target project path, or `all`
    --dry-run, -n           Print actions without executing (default: true)
    --no-dry-run            Perform the copy
    --execute               Same as `--no-dry-run`
    --verbose, -v           Show resolution details
    --help                  Print help

Configuration

    `Rules.toml` in the working directory, or the file named by
    `RULES_SYNC_CONFIG`, may set `[layout] rules_dir` and
    `[layout] instructions_file`.
"#,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub source: PathBuf,
    pub target: Target,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Args for Options {
    fn from_args(args: Vec<OsString>) -> anyhow::Result<(Self, Vec<OsString>)> {
        use lexopt::prelude::*;

        let mut parser = lexopt::Parser::from_args(args);
        let mut source: Option<PathBuf> = None;
        let mut target: Option<Target> = None;
        let mut dry_run = true;
        let mut verbose = false;
        let mut unparsed = Vec::new();

        while let Some(arg) = parser.next()? {
            match arg {
                Long("source") | Short('s') => {
                    source = Some(PathBuf::from(parser.value()?));
                }
                Long("target") | Short('t') => {
                    target = Some(Target::from(parser.value()?));
                }
                Long("dry-run") | Short('n') => dry_run = true,
                Long("no-dry-run") | Long("execute") => dry_run = false,
                Long("verbose") | Short('v') => {
                    verbose = true;
                }
                Long("help") | Short('h') => {
                    return Err(ArgsError::Help.into());
                }
                arg => {
                    unparsed = iter::once(args::format(arg))
                        .chain(iter::from_fn(|| parser.value().ok()))
                        .collect();

                    break;
                }
            }
        }
        // A stray argument ends parsing, so report it before any flag it hid.
        args::finish(unparsed)?;

        let source = args::required(
            source,
            "source",
            "pass a rules file or directory with `--source <path>`",
        )?;
        let target = args::required(
            target,
            "target",
            "pass a project directory, or `all`, with `--target <path>`",
        )?;

        Ok((
            Options {
                source,
                target,
                dry_run,
                verbose,
            },
            vec![],
        ))
    }
}

/// Result of a successful [`sync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dry run: what would have been copied.
    Previewed(CopyPlan),
    /// The file was copied.
    Copied(CopyPlan),
    /// Syncing to every project is not available yet; nothing was done.
    Unsupported,
}

/// Copy the rules at `source` into `target`, or only plan it when `dry_run` is set.
///
/// The source is checked before the target, so a missing source is reported
/// even when the target is `all`.
pub fn sync(
    source: &Path,
    target: &Target,
    dry_run: bool,
    layout: &Layout,
) -> Result<Outcome, Error> {
    let source = Source::resolve(source)?;
    log::debug!("Resolved source {:?}", source);

    let project = match target.resolve()? {
        Target::All => return Ok(Outcome::Unsupported),
        Target::Project(path) => path,
    };
    log::debug!("Resolved target {}", project.display());

    let plan = source.plan(&project, layout)?;

    if dry_run {
        if !plan.is_ready() {
            log::warn!("Rules file {} does not exist", plan.from.display());
        }
        return Ok(Outcome::Previewed(plan));
    }
    plan.apply()?;

    Ok(Outcome::Copied(plan))
}

pub fn run(options: Options, ctx: impl term::Context) -> anyhow::Result<()> {
    if options.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }
    let config = ctx.config()?;
    let layout = &config.layout;

    if options.dry_run {
        let outcome = sync(&options.source, &options.target, true, layout)?;
        report(&outcome);

        return Ok(());
    }

    let mut spinner = term::spinner("Syncing rules...");
    match sync(&options.source, &options.target, false, layout) {
        Ok(Outcome::Copied(plan)) => {
            spinner.message(synced(&plan));
            spinner.finish();
        }
        Ok(outcome) => {
            spinner.clear();
            report(&outcome);
        }
        Err(err) => {
            spinner.failed();
            return Err(err.into());
        }
    }
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Previewed(plan) => {
            term::info!("{} Would copy:", term::format::badge_secondary("DRY RUN"));
            term::indented(format!("From: {}", plan.from.display()));
            term::indented(format!("To:   {}", plan.to.display()));
            term::tip!("Run again with `--no-dry-run` to copy.");
        }
        Outcome::Copied(plan) => {
            term::success!("{}", synced(plan));
        }
        Outcome::Unsupported => {
            term::info!(
                "{} Sync to all projects is not implemented yet",
                term::format::yellow("!!")
            );
        }
    }
}

fn synced(plan: &CopyPlan) -> String {
    format!(
        "Synced: {} → {}",
        term::format::highlight(plan.name()),
        plan.to.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use rules_common::config::Config;
    use rules_common::test::{self, setup};

    fn parse(args: &[&str]) -> anyhow::Result<Options> {
        let args = args.iter().map(OsString::from).collect();
        let (options, unparsed) = Options::from_args(args)?;
        args::finish(unparsed)?;

        Ok(options)
    }

    #[test]
    fn dry_run_is_the_default() {
        let options = parse(&["--source", "rules.md", "--target", "proj"]).unwrap();

        assert_eq!(
            options,
            Options {
                source: PathBuf::from("rules.md"),
                target: Target::Project(PathBuf::from("proj")),
                dry_run: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn last_dry_run_flag_wins() {
        let dry_run = |args: &[&str]| parse(args).unwrap().dry_run;

        assert!(!dry_run(&["-s", "a", "-t", "b", "--dry-run", "--no-dry-run"]));
        assert!(dry_run(&["-s", "a", "-t", "b", "--execute", "--dry-run"]));
        assert!(!dry_run(&["-s", "a", "-t", "b", "--execute"]));
    }

    #[test]
    fn target_all_is_recognized() {
        let options = parse(&["--source=a", "--target=all"]).unwrap();

        assert_eq!(options.target, Target::All);
    }

    #[test]
    fn missing_flags_are_reported() {
        let err = parse(&["--target", "proj"]).unwrap_err();
        assert!(err.to_string().contains("'--source'"), "{}", err);

        let err = parse(&["--source", "rules.md"]).unwrap_err();
        assert!(err.to_string().contains("'--target'"), "{}", err);
    }

    #[test]
    fn stray_arguments_are_rejected() {
        let err = parse(&["-s", "a", "-t", "b", "extra"]).unwrap_err();

        assert_eq!(err.to_string(), "unexpected argument `extra`");
    }

    #[test]
    fn stray_argument_is_reported_before_missing_flags() {
        let err = parse(&["extra", "--source", "a", "--target", "b"]).unwrap_err();
        assert_eq!(err.to_string(), "unexpected argument `extra`");

        let err = parse(&["-s", "a", "extra", "-t", "b"]).unwrap_err();
        assert_eq!(err.to_string(), "unexpected argument `extra`");
    }

    #[test]
    fn help_is_requested() {
        let err = parse(&["--help"]).unwrap_err();

        assert!(matches!(err.downcast_ref::<ArgsError>(), Some(ArgsError::Help)));
    }

    #[test]
    fn file_source_is_copied_into_rules_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_file(tmp.path(), "style.md").unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();

        let target = Target::Project(project.clone());
        let outcome = sync(&source, &target, false, &Layout::default()).unwrap();

        let dest = project.join(".cline").join("style.md");
        assert!(matches!(outcome, Outcome::Copied(_)));
        assert_eq!(fs::read(&dest).unwrap(), fs::read(&source).unwrap());
    }

    #[test]
    fn directory_source_copies_instructions_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_dir(tmp.path()).unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();

        let target = Target::Project(project.clone());
        sync(&source, &target, false, &Layout::default()).unwrap();

        let dest = project.join(".copilot-instructions.md");
        assert_eq!(fs::read_to_string(dest).unwrap(), test::RULES_CONTENT);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_file(tmp.path(), "style.md").unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();
        let before = test::tree(tmp.path()).unwrap();

        let target = Target::Project(project.clone());
        let outcome = sync(&source, &target, true, &Layout::default()).unwrap();

        assert_eq!(test::tree(tmp.path()).unwrap(), before);
        match outcome {
            Outcome::Previewed(plan) => {
                let project = project.canonicalize().unwrap();
                assert_eq!(plan.to, project.join(".cline").join("style.md"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn dry_run_of_directory_without_instructions_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::project(tmp.path(), "rules").unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();
        let before = test::tree(tmp.path()).unwrap();

        let outcome = sync(&source, &Target::Project(project), true, &Layout::default()).unwrap();

        assert!(matches!(outcome, Outcome::Previewed(ref plan) if !plan.is_ready()));
        assert_eq!(test::tree(tmp.path()).unwrap(), before);
    }

    #[test]
    fn directory_without_instructions_fails_live() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::project(tmp.path(), "rules").unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();

        let target = Target::Project(project.clone());
        let err = sync(&source, &target, false, &Layout::default()).unwrap_err();

        assert!(matches!(err, Error::Copy { .. }), "{:?}", err);
        assert!(test::tree(&project).unwrap().is_empty());
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();

        let missing = tmp.path().join("missing");
        let target = Target::Project(project.clone());

        for dry_run in [true, false] {
            let err = sync(&missing, &target, dry_run, &Layout::default()).unwrap_err();
            assert!(matches!(err, Error::SourceNotFound(_)), "{:?}", err);
        }
        assert!(test::tree(&project).unwrap().is_empty());
    }

    #[test]
    fn missing_target_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_file(tmp.path(), "style.md").unwrap();

        let target = Target::Project(tmp.path().join("proj"));

        for dry_run in [true, false] {
            let err = sync(&source, &target, dry_run, &Layout::default()).unwrap_err();
            assert!(matches!(err, Error::TargetNotFound(_)), "{:?}", err);
        }
        assert!(!tmp.path().join("proj").exists());
    }

    #[test]
    fn all_target_is_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_file(tmp.path(), "style.md").unwrap();
        let before = test::tree(tmp.path()).unwrap();

        for dry_run in [true, false] {
            let outcome = sync(&source, &Target::All, dry_run, &Layout::default()).unwrap();
            assert_eq!(outcome, Outcome::Unsupported);
        }
        assert_eq!(test::tree(tmp.path()).unwrap(), before);
    }

    #[test]
    fn run_uses_configured_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let source = setup::rules_file(tmp.path(), "style.md").unwrap();
        let project = setup::project(tmp.path(), "proj").unwrap();
        let config = Config {
            layout: Layout {
                rules_dir: ".assistant".to_owned(),
                ..Layout::default()
            },
        };
        let options = Options {
            source,
            target: Target::Project(project.clone()),
            dry_run: false,
            verbose: false,
        };

        run(options, config).unwrap();

        assert!(project.join(".assistant").join("style.md").is_file());
        assert!(!project.join(".cline").exists());
    }
}
