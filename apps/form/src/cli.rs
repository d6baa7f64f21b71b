//! Command-line front end for the application form.
//!
//! Each invocation loads the saved draft, applies one action through the
//! form controller (which persists it), and prints the result.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::config::Config;
use crate::draft::FileStore;
use crate::editing::PRESET_SKILLS;
use crate::form::{FormController, SubmitBlocked, SubmitReport};
use crate::models::{FieldEdit, FieldId};
use crate::submission::{CvAttachment, HttpSubmissionClient};

#[derive(Parser)]
#[command(name = "recruit-form")]
#[command(version)]
#[command(about = "Fill in, save, and submit a recruitment application")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the saved draft
    Show,
    /// Set a form field, e.g. `set fullName "Ada Obi"` or `set ukHours Partially`
    Set { field: String, value: String },
    /// Manage the skill set
    #[command(subcommand)]
    Skill(SkillCommand),
    /// Manage portfolio link slots
    #[command(subcommand)]
    Link(LinkCommand),
    /// Check the draft without submitting
    Validate,
    /// Validate and send the application
    Submit {
        /// CV to attach (PDF or Word)
        #[arg(long)]
        cv: Option<PathBuf>,
    },
    /// Discard the saved draft
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Select a skill, or deselect it if already selected
    Toggle { name: String },
    /// Add a skill that is not in the preset list
    Add { name: String },
    Remove { name: String },
    /// List the preset skills
    Presets,
}

#[derive(Subcommand)]
pub enum LinkCommand {
    /// Add an empty slot
    Add,
    Set { index: usize, value: String },
    Remove { index: usize },
}

pub async fn run(cli: Cli, config: &Config) -> Result<ExitCode> {
    let mut form = FormController::new(FileStore::new(&config.draft_path));
    form.load();

    match cli.command {
        Commands::Show => show(&form)?,
        Commands::Set { field, value } => {
            let field: FieldId = field
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown field '{field}'"))?;
            form.edit(FieldEdit::parse(field, &value)?);
            println!("{field} updated");
        }
        Commands::Skill(cmd) => skill(&mut form, cmd),
        Commands::Link(cmd) => link(&mut form, cmd)?,
        Commands::Validate => {
            if !form.validate() {
                print_errors(&form);
                return Ok(ExitCode::FAILURE);
            }
            println!("Draft is ready to submit");
        }
        Commands::Submit { cv } => return submit(&mut form, config, cv).await,
        Commands::Clear { yes } => {
            if form.clear_draft(|| yes || confirm("Clear all saved form data?")) {
                println!("Saved form data cleared");
            } else {
                println!("Nothing cleared");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn show(form: &FormController<FileStore>) -> Result<()> {
    let view = json!({
        "draft": form.draft(),
        "skills": form.skills(),
        "portfolioLinks": form.portfolio_links(),
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn skill(form: &mut FormController<FileStore>, cmd: SkillCommand) {
    match cmd {
        SkillCommand::Toggle { name } => {
            if form.toggle_skill(&name) {
                println!("Selected {name}");
            } else {
                println!("Deselected {name}");
            }
        }
        SkillCommand::Add { name } => {
            if form.add_custom_skill(&name) {
                println!("Added {}", name.trim());
            } else {
                println!("Skill is blank or already selected");
            }
        }
        SkillCommand::Remove { name } => {
            if !form.remove_skill(&name) {
                println!("{name} was not selected");
            }
        }
        SkillCommand::Presets => {
            for preset in PRESET_SKILLS {
                let mark = if form.skills().contains(preset) { "x" } else { " " };
                println!("[{mark}] {preset}");
            }
        }
    }
}

fn link(form: &mut FormController<FileStore>, cmd: LinkCommand) -> Result<()> {
    match cmd {
        LinkCommand::Add => form.add_portfolio_slot(),
        LinkCommand::Set { index, value } => form.set_portfolio_link(index, &value)?,
        LinkCommand::Remove { index } => {
            if !form.remove_portfolio_link(index)? {
                println!("At least one portfolio slot must remain");
            }
        }
    }
    for (i, slot) in form.portfolio_links().slots().iter().enumerate() {
        println!("{i}: {slot}");
    }
    Ok(())
}

async fn submit(
    form: &mut FormController<FileStore>,
    config: &Config,
    cv: Option<PathBuf>,
) -> Result<ExitCode> {
    if let Some(path) = cv {
        let attachment = CvAttachment::from_path(&path)
            .with_context(|| format!("Could not attach {}", path.display()))?;
        form.attach_cv(attachment);
    }

    let client = HttpSubmissionClient::new(config.api_url.clone(), config.submit_timeout)?;
    match form.submit(&client).await {
        SubmitReport::Submitted => {
            if let Some(message) = form.success_banner() {
                println!("{message}");
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitReport::Blocked(SubmitBlocked::Invalid) | SubmitReport::Rejected => {
            print_errors(form);
            Ok(ExitCode::FAILURE)
        }
        SubmitReport::Blocked(blocked) => {
            eprintln!("Submission not started: {blocked:?}");
            Ok(ExitCode::FAILURE)
        }
        SubmitReport::Failed => {
            print_errors(form);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_errors(form: &FormController<FileStore>) {
    if let Some(first) = form.errors().first() {
        eprintln!("Fix {} first:", first.field);
    }
    for error in form.errors().as_slice() {
        eprintln!("  {}: {}", error.field, error.message);
    }
    if let Some(message) = form.form_message() {
        eprintln!("{message}");
    }
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_set_command() {
        let cli = Cli::try_parse_from(["recruit-form", "set", "ukHours", "Partially"]).unwrap();
        match cli.command {
            Commands::Set { field, value } => {
                assert_eq!(field, "ukHours");
                assert_eq!(value, "Partially");
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn test_cli_parses_nested_link_command() {
        let cli = Cli::try_parse_from(["recruit-form", "link", "set", "1", "ada.dev"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Link(LinkCommand::Set { index: 1, .. })
        ));
    }

    #[test]
    fn test_cli_parses_submit_with_cv() {
        let cli = Cli::try_parse_from(["recruit-form", "submit", "--cv", "cv.pdf"]).unwrap();
        match cli.command {
            Commands::Submit { cv } => assert_eq!(cv, Some(PathBuf::from("cv.pdf"))),
            _ => panic!("expected submit"),
        }
    }

    #[tokio::test]
    async fn test_run_edits_persist_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_url: "http://127.0.0.1:9/submit".into(),
            draft_path: dir.path().join("draft.json"),
            submit_timeout: None,
            rust_log: "info".into(),
        };

        for args in [
            vec!["recruit-form", "set", "fullName", "Ada Obi"],
            vec!["recruit-form", "skill", "toggle", "Figma"],
            vec!["recruit-form", "link", "set", "0", "ada.design"],
        ] {
            run(Cli::try_parse_from(args).unwrap(), &config).await.unwrap();
        }

        let mut form = FormController::new(FileStore::new(&config.draft_path));
        form.load();
        assert_eq!(form.draft().full_name, "Ada Obi");
        assert_eq!(form.skills().as_slice(), ["Figma"]);
        assert_eq!(form.draft().portfolio, ["ada.design"]);

        run(
            Cli::try_parse_from(["recruit-form", "clear", "--yes"]).unwrap(),
            &config,
        )
        .await
        .unwrap();
        let mut form = FormController::new(FileStore::new(&config.draft_path));
        form.load();
        assert!(form.skills().is_empty());
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_url: "http://127.0.0.1:9/submit".into(),
            draft_path: dir.path().join("draft.json"),
            submit_timeout: None,
            rust_log: "info".into(),
        };
        let cli = Cli::try_parse_from(["recruit-form", "set", "favouriteColour", "green"]).unwrap();
        assert!(run(cli, &config).await.is_err());
    }
}
