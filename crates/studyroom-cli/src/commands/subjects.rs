use std::path::PathBuf;

use clap::Args;
use studyroom_core::SubjectSheet;

use super::CommandResult;

#[derive(Args)]
pub struct SubjectsArgs {
    /// Subject sheet (.json or .toml)
    pub sheet: PathBuf,
    /// Print subjects as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SubjectsArgs) -> CommandResult {
    let sheet = SubjectSheet::load(&args.sheet)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(sheet.subjects())?);
        return Ok(());
    }

    if sheet.is_empty() {
        println!("No subjects.");
        return Ok(());
    }
    for subject in sheet.subjects() {
        println!("{subject} | {:.1}h left", subject.remaining_hours());
    }
    Ok(())
}
