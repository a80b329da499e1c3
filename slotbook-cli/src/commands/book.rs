//! Book command implementation.
//!
//! Books a resource for one person (`--name`/`--age`) or a team
//! (`--team`/`--member`), or from a JSON request document.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use slotbook::operations::{create_booking, BookingOptions, BookingRequest};
use slotbook::{Gender, GroupDescriptor, PersonDescriptor, ResourceCategory};
use std::io::Read;
use std::path::PathBuf;

/// Book a room or desk for one slot.
#[derive(Args)]
pub struct BookCommand {
    /// Resource category
    #[arg(long, value_enum, ignore_case = true, required_unless_present = "request")]
    pub room_type: Option<ResourceCategory>,

    /// Slot start, e.g. 2030-01-07T10:00
    #[arg(long, value_name = "DATETIME", required_unless_present = "request")]
    pub slot: Option<String>,

    /// Name of the person booking
    #[arg(long, value_name = "NAME", conflicts_with = "team")]
    pub name: Option<String>,

    /// Age of the person booking
    #[arg(long, value_name = "YEARS", allow_negative_numbers = true, requires = "name")]
    pub age: Option<i64>,

    /// Gender of the person booking (M, F or O)
    #[arg(long, value_name = "GENDER", value_parser = parse_gender, requires = "name")]
    pub gender: Option<Gender>,

    /// Name of the team booking
    #[arg(long, value_name = "TEAM", requires = "member")]
    pub team: Option<String>,

    /// Team member as NAME:AGE[:GENDER] (repeatable)
    #[arg(long, value_name = "MEMBER", value_parser = parse_member, requires = "team")]
    pub member: Vec<PersonDescriptor>,

    /// Read the request from a JSON file (`-` for stdin)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["room_type", "slot", "name", "team"]
    )]
    pub request: Option<PathBuf>,

    /// Print the receipt as JSON
    #[arg(long)]
    pub json: bool,

    /// Decide the booking without saving it
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_gender(text: &str) -> Result<Gender, String> {
    text.parse().map_err(|e: slotbook::ValidationError| e.message)
}

/// Parse `NAME:AGE[:GENDER]`.
fn parse_member(text: &str) -> Result<PersonDescriptor, String> {
    let mut parts = text.split(':');
    let name = parts.next().unwrap_or_default().trim();
    let age = parts
        .next()
        .ok_or_else(|| format!("'{text}' is missing an age (expected NAME:AGE[:GENDER])"))?;
    let age: i64 = age
        .trim()
        .parse()
        .map_err(|_| format!("'{age}' is not an age"))?;
    let gender = parts.next().map(parse_gender).transpose()?;
    if parts.next().is_some() {
        return Err(format!("'{text}' has too many fields (expected NAME:AGE[:GENDER])"));
    }
    Ok(PersonDescriptor::new(name, age, gender))
}

impl BookCommand {
    fn build_request(&self) -> Result<BookingRequest, CliError> {
        if let Some(ref path) = self.request {
            let mut text = String::new();
            if path.as_os_str() == "-" {
                std::io::stdin().read_to_string(&mut text)?;
            } else {
                text = std::fs::read_to_string(path)?;
            }
            return Ok(BookingRequest::from_json(&text)?);
        }

        let room_type = self
            .room_type
            .map(|c| c.as_str().to_string())
            .unwrap_or_default();
        let slot = self.slot.clone().unwrap_or_default();

        match (&self.name, &self.team) {
            (Some(name), None) => Ok(BookingRequest::individual(
                room_type,
                slot,
                PersonDescriptor {
                    name: name.clone(),
                    age: self.age,
                    gender: self.gender,
                },
            )),
            (None, Some(team)) => Ok(BookingRequest::team(
                room_type,
                slot,
                GroupDescriptor {
                    name: team.clone(),
                    members: self.member.clone(),
                },
            )),
            _ => Err(CliError::InvalidArguments(
                "give either --name or --team".to_string(),
            )),
        }
    }

    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.build_request()?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let receipt = create_booking(
            &mut db,
            &config,
            global.capability(),
            &request,
            BookingOptions::default().with_dry_run(self.dry_run),
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            return Ok(());
        }

        match receipt.reservation_id {
            Some(id) => {
                // shell-friendly: id and label on stdout, details on stderr
                println!("{id}\t{}", receipt.resource_label);
                if !global.quiet {
                    eprintln!(
                        "Booked {} for {} at {}",
                        receipt.resource_label, receipt.requester, receipt.slot
                    );
                }
            }
            None => {
                println!("{}", receipt.resource_label);
                if !global.quiet {
                    eprintln!(
                        "Dry run - would book {} for {} at {}",
                        receipt.resource_label, receipt.requester, receipt.slot
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_member() {
        let member = parse_member("ana:34:F").unwrap();
        assert_eq!(member.name, "ana");
        assert_eq!(member.age, Some(34));
        assert_eq!(member.gender, Some(Gender::Female));

        let member = parse_member("bo:9").unwrap();
        assert_eq!(member.gender, None);

        assert!(parse_member("cy").is_err());
        assert!(parse_member("cy:old").is_err());
        assert!(parse_member("cy:30:X").is_err());
        assert!(parse_member("cy:30:F:extra").is_err());
    }

    #[test]
    fn test_negative_member_age_reaches_library() {
        let member = parse_member("dee:-1").unwrap();
        assert_eq!(member.age, Some(-1));
    }
}
