//! Command-line arguments.

use clap::{ArgGroup, Parser};
use roster_core::AppConfig;
use roster_directory::OrganizationQuery;
use std::path::PathBuf;

/// Organization compared when none is named on the command line.
pub const DEFAULT_ORGANIZATION_ID: &str = "62060775";

/// Label used in the report subject and body.
pub const DEFAULT_GROUP_LABEL: &str = "Social Data Science Centre";

#[derive(Debug, Parser)]
#[command(name = "roster", version)]
#[command(
    about = "Gathers people from a website and a research organization, and mails the members missing from the website"
)]
#[command(group(
    ArgGroup::new("organization").args(["r_org_individual", "r_org_group", "r_org_id"])
))]
pub struct Cli {
    /// Find the research organization through the full name of one of its members
    #[arg(long = "r-org-individual", value_name = "NAME")]
    pub r_org_individual: Option<String>,

    /// Find the research organization by its name
    #[arg(long = "r-org-group", value_name = "NAME")]
    pub r_org_group: Option<String>,

    /// Research organization id [default: 62060775]
    #[arg(long = "r-org-id", value_name = "ID")]
    pub r_org_id: Option<String>,

    /// People page to compare against [default: from config]
    #[arg(long, value_name = "URL")]
    pub website: Option<String>,

    /// Address the report is sent to
    #[arg(long = "email-recipient", value_name = "ADDRESS")]
    pub email_recipient: String,

    /// Address the report is sent from [default: me@example.com]
    #[arg(long = "email-sender", value_name = "ADDRESS")]
    pub email_sender: Option<String>,

    /// Location of the sendmail binary [default: /usr/lib/sendmail]
    #[arg(long = "sendmail-loc", value_name = "FILE PATH")]
    pub sendmail_loc: Option<PathBuf>,

    /// Name of the group in the report
    #[arg(long = "group-label", value_name = "LABEL", default_value = DEFAULT_GROUP_LABEL)]
    pub group_label: String,

    /// Directory API key (also read from ROSTER_API_KEY)
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Configuration file [default: ~/.config/roster/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn organization_query(&self) -> OrganizationQuery {
        if let Some(name) = &self.r_org_individual {
            OrganizationQuery::ByPerson(name.clone())
        } else if let Some(name) = &self.r_org_group {
            OrganizationQuery::ByName(name.clone())
        } else {
            OrganizationQuery::ById(
                self.r_org_id
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ORGANIZATION_ID.to_string()),
            )
        }
    }

    /// Overlay flags given on the command line onto `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(website) = &self.website {
            config.scraper.website.clone_from(website);
        }
        if let Some(sender) = &self.email_sender {
            config.mail.sender.clone_from(sender);
        }
        if let Some(path) = &self.sendmail_loc {
            config.mail.sendmail_path.clone_from(path);
        }
        if let Some(key) = &self.api_key {
            config.directory.api_key = Some(key.clone());
        }
    }
}
