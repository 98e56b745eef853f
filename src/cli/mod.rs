use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::domain::{DomainError, UserProfile};

#[derive(Subcommand)]
pub enum Commands {
    /// Send label text to the model and print the harmful ingredients it finds
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the prompt that would be sent, without calling the API
    Prompt {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the extracted label text comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Extracted label text; read from stdin when neither this nor --file is given
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the extracted label text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read_text(&self) -> Result<String, DomainError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return Ok(std::fs::read_to_string(path)?);
        }
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Who the analysis is for. No flags means a guest.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    /// JSON profile file: {"isGuest", "age", "gender", "allergies", "healthConcerns"}
    #[arg(long, conflicts_with_all = ["age", "gender", "allergies", "health_concerns"])]
    pub profile: Option<PathBuf>,

    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long)]
    pub allergies: Option<String>,

    #[arg(long)]
    pub health_concerns: Option<String>,
}

impl ProfileArgs {
    pub fn to_profile(&self) -> Result<UserProfile, DomainError> {
        if let Some(path) = &self.profile {
            let raw = std::fs::read_to_string(path)?;
            return serde_json::from_str(&raw).map_err(|e| {
                DomainError::invalid_input(format!("bad profile file {}: {e}", path.display()))
            });
        }

        if self.age.is_none()
            && self.gender.is_none()
            && self.allergies.is_none()
            && self.health_concerns.is_none()
        {
            return Ok(UserProfile::guest());
        }

        Ok(UserProfile::member(
            self.age.unwrap_or_default(),
            self.gender.clone().unwrap_or_default(),
            self.allergies.clone().unwrap_or_default(),
            self.health_concerns.clone().unwrap_or_default(),
        ))
    }
}
