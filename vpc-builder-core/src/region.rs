//! Region selection

use crate::console::{Prompter, Reporter, trimmed_text};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Regions offered in the interactive menu, with their display names
pub const REGIONS: &[(&str, &str)] = &[
    ("us-east-1", "N. Virginia"),
    ("us-east-2", "Ohio"),
    ("us-west-1", "N. California"),
    ("us-west-2", "Oregon"),
    ("eu-west-1", "Ireland"),
    ("eu-central-1", "Frankfurt"),
    ("ap-south-1", "Mumbai"),
    ("ap-northeast-1", "Tokyo"),
    ("ap-southeast-1", "Singapore"),
    ("ap-southeast-2", "Sydney"),
    ("sa-east-1", "São Paulo"),
];

const CUSTOM_REGION: &str = "Custom Region";

pub fn region_labels() -> Vec<String> {
    REGIONS
        .iter()
        .map(|(code, name)| format!("{} ({})", code, name))
        .chain(std::iter::once(CUSTOM_REGION.to_string()))
        .collect()
}

/// Ask which region to work in; falls back to `us-east-1`
pub fn select_region(prompter: &dyn Prompter, reporter: &dyn Reporter) -> String {
    let choice = prompter.select_one("Select AWS region:", &region_labels());

    let region = match choice {
        Some(index) if index < REGIONS.len() => Some(REGIONS[index].0.to_string()),
        Some(_) => {
            trimmed_text(prompter, "Enter custom AWS region code (e.g., eu-west-3):")
                .filter(|r| !r.is_empty())
        }
        None => None,
    };

    region.unwrap_or_else(|| {
        reporter.info(&format!("No region given, defaulting to {}", DEFAULT_REGION));
        DEFAULT_REGION.to_string()
    })
}
