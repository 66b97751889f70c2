//! Terminal implementations of the prompt and report boundaries

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use vpc_builder_core::console::{Prompter, Reporter};

/// `dialoguer` prompts; a terminal error (Esc, Ctrl-C, closed stdin) counts as cancel
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select_one(&self, prompt: &str, options: &[String]) -> Option<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_opt()
            .unwrap_or_else(|e| {
                log::debug!("select prompt aborted: {}", e);
                None
            })
    }

    fn select_many(&self, prompt: &str, options: &[String]) -> Vec<usize> {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .interact_opt()
            .unwrap_or_else(|e| {
                log::debug!("multi-select prompt aborted: {}", e);
                None
            })
            .unwrap_or_default()
    }

    fn text(&self, prompt: &str) -> Option<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| log::debug!("text prompt aborted: {}", e))
            .ok()
    }

    fn confirm(&self, prompt: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_opt()
            .unwrap_or_else(|e| {
                log::debug!("confirm prompt aborted: {}", e);
                None
            })
            .unwrap_or(false)
    }
}

/// Coloured status lines on stdout
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{} {}", "ℹ".cyan(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message.green());
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "!".yellow().bold(), message.yellow());
    }

    fn failure(&self, message: &str) {
        log::warn!("{}", message);
        println!("{} {}", "✗".red().bold(), message.red());
    }
}

/// Title shown once at startup
pub fn print_banner() {
    println!();
    println!("{}", "VPC Builder".cyan().bold());
    println!(
        "{}",
        "Create, inspect, modify and delete VPC resources".bright_black()
    );
    println!();
}
