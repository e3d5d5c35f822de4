use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{self, StepKey};
use crate::context::UserContext;
use crate::errors::{self, MemoError};
use crate::session::Session;

pub fn banner() {
    println!("\n{}", "Policy Memo Architect".bold());
    println!("{}", "An Algorithm for Clarity, Concision, and Compelling Argument".italic());
    println!(
        "A 9-phase drafting workflow; grounded steps pull current data via Google Search.\n\
         Workflow based on \"Public Policy Writing That Matters\" by David Chrisinger.\n"
    );
}

pub fn show_workflow(session: &Session) {
    let mut index = 0usize;
    println!(
        "\n{} ({}/{} steps complete)",
        "=== WORKFLOW ===".bold(),
        session.completed_count(),
        catalog::step_count()
    );
    for phase in catalog::phases() {
        println!("\n{} {}", phase.name.bold(), format!("[{}]", phase.id).dimmed());
        println!("  {}", phase.desc.dimmed());
        for step in phase.steps {
            let marker = if session.has(step.key) { "✓".green().bold() } else { "·".normal() };
            let badge = if step.use_search { "  [WEB]".cyan().bold().to_string() } else { String::new() };
            let here = if index == session.cursor() { "  ← current".yellow().to_string() } else { String::new() };
            println!("  {} {:2}. {} ({}){}{}", marker, index + 1, step.name, step.key, badge, here);
            index += 1;
        }
    }
    println!();
}

pub fn show_step(session: &Session, key: StepKey) {
    let spec = catalog::spec_of(key);
    let phase = catalog::phase_of(key);
    println!("\n{} — {}", phase.name.bold(), spec.name.bold());
    println!("{}", phase.explanation.dimmed());
    if spec.use_search {
        println!("{}", "[WEB SEARCH ENABLED]".cyan().bold());
    }
    match session.result(key) {
        Some(text) => {
            println!("{}", "---".dimmed());
            println!("{text}");
            println!("{}", "---".dimmed());
        }
        None => println!("{}", "(not generated yet)".dimmed()),
    }
}

/// Asks for the memo parameters, offering the worked example as defaults.
pub fn collect_inputs() -> UserContext {
    let sample = UserContext::sample();
    println!("{}", "Define the memo parameters (enter accepts the default):".bold());
    UserContext {
        topic: prompt_field("Topic", &sample.topic),
        policymaker_type: prompt_field("Policymaker", &sample.policymaker_type),
        audience: prompt_field("Audience", &sample.audience),
        purpose: prompt_field("Purpose", &sample.purpose),
        writer_role: prompt_field("Writer role", &sample.writer_role),
        institutional_context: prompt_field("Institution", &sample.institutional_context),
    }
}

fn prompt_field(label: &str, default: &str) -> String {
    print!("{} [{}]: ", label.bold(), default.dimmed());
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_err() {
        return default.to_string();
    }
    let trimmed = s.trim();
    if trimmed.is_empty() { default.to_string() } else { trimmed.to_string() }
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

pub fn read_command() -> Option<String> {
    print!("{} ", "memo>".bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(0) => None,
        Ok(_) => Some(s.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads replacement text for a step, terminated by a single "." line.
pub fn read_multiline() -> String {
    println!("{}", "Enter the replacement text; finish with a single '.' line:".dimmed());
    let mut lines = Vec::new();
    loop {
        let mut s = String::new();
        match io::stdin().read_line(&mut s) {
            Ok(0) => break,
            Ok(_) => {
                if s.trim_end() == "." {
                    break;
                }
                lines.push(s.trim_end().to_string());
            }
            Err(_) => break,
        }
    }
    lines.join("\n")
}

pub fn print_failure(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());
}

pub fn print_error(err: &MemoError) {
    eprintln!("{} {}", "error:".red().bold(), err);
    if let Some(hint) = errors::hint(err) {
        eprintln!("{} {}", "hint:".yellow().bold(), hint);
    }
}

pub fn warn_missing(key: StepKey, missing: &[StepKey]) {
    let list: Vec<&str> = missing.iter().map(|k| k.key()).collect();
    println!(
        "{} {} references steps with no result yet ({}); their slots will be blank.",
        "warning:".yellow().bold(),
        key,
        list.join(", ")
    );
}

pub fn spinner(key: StepKey, grounded: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    let suffix = if grounded { " (searching the web)" } else { "" };
    pb.set_message(format!("Generating {key}...{suffix}"));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn print_generated(key: StepKey) {
    println!("{} {}", "generated:".green().bold(), key);
}

pub fn print_exported(path: &Path) {
    println!("{} {}", "exported:".green().bold(), path.display());
}

pub fn help() {
    println!(
        "\n{}\n\
         \x20 list               show all phases and steps\n\
         \x20 show [step]        print a step's stored text (default: current)\n\
         \x20 gen [step]         generate a step (default: current)\n\
         \x20 regen [step]       clear a step's result and generate it again\n\
         \x20 edit [step]        replace a step's text by hand\n\
         \x20 next               move to the next step\n\
         \x20 jump <step|n>      move to a step by key or number\n\
         \x20 reset              clear all results and return to the start\n\
         \x20 export [path]      write the memo + verification checklist\n\
         \x20 help               this text\n\
         \x20 quit               leave the wizard\n",
        "Commands".bold()
    );
}
