//! Terminal rendering of the session view.

use colored::Colorize;
use nutrisync_application::{ActionOutcome, DashboardView, FormView, NoticeKind, SessionView};

pub fn print_view(view: &SessionView) {
    match view {
        SessionView::Form(form) => print_form(form),
        SessionView::Dashboard(dashboard) => print_dashboard(dashboard),
    }
}

fn print_form(view: &FormView) {
    let form = &view.form;
    println!("{}", "--- Plan form ---".bright_magenta().bold());
    println!("  age:    {}", display_or_blank(&form.age));
    println!("  weight: {}", display_or_blank(&form.weight));
    println!("  height: {}", display_or_blank(&form.height));
    println!("  {}: {}", form.profile, form.selection);
    if view.loading {
        println!("{}", "Generating your plan...".yellow());
    } else {
        println!("{}", "Fill in the fields with /set, then /submit.".bright_black());
    }
}

fn print_dashboard(view: &DashboardView) {
    println!("{}", "--- Dashboard ---".bright_magenta().bold());
    for tile in &view.tiles {
        println!("  {:<12} {}", format!("{}:", tile.label).bright_black(), tile.value.bold());
    }
    if let Some(recommendation) = &view.recommendation {
        println!();
        for line in recommendation.lines() {
            println!("{}", line.bright_blue());
        }
    }
    println!();
    println!("{}", view.insight.cyan());

    println!(
        "Hydration: {} ({:.0}%)",
        view.hydration.label.bold(),
        view.hydration.percent
    );

    if let (Some(first), Some(last)) = (view.prediction.first(), view.prediction.last()) {
        println!(
            "Predicted weight: day {} {} kg -> day {} {} kg",
            first.day, first.weight, last.day, last.weight
        );
    }

    if !view.progress.is_empty() {
        let history: Vec<String> = view
            .progress
            .iter()
            .map(|point| format!("d{}={}", point.day, point.weight))
            .collect();
        println!("Progress: {}", history.join(", "));
    }

    if let Some(analysis) = &view.food_analysis {
        println!("{}", "Food analysis:".bright_black());
        for line in analysis.lines() {
            println!("  {}", line);
        }
    }

    for entry in &view.chat {
        println!("{}", format!("you: {}", entry.user_text).green());
        println!("{}", format!("ai:  {}", entry.ai_reply).bright_blue());
    }

    if view.refreshing {
        println!("{}", "Refreshing plan...".yellow());
    }
}

/// Prints the result of an action. Returns `true` if the session changed.
pub fn print_outcome(outcome: &ActionOutcome, applied_message: &str) -> bool {
    match outcome {
        ActionOutcome::Applied => {
            if !applied_message.is_empty() {
                println!("{}", applied_message.bright_green());
            }
            true
        }
        ActionOutcome::Unchanged => {
            println!("{}", "Nothing to do.".bright_black());
            false
        }
        ActionOutcome::Superseded => {
            println!("{}", "Dropped an outdated response.".bright_black());
            false
        }
        ActionOutcome::Failed(notice) => {
            let label = match notice.kind {
                NoticeKind::Validation => "Invalid input",
                NoticeKind::Connectivity => "Offline",
                NoticeKind::Service => "Service error",
                NoticeKind::Storage => "Storage error",
                NoticeKind::Internal => "Error",
            };
            eprintln!("{}", format!("{}: {}", label, notice.message).red());
            false
        }
    }
}

fn display_or_blank(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
