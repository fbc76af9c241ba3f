//! Coloured terminal rendering of the wizard and the result view.

use colored::Colorize;
use persona_core::Step;
use persona_core::persona::{PersonaView, SectionBody};

/// Progress line such as `● Demografia  ○ Metas  ○ Consumo  ○ Decisão`.
pub fn progress(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|step| {
            if *step == current {
                format!("● {}", step.label()).bright_magenta().bold().to_string()
            } else if step.index() < current.index() {
                format!("● {}", step.label()).magenta().to_string()
            } else {
                format!("○ {}", step.label()).bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn step_header(step: Step) {
    println!();
    println!("{}", progress(step));
    println!(
        "{}",
        format!(
            "Etapa {} de {}: {}",
            step.index() + 1,
            Step::COUNT,
            step.title()
        )
        .bold()
    );
    println!("{}", step.description().bright_black());
}

pub fn error(message: &str) {
    println!("{}", message.red());
}

pub fn persona_view(view: &PersonaView) {
    let h = &view.header;
    println!();
    println!("{}", view.heading.bright_magenta().bold());
    println!();
    println!("{}", h.name.bold());
    println!("{}", h.job_title.cyan());
    println!(
        "{}",
        format!(
            "{} | {} | {} | {}",
            h.location, h.industry, h.education, h.age_range
        )
        .bright_black()
    );
    println!("{}", h.avatar_url.bright_black());
    println!();
    println!("{}", format!("“{}”", h.quote).italic());

    for section in &view.sections {
        println!();
        println!("{}", section.title.bright_magenta().bold());
        match &section.body {
            SectionBody::Paragraph(text) => println!("{text}"),
            SectionBody::Bullets(items) => {
                for item in items {
                    println!("  {} {}", "•".magenta(), item);
                }
            }
            SectionBody::Tags(items) => {
                let tags: Vec<String> = items
                    .iter()
                    .map(|item| format!("[{item}]").cyan().to_string())
                    .collect();
                println!("{}", tags.join(" "));
            }
        }
    }
    println!();
}
