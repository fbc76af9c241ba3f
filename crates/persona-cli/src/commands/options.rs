use colored::Colorize;
use persona_core::form::CHANNELS_LABEL;
use persona_core::{ContentChannel, Step};

pub fn run() {
    for step in Step::ALL {
        println!(
            "{}",
            format!("{}. {} - {}", step.index() + 1, step.label(), step.description()).bold()
        );
        for field in step.fields() {
            let required = if field.is_required() { " *" } else { "" };
            println!("   {:<22} {}{}", field.key().cyan(), field.label(), required.red());
            if let Some(options) = field.options() {
                for option in options {
                    println!("   {:<22}   - {}", "", option.value.bright_black());
                }
            }
        }
        if step.has_channels() {
            println!("   {:<22} {}", "contentChannels".cyan(), CHANNELS_LABEL);
            for channel in ContentChannel::all() {
                println!("   {:<22}   - {}", "", channel.label().bright_black());
            }
        }
        println!();
    }
}
