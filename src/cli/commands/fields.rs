//! Fields command implementation
//!
//! Prints the form layout: sections, field wire names, required markers and
//! choice options.

use crate::domain::Section;
use clap::Args;

/// Arguments for the fields command
#[derive(Args, Debug)]
pub struct FieldsArgs {}

impl FieldsArgs {
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("{}", Self::render());
        Ok(0)
    }

    fn render() -> String {
        let mut out = String::new();
        for section in Section::ALL {
            out.push_str(section.title());
            out.push('\n');
            for field in section.fields() {
                let marker = if field.is_required() { "*" } else { " " };
                out.push_str(&format!("  {marker} {:<24} {}", field.as_str(), field.label()));
                if let Some(choices) = field.choices() {
                    out.push_str(&format!(" [{}]", choices.join(", ")));
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str("* required");
        out
    }
}
