use colored::Colorize;

/// UI utilities for user-facing terminal messages
pub struct UI;

impl UI {
    pub fn print_welcome() {
        println!(
            "{}",
            "Paperbind - Document Scanning Session".bright_cyan().bold()
        );
        println!("{}", "Type 'course <id>' to pick a course.".dimmed());
        println!(
            "{}",
            "Type 'new <name>' to start a document, then 'scan' once per page.".dimmed()
        );
        println!(
            "{}",
            "Type 'save' to bind the scanned pages into a PDF.".dimmed()
        );
        println!(
            "{}",
            "Type 'print' to inspect the session, 'exit' to quit.".dimmed()
        );
        println!();
    }

    pub fn print_goodbye() {
        println!("{}", "Goodbye!".bright_cyan());
    }

    pub fn print_error(message: &str) {
        eprintln!("{} {}", "Error:".bright_red().bold(), message);
    }
}
