use crate::commands::{Command, CommandResult, COMMANDS};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::prompt::ReplPrompt;
use crate::session::Session;
use crate::tools::SystemRunner;
use crate::ui::UI;
use crossterm::event::{KeyCode, KeyModifiers};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultCompleter, Emacs, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal,
};

/// Lines that end the session, matched exactly and case-sensitively.
pub const EXIT_KEYWORDS: &[&str] = &["quit", "exit", ":q", ":Q", ":wq", ":Wq", ":WQ", ".exit"];

pub struct Repl {
    session: Session,
    editor: Reedline,
    prompt: ReplPrompt,
    pending: Option<String>,
}

impl Repl {
    pub fn new(config: ScanConfig) -> Self {
        let session = Session::new(config, Box::new(SystemRunner::from_env()));

        let mut completions: Vec<String> = COMMANDS.iter().map(|c| c.to_string()).collect();
        completions.extend(EXIT_KEYWORDS.iter().map(|k| k.to_string()));

        let mut completer = DefaultCompleter::with_inclusions(&[':', '.', '_']);
        completer = completer.set_min_word_len(1);
        completer.insert(completions);
        let completer = Box::new(completer);

        let completion_menu = ColumnarMenu::default().with_name("completion_menu");
        let completion_menu = ReedlineMenu::EngineCompleter(Box::new(completion_menu));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".into()),
                ReedlineEvent::MenuNext,
            ]),
        );
        keybindings.add_binding(
            KeyModifiers::SHIFT,
            KeyCode::BackTab,
            ReedlineEvent::MenuPrevious,
        );

        let edit_mode = Box::new(Emacs::new(keybindings));

        let editor = Reedline::create()
            .use_bracketed_paste(true)
            .with_completer(completer)
            .with_edit_mode(edit_mode)
            .with_menu(completion_menu);

        Self {
            session,
            editor,
            prompt: ReplPrompt::new(),
            pending: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        UI::print_welcome();

        loop {
            match self.editor.read_line(&self.prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim().to_string();

                    // Exit keywords win over everything, pending sub-prompt
                    // included.
                    if EXIT_KEYWORDS.contains(&line.as_str()) {
                        UI::print_goodbye();
                        break;
                    }

                    if let Some(key) = self.pending.take() {
                        self.prompt.set_pending(None);
                        self.handle_pending_reply(&key, &line);
                        continue;
                    }

                    self.dispatch(&line);
                }
                Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => {
                    println!("\nExiting...");
                    UI::print_goodbye();
                    break;
                }
                Err(err) => {
                    UI::print_error(&err.to_string());
                    break;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, line: &str) {
        if line.contains(">>>") {
            self.session.assign_line(line);
            return;
        }

        match Command::parse(line).execute(&mut self.session) {
            Ok(CommandResult::Continue) => {}
            Ok(CommandResult::Prompt(key)) => {
                self.prompt.set_pending(Some(key.clone()));
                self.pending = Some(key);
            }
            Err(e) => UI::print_error(&e.to_string()),
        }
    }

    /// The line answering a `course`/`new` sub-prompt. A full
    /// `key >>> value` line is honored as written; anything else becomes
    /// the value for the pending key.
    fn handle_pending_reply(&mut self, key: &str, line: &str) {
        if line.contains(">>>") {
            self.session.assign_line(line);
        } else {
            self.session.assign(key, line);
        }
    }
}
