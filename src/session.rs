use crate::commands::CommandResult;
use crate::config::ScanConfig;
use crate::document::DocumentPaths;
use crate::error::{PaperbindError, Result};
use crate::tools::{pdf, scanner, ToolRunner};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;

pub const COURSE_KEY: &str = "course";
pub const NAME_KEY: &str = "name";
pub const NUM_SCANS_KEY: &str = "numscans";
pub const UNSAVED_KEY: &str = "unsaved";

/// Untyped key/value session state, driven by `key >>> value` lines.
///
/// Keys are not validated on write; a mistyped key lands in the map like
/// any other. The typed accessors parse on read.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SessionState {
    values: BTreeMap<String, String>,
}

impl Default for SessionState {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        values.insert(COURSE_KEY.to_string(), String::new());
        values.insert(NUM_SCANS_KEY.to_string(), "0".to_string());
        values.insert(UNSAVED_KEY.to_string(), "false".to_string());
        Self { values }
    }
}

impl SessionState {
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn course(&self) -> &str {
        self.get(COURSE_KEY)
    }

    pub fn name(&self) -> &str {
        self.get(NAME_KEY)
    }

    pub fn num_scans(&self) -> u32 {
        self.get(NUM_SCANS_KEY).parse().unwrap_or(0)
    }

    pub fn set_num_scans(&mut self, count: u32) {
        self.set(NUM_SCANS_KEY, &count.to_string());
    }

    pub fn unsaved(&self) -> bool {
        self.get(UNSAVED_KEY) == "true"
    }

    pub fn set_unsaved(&mut self, unsaved: bool) {
        self.set(UNSAVED_KEY, if unsaved { "true" } else { "false" });
    }

    /// Pretty-printed dump for the `print` command.
    pub fn dump(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One interactive scanning session: the state record, the fixed imaging
/// parameters, and the runner used to reach the external tools.
pub struct Session {
    pub state: SessionState,
    config: ScanConfig,
    runner: Box<dyn ToolRunner>,
}

impl Session {
    pub fn new(config: ScanConfig, runner: Box<dyn ToolRunner>) -> Self {
        Self {
            state: SessionState::default(),
            config,
            runner,
        }
    }

    /// `key >>> value`: split on the first `>>>`, trim both sides, write raw.
    pub fn assign_line(&mut self, line: &str) {
        if let Some((key, value)) = line.split_once(">>>") {
            self.assign(key, value);
        }
    }

    pub fn assign(&mut self, key: &str, value: &str) {
        self.state.set(key.trim(), value.trim());
    }

    pub fn handle_print(&self) -> Result<()> {
        println!("{}", self.state.dump()?);
        Ok(())
    }

    pub fn handle_course(&mut self, arg: Option<&str>) -> Result<CommandResult> {
        self.ensure_saved()?;
        match arg {
            Some(course) => {
                self.state.set(COURSE_KEY, course);
                Ok(CommandResult::Continue)
            }
            None => Ok(CommandResult::Prompt(COURSE_KEY.to_string())),
        }
    }

    pub fn handle_new(&mut self, arg: Option<&str>) -> Result<CommandResult> {
        self.ensure_saved()?;
        // A fresh document starts counting from zero in both branches.
        self.state.set_num_scans(0);
        match arg {
            Some(name) => {
                self.state.set(NAME_KEY, name);
                Ok(CommandResult::Continue)
            }
            None => Ok(CommandResult::Prompt(NAME_KEY.to_string())),
        }
    }

    pub fn handle_scan(&mut self) -> Result<()> {
        if self.state.course().is_empty() {
            return Err(PaperbindError::Command("no course set".to_string()));
        }
        if self.state.name().is_empty() {
            // Same message as the missing-course case, kept verbatim.
            return Err(PaperbindError::Command("no course set".to_string()));
        }

        let document = self.document();
        if document.pdf_path().exists() {
            return Err(PaperbindError::Command(format!(
                "{} already exists",
                document.pdf_path().display()
            )));
        }

        fs::create_dir_all(document.pages_dir())?;

        let page = document.page_path(self.state.num_scans());
        let invocation = scanner::scan_page(
            &self.config.device,
            self.config.resolution,
            &self.config.scan_area,
            &page,
        );
        // Tolerant invocation: the page counts as captured even when the
        // driver exits nonzero.
        self.runner.run(&invocation)?;

        self.state.set_num_scans(self.state.num_scans() + 1);
        self.state.set_unsaved(true);
        Ok(())
    }

    pub fn handle_save(&mut self) -> Result<()> {
        let count = self.state.num_scans();
        if count == 0 {
            return Err(PaperbindError::Command("nothing scanned yet".to_string()));
        }

        let document = self.document();
        let invocation = pdf::assemble_pdf(
            &document.page_paths(count),
            &self.config.paper_size,
            document.pdf_path(),
        );
        self.runner.run(&invocation)?;

        fs::remove_dir_all(document.pages_dir())?;
        self.state.set_unsaved(false);
        Ok(())
    }

    fn ensure_saved(&self) -> Result<()> {
        if self.state.unsaved() {
            return Err(PaperbindError::Command(
                "unsaved scans, run save first".to_string(),
            ));
        }
        Ok(())
    }

    fn document(&self) -> DocumentPaths {
        DocumentPaths::new(&self.config.out_root, self.state.course(), self.state.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolInvocation;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct RecordingRunner {
        calls: Rc<RefCell<Vec<ToolInvocation>>>,
        fail_strict: bool,
    }

    impl RecordingRunner {
        fn failing() -> Self {
            Self {
                calls: Rc::default(),
                fail_strict: true,
            }
        }

        fn calls(&self) -> Vec<ToolInvocation> {
            self.calls.borrow().clone()
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, invocation: &ToolInvocation) -> Result<()> {
            self.calls.borrow_mut().push(invocation.clone());
            if self.fail_strict && !invocation.tolerate_nonzero {
                return Err(PaperbindError::ToolExecution(format!(
                    "{} exited with status 1",
                    invocation.program
                )));
            }
            Ok(())
        }
    }

    fn session_in(root: &TempDir, runner: RecordingRunner) -> Session {
        let config = ScanConfig {
            out_root: root.path().join("out"),
            ..ScanConfig::default()
        };
        Session::new(config, Box::new(runner))
    }

    #[test]
    fn test_state_defaults() {
        let state = SessionState::default();
        assert_eq!(state.course(), "");
        assert_eq!(state.name(), "");
        assert_eq!(state.num_scans(), 0);
        assert!(!state.unsaved());
    }

    #[test]
    fn test_num_scans_tolerates_garbage() {
        let mut state = SessionState::default();
        state.set(NUM_SCANS_KEY, "many");
        assert_eq!(state.num_scans(), 0);
    }

    #[test]
    fn test_dump_lists_seeded_keys() {
        let dump = SessionState::default().dump().unwrap();
        assert!(dump.contains("\"course\": \"\""));
        assert!(dump.contains("\"numscans\": \"0\""));
        assert!(dump.contains("\"unsaved\": \"false\""));
    }

    #[test]
    fn test_course_then_new_reflected_in_state() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, RecordingRunner::default());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();

        assert_eq!(session.state.course(), "CS101");
        assert_eq!(session.state.name(), "hw1");
        assert_eq!(session.state.num_scans(), 0);
        assert!(!session.state.unsaved());
    }

    #[test]
    fn test_scan_without_course_or_name() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let mut session = session_in(&dir, runner.clone());

        let err = session.handle_scan().unwrap_err();
        assert_eq!(err.to_string(), "no course set");

        // The missing-name case reports the same text.
        session.handle_course(Some("CS101")).unwrap();
        let err = session.handle_scan().unwrap_err();
        assert_eq!(err.to_string(), "no course set");

        assert!(runner.calls().is_empty());
        assert_eq!(session.state.num_scans(), 0);
        assert!(!session.state.unsaved());
    }

    #[test]
    fn test_scan_and_save_full_flow() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let mut session = session_in(&dir, runner.clone());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();
        session.handle_scan().unwrap();
        session.handle_scan().unwrap();

        let pages_dir = dir.path().join("out/CS101/hw1");
        let page0 = pages_dir.join("0.png").display().to_string();
        let page1 = pages_dir.join("1.png").display().to_string();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "scanimage");
        assert!(calls[0].tolerate_nonzero);
        assert!(calls[0].args.contains(&page0));
        assert!(calls[1].args.contains(&page1));
        assert_eq!(session.state.num_scans(), 2);
        assert!(session.state.unsaved());
        assert!(pages_dir.is_dir());

        session.handle_save().unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].program, "img2pdf");
        assert_eq!(
            calls[2].args,
            vec![
                page0,
                page1,
                "-S".to_string(),
                "Letter".to_string(),
                "-o".to_string(),
                dir.path().join("out/CS101/hw1.pdf").display().to_string(),
            ]
        );
        assert!(!pages_dir.exists());
        assert!(!session.state.unsaved());
        assert_eq!(session.state.num_scans(), 2);
    }

    #[test]
    fn test_scan_refuses_existing_pdf() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let mut session = session_in(&dir, runner.clone());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();

        let course_dir = dir.path().join("out/CS101");
        fs::create_dir_all(&course_dir).unwrap();
        fs::write(course_dir.join("hw1.pdf"), b"%PDF").unwrap();

        let err = session.handle_scan().unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(runner.calls().is_empty());
        assert_eq!(session.state.num_scans(), 0);
    }

    #[test]
    fn test_unsaved_guard_blocks_switch() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, RecordingRunner::default());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();
        session.handle_scan().unwrap();

        let err = session.handle_new(Some("hw2")).unwrap_err();
        assert_eq!(err.to_string(), "unsaved scans, run save first");
        assert_eq!(session.state.name(), "hw1");
        assert_eq!(session.state.num_scans(), 1);

        let err = session.handle_course(Some("CS102")).unwrap_err();
        assert_eq!(err.to_string(), "unsaved scans, run save first");
        assert_eq!(session.state.course(), "CS101");

        session.handle_save().unwrap();

        session.handle_new(Some("hw2")).unwrap();
        assert_eq!(session.state.name(), "hw2");
        assert_eq!(session.state.num_scans(), 0);
    }

    #[test]
    fn test_save_with_zero_scans() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let mut session = session_in(&dir, runner.clone());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();

        let err = session.handle_save().unwrap_err();
        assert_eq!(err.to_string(), "nothing scanned yet");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_unsaved() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::failing();
        let mut session = session_in(&dir, runner.clone());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();
        // The scan invocation is tolerant, so it still goes through.
        session.handle_scan().unwrap();

        assert!(session.handle_save().is_err());
        assert!(session.state.unsaved());
        assert_eq!(session.state.num_scans(), 1);
        assert!(dir.path().join("out/CS101/hw1").is_dir());
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_assignment_writes_raw_keys() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, RecordingRunner::default());

        session.assign_line("name >>> hw2");
        assert_eq!(session.state.name(), "hw2");

        // No key validation: a typo lands in the map without complaint.
        session.assign_line("cuorse >>> CS101");
        assert_eq!(session.state.get("cuorse"), "CS101");
        assert_eq!(session.state.course(), "");
    }

    #[test]
    fn test_new_prompt_branch_resets_count() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir, RecordingRunner::default());

        session.handle_course(Some("CS101")).unwrap();
        session.handle_new(Some("hw1")).unwrap();
        session.handle_scan().unwrap();
        session.handle_save().unwrap();
        assert_eq!(session.state.num_scans(), 1);

        let result = session.handle_new(None).unwrap();
        assert_eq!(result, CommandResult::Prompt(NAME_KEY.to_string()));
        assert_eq!(session.state.num_scans(), 0);

        session.assign(NAME_KEY, "hw2");
        assert_eq!(session.state.name(), "hw2");
    }
}
