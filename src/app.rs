//! Interactive menu loop.
//!
//! [`App`] owns everything the menu needs: the checker, the directory to scan
//! and the terminal streams. Commands are read one line at a time.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::checker::Checker;
use crate::ui::{self, Status};

/// A menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Run the PubPeer DOI check
    DoiCheck,
    /// Journal quality check (not available yet)
    JournalCheck,
    Quit,
}

impl MenuCommand {
    /// Parse one input line. Unknown input yields `None`.
    ///
    /// `й` is accepted for quit: it is the `q` key on a Russian layout.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuCommand::DoiCheck),
            "2" => Some(MenuCommand::JournalCheck),
            "q" | "Q" | "й" | "Й" => Some(MenuCommand::Quit),
            _ => None,
        }
    }
}

/// Application state for the interactive session
pub struct App<R, W> {
    checker: Checker,
    dir: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(checker: Checker, dir: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            checker,
            dir: dir.into(),
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", ui::menu_text())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match MenuCommand::parse(&line) {
                Some(MenuCommand::DoiCheck) => {
                    if self.confirm(&ui::doi_check_prompt(), "1")? {
                        self.run_doi_check().await?;
                    } else {
                        return Ok(());
                    }
                }
                Some(MenuCommand::JournalCheck) => {
                    if self.confirm(&ui::journal_check_prompt(), "2")? {
                        writeln!(
                            self.output,
                            "{}\n",
                            ui::status_line(
                                Status::Warning,
                                "Journal check is not available yet, back to the menu."
                            )
                        )?;
                    } else {
                        return Ok(());
                    }
                }
                Some(MenuCommand::Quit) => {
                    writeln!(self.output, "Bye")?;
                    return Ok(());
                }
                None => {}
            }
        }
    }

    /// Scan the working directory and check every input file found.
    async fn run_doi_check(&mut self) -> io::Result<()> {
        let files = self.checker.discover(&self.dir);
        writeln!(self.output, "{}", ui::file_list(&files))?;

        match self.checker.process_files(&files).await {
            Ok(summary) => writeln!(self.output, "{}\n", ui::run_summary(&summary))?,
            Err(e) => writeln!(self.output, "{}\n", ui::status_line(Status::Error, &e.to_string()))?,
        }
        Ok(())
    }

    /// Repeat `prompt` until `key` is entered. Returns false on end of input.
    fn confirm(&mut self, prompt: &str, key: &str) -> io::Result<bool> {
        loop {
            writeln!(self.output, "{}", prompt)?;
            self.output.flush()?;
            match self.read_line()? {
                Some(line) if line.trim() == key => return Ok(true),
                Some(_) => continue,
                None => return Ok(false),
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Consume the app, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn run_app(dir: &std::path::Path, mock: Arc<MockSource>, script: &str) -> String {
        let checker = Checker::new(mock).with_delay(Duration::ZERO);
        let mut app = App::new(checker, dir, Cursor::new(script.to_string()), Vec::new());
        tokio_test::block_on(app.run()).unwrap();
        String::from_utf8(app.into_output()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(MenuCommand::parse("1\n"), Some(MenuCommand::DoiCheck));
        assert_eq!(MenuCommand::parse(" 2 "), Some(MenuCommand::JournalCheck));
        assert_eq!(MenuCommand::parse("Q"), Some(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("й"), Some(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("3"), None);
    }

    #[test]
    fn test_quit_immediately() {
        let dir = tempdir().unwrap();
        let output = run_app(dir.path(), Arc::new(MockSource::new()), "q\n");
        assert!(output.contains("DOI check on PubPeer"));
        assert!(output.contains("Bye"));
    }

    #[test]
    fn test_journal_check_is_a_stub() {
        let dir = tempdir().unwrap();
        let output = run_app(dir.path(), Arc::new(MockSource::new()), "2\nx\n2\nq\n");
        assert!(output.contains("not available yet"));
        assert!(output.contains("Bye"));
    }

    #[test]
    fn test_doi_check_from_menu() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("list.txt"), "10.1/a\n10.1/b.\n").unwrap();

        let mock = Arc::new(MockSource::new());
        mock.push_found("Paper", 4);

        let output = run_app(dir.path(), mock.clone(), "1\n1\nq\n");

        assert!(output.contains("Check complete!"));
        let report = std::fs::read_to_string(dir.path().join("list result.txt")).unwrap();
        assert_eq!(report, "10.1/a&да&4&Paper\n10.1/b&нет\n");
        assert_eq!(mock.queries(), vec!["10.1/a", "10.1/b."]);
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempdir().unwrap();
        let output = run_app(dir.path(), Arc::new(MockSource::new()), "1\n");
        assert!(!output.contains("Check complete!"));
    }
}
