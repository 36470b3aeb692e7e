//! Menu-driven editing loop.
//!
//! The controller reads answers from any `BufRead` and writes prompts to any
//! `Write`, so the whole loop can be driven from tests. End of input stops
//! the loop without saving.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pixedit_core::blend::validate_alpha;
use pixedit_core::{
    BorderMode, EditError, Image, Operation, Padding, Preview, Session, ThresholdMethod,
    UndoOutcome,
};
use tracing::{info, warn};

use crate::input::{parse_number, MenuChoice};

/// Where the editing loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingLoad,
    MainMenu,
    AwaitingParameters(MenuChoice),
    ShowingHistory,
    Terminated,
}

pub struct Controller<R, W> {
    input: R,
    output: W,
    session: Session,
    preview: Box<dyn Preview>,
    state: State,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(input: R, output: W, session: Session, preview: Box<dyn Preview>) -> Self {
        Self {
            input,
            output,
            session,
            preview,
            state: State::AwaitingLoad,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user saves and exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state != State::Terminated {
            self.state = match self.state {
                State::AwaitingLoad => self.await_load()?,
                State::MainMenu => self.main_menu()?,
                State::AwaitingParameters(choice) => self.edit(choice)?,
                State::ShowingHistory => self.show_history()?,
                State::Terminated => State::Terminated,
            };
        }
        Ok(())
    }

    /// Print `text` and read one line. `None` means input has ended.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses and passes `validate`.
    fn ask_number<T, F>(&mut self, question: &str, validate: F) -> io::Result<Option<T>>
    where
        T: std::str::FromStr + Copy,
        F: Fn(T) -> Result<T, EditError>,
    {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match parse_number::<T>(&answer).and_then(&validate) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{}. Please try again.", err)?,
            }
        }
    }

    fn await_load(&mut self) -> io::Result<State> {
        let Some(path) = self.prompt("Enter path to image: ")? else {
            return Ok(State::Terminated);
        };
        match self.session.load(&path) {
            Ok(_) => {
                writeln!(self.output, "\nImage loaded successfully.\n")?;
                Ok(State::MainMenu)
            }
            Err(err) => {
                info!(%path, error = %err, "Load failed");
                writeln!(self.output, "Invalid path. Please try again.")?;
                Ok(State::AwaitingLoad)
            }
        }
    }

    fn main_menu(&mut self) -> io::Result<State> {
        writeln!(self.output, "\n==== Mini Photo Editor ====")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }

        let Some(answer) = self.prompt("Select an option (1-9): ")? else {
            return Ok(State::Terminated);
        };
        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(self.output, "Invalid option.")?;
                return Ok(State::MainMenu);
            }
        };

        match choice {
            MenuChoice::Undo => self.undo(),
            MenuChoice::ViewHistory => Ok(State::ShowingHistory),
            MenuChoice::SaveAndExit => self.save_and_exit(),
            other => Ok(State::AwaitingParameters(other)),
        }
    }

    /// Collect the parameters for `choice` and build the operation.
    /// `None` means input ended while asking.
    fn collect(&mut self, choice: MenuChoice) -> io::Result<Option<Operation>> {
        let op = match choice {
            MenuChoice::Brightness => self
                .ask_number("Brightness value (e.g., 50 or -50): ", Ok)?
                .map(Operation::Brightness),
            MenuChoice::Contrast => self
                .ask_number("Contrast factor (e.g., 1.5): ", |v: f32| {
                    if v.is_finite() && v > 0.0 {
                        Ok(v)
                    } else {
                        Err(EditError::InvalidParameter(
                            "contrast factor must be positive".to_string(),
                        ))
                    }
                })?
                .map(Operation::Contrast),
            MenuChoice::Grayscale => Some(Operation::Grayscale),
            MenuChoice::Padding => self.collect_padding()?,
            MenuChoice::Threshold => loop {
                let Some(answer) = self.prompt("Threshold method (binary/inverse): ")? else {
                    break None;
                };
                match answer.parse::<ThresholdMethod>() {
                    Ok(method) => break Some(Operation::Threshold(method)),
                    Err(err) => writeln!(self.output, "{}. Please try again.", err)?,
                }
            },
            MenuChoice::Blend => {
                let Some(path) = self.prompt("Path to second image: ")? else {
                    return Ok(None);
                };
                self.ask_number("Alpha value (0 to 1): ", validate_alpha)?
                    .map(|alpha| Operation::Blend {
                        path: PathBuf::from(path),
                        alpha,
                    })
            }
            MenuChoice::Undo | MenuChoice::ViewHistory | MenuChoice::SaveAndExit => None,
        };
        Ok(op)
    }

    fn collect_padding(&mut self) -> io::Result<Option<Operation>> {
        writeln!(self.output, "Padding types: constant, reflect, replicate")?;

        let mut sides = [0u32; 4];
        for (side, question) in sides.iter_mut().zip([
            "Top padding: ",
            "Bottom padding: ",
            "Left padding: ",
            "Right padding: ",
        ]) {
            match self.ask_number(question, Ok)? {
                Some(value) => *side = value,
                None => return Ok(None),
            }
        }

        let Some(name) = self.prompt("Border type: ")? else {
            return Ok(None);
        };
        if name.parse::<BorderMode>().is_err() {
            writeln!(self.output, "Unknown border type {:?}, using constant.", name)?;
        }
        let [top, bottom, left, right] = sides;
        Ok(Some(Operation::Pad {
            padding: Padding::new(top, bottom, left, right),
            mode: BorderMode::from_name(&name),
        }))
    }

    fn edit(&mut self, choice: MenuChoice) -> io::Result<State> {
        let Some(op) = self.collect(choice)? else {
            return Ok(State::Terminated);
        };

        let before = match self.session.current() {
            Ok(image) => image.clone(),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(State::AwaitingLoad);
            }
        };

        match self.session.apply(&op) {
            Ok(after) => {
                let after = after.clone();
                self.show_preview(&before, &after, &op.to_string())?;
            }
            Err(err) => {
                warn!(op = op.name(), error = %err, "Operation failed");
                writeln!(self.output, "Error: {}", err)?;
            }
        }
        Ok(State::MainMenu)
    }

    fn undo(&mut self) -> io::Result<State> {
        let before = match self.session.current() {
            Ok(image) => image.clone(),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(State::AwaitingLoad);
            }
        };

        match self.session.undo() {
            Ok(UndoOutcome::Reverted) => {}
            Ok(UndoOutcome::NothingToUndo) => writeln!(self.output, "Nothing to undo.")?,
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(State::MainMenu);
            }
        }
        if let Ok(after) = self.session.current() {
            let after = after.clone();
            self.show_preview(&before, &after, "undo")?;
        }
        Ok(State::MainMenu)
    }

    fn show_history(&mut self) -> io::Result<State> {
        writeln!(self.output, "\n--- Operation History ---")?;
        for entry in self.session.log() {
            writeln!(self.output, "- {}", entry)?;
        }

        loop {
            match self.prompt("\nPress 0 to return to the main menu: ")? {
                None => return Ok(State::Terminated),
                Some(answer) if answer == "0" => return Ok(State::MainMenu),
                Some(_) => writeln!(self.output, "Invalid input. Press 0 to return.")?,
            }
        }
    }

    fn save_and_exit(&mut self) -> io::Result<State> {
        let Some(filename) = self.prompt("Enter filename to save (e.g., result.jpg): ")? else {
            return Ok(State::Terminated);
        };

        match self.session.save(&filename) {
            Ok(()) => {
                writeln!(self.output, "Image saved as {}", filename)?;
                Ok(State::Terminated)
            }
            Err(err) => {
                warn!(%filename, error = %err, "Save failed");
                writeln!(self.output, "Could not save image: {}", err)?;
                Ok(State::MainMenu)
            }
        }
    }

    fn show_preview(&mut self, before: &Image, after: &Image, title: &str) -> io::Result<()> {
        match self.preview.show(before, after, title) {
            Ok(Some(path)) => writeln!(self.output, "Preview ({}): {}", title, path.display()),
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Preview failed");
                writeln!(self.output, "Preview unavailable: {}", err)
            }
        }
    }
}
