//! Line-oriented front end for a tagging session.
//!
//! Plays the part of the view layer: each input line is turned into a
//! [`Command`], applied to the [`Session`], and the panels named by the
//! resulting [`ModelChange`] notifications are printed again.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

use crate::color_utils::Rgb;
use crate::constants::VIEWPORT_SIZE;
use crate::state::{DatasetIndex, LabelRegistry, ModelChange, Session};
use crate::viewer;

/// Text shown by the `help` command.
pub const HELP: &str = "\
Commands:
  base [dir]           set (or clear) the base folder for relative paths
  images <dir>         select the image folder and list its images
  list                 list images of the current folder
  show <name>          select an image and load it
  add [name]           add a label (empty name gives Label_NNN)
  remove [row]         remove the label at row
  rename <row> <name>  rename the label at row
  labels               print the label table
  help                 show this help
  quit                 leave";

/// Errors from parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// First word is not a known command
    #[error("Unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("'{command}' needs {what}")]
    MissingArgument {
        /// The command
        command: &'static str,
        /// What is missing
        what: &'static str,
    },

    /// Row argument is not a number
    #[error("Invalid row '{0}'")]
    InvalidRow(String),
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the base folder, `None` clears it
    Base(Option<PathBuf>),
    /// Select the image folder
    Images(PathBuf),
    /// Print the image list
    List,
    /// Select and load an image
    Show(String),
    /// Add a label with the given (possibly empty) name
    Add(String),
    /// Remove the label at the row, `None` when no row is selected
    Remove(Option<usize>),
    /// Rename a label
    Rename(usize, String),
    /// Print the label table
    Labels,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => Command::Nothing,
            "base" if rest.is_empty() => Command::Base(None),
            "base" => Command::Base(Some(PathBuf::from(rest))),
            "images" if rest.is_empty() => {
                return Err(ShellError::MissingArgument {
                    command: "images",
                    what: "a folder",
                });
            }
            "images" => Command::Images(PathBuf::from(rest)),
            "list" | "ls" => Command::List,
            "show" if rest.is_empty() => {
                return Err(ShellError::MissingArgument {
                    command: "show",
                    what: "an image name",
                });
            }
            "show" => Command::Show(rest.to_string()),
            "add" => Command::Add(rest.to_string()),
            "remove" | "rm" if rest.is_empty() => Command::Remove(None),
            "remove" | "rm" => Command::Remove(Some(parse_row(rest)?)),
            "rename" => {
                let (row, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if row.is_empty() {
                    return Err(ShellError::MissingArgument {
                        command: "rename",
                        what: "a row and a name",
                    });
                }
                Command::Rename(parse_row(row)?, name.trim().to_string())
            }
            "labels" => Command::Labels,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_row(text: &str) -> Result<usize, ShellError> {
    text.parse::<usize>()
        .map_err(|_| ShellError::InvalidRow(text.to_string()))
}

/// Interactive front end over a [`Session`].
pub struct Shell<W: Write> {
    session: Session,
    out: W,
    /// Changes announced by the session since the last redraw
    pending: Rc<RefCell<Vec<ModelChange>>>,
    /// Paint label swatches with ANSI true-color escapes
    color: bool,
}

impl<W: Write> Shell<W> {
    /// Create a shell writing to `out`.
    pub fn new(mut session: Session, out: W, color: bool) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        session.subscribe(move |change: &ModelChange| sink.borrow_mut().push(change.clone()));

        Self {
            session,
            out,
            pending,
            color,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Give back the session and the output.
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.out)
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(e) => writeln!(self.out, "error: {}", e)?,
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// Apply one command and redraw what changed.
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Nothing | Command::Quit => {}
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Base(folder) => {
                self.session
                    .select_base_folder(&folder.unwrap_or_default());
            }
            Command::Images(folder) => {
                if let Err(e) = self.session.select_image_folder(&folder) {
                    writeln!(self.out, "error: {}", e)?;
                }
            }
            Command::List => render_images(&mut self.out, self.session.dataset())?,
            Command::Show(name) => self.show(&name)?,
            Command::Add(name) => {
                self.session.add_label(&name);
            }
            Command::Remove(row) => {
                if let Err(e) = self.session.remove_label(row) {
                    writeln!(self.out, "error: {}", e)?;
                }
            }
            Command::Rename(row, name) => {
                if let Err(e) = self.session.rename_label(row, &name) {
                    writeln!(self.out, "error: {}", e)?;
                }
            }
            Command::Labels => render_labels(&mut self.out, self.session.labels(), self.color)?,
        }

        self.redraw()
    }

    fn show(&mut self, name: &str) -> io::Result<()> {
        let path = match self.session.select_image(name) {
            Ok(path) => path,
            Err(e) => {
                // Stale or unknown name: nothing to display
                return writeln!(self.out, "error: {}", e);
            }
        };

        match viewer::load_image(&path) {
            Ok(image) => {
                let (viewport_width, viewport_height) = VIEWPORT_SIZE;
                let scale =
                    viewer::fit_scale(image.width, image.height, viewport_width, viewport_height);
                writeln!(
                    self.out,
                    "{} ({}x{}, fit scale {:.2})",
                    path.display(),
                    image.width,
                    image.height,
                    scale
                )
            }
            Err(e) => {
                log::warn!("Cannot display {:?}: {}", path, e);
                writeln!(self.out, "{} (not displayable: {})", path.display(), e)
            }
        }
    }

    /// Print the panels affected by pending model changes.
    fn redraw(&mut self) -> io::Result<()> {
        let changes: Vec<ModelChange> = self.pending.borrow_mut().drain(..).collect();

        let images_changed = changes
            .iter()
            .any(|c| matches!(c, ModelChange::DatasetRebuilt { .. }));
        let labels_changed = changes.iter().any(|c| {
            matches!(
                c,
                ModelChange::LabelAdded { .. }
                    | ModelChange::LabelRemoved { .. }
                    | ModelChange::LabelRenamed { .. }
            )
        });

        if changes.contains(&ModelChange::BaseFolderChanged) {
            let base = self.session.base_folder();
            if base.as_os_str().is_empty() {
                writeln!(self.out, "base folder cleared, pick one before images")?;
            } else {
                writeln!(self.out, "base folder: {}", base.display())?;
            }
        }
        if images_changed {
            render_images(&mut self.out, self.session.dataset())?;
        }
        if labels_changed {
            render_labels(&mut self.out, self.session.labels(), self.color)?;
        }
        Ok(())
    }
}

/// Print the image list, one relative path per line.
pub fn render_images<W: Write>(out: &mut W, dataset: &DatasetIndex) -> io::Result<()> {
    if !dataset.folder().as_os_str().is_empty() {
        writeln!(out, "image folder: {}", dataset.folder().display())?;
    }
    if dataset.is_empty() {
        return writeln!(out, "(no images)");
    }
    for example in dataset.iter() {
        writeln!(
            out,
            "  {:<24} {}",
            example.file_name,
            example.relative_path().display()
        )?;
    }
    writeln!(out, "{} images", dataset.len())
}

/// Print the label table: index, name and color columns.
pub fn render_labels<W: Write>(out: &mut W, labels: &LabelRegistry, color: bool) -> io::Result<()> {
    writeln!(out, "Idx  {:<20} Color", "Name")?;
    for label in labels.iter() {
        let swatch = if color {
            paint(&label.color().to_string(), label.color(), label.text_color())
        } else {
            label.color().to_string()
        };
        writeln!(out, "{}  {:<20} {}", label.index_text(), label.name(), swatch)?;
    }
    Ok(())
}

fn paint(text: &str, background: Rgb, foreground: Rgb) -> String {
    format!(
        "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}\x1b[0m",
        background.r, background.g, background.b, foreground.r, foreground.g, foreground.b, text
    )
}
