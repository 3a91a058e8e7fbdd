use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// The addressable UI regions the app draws into.
///
/// Calls arrive while the display lock is held, so implementations must
/// return promptly and never block on I/O.
pub trait RenderPort: Send + 'static {
    fn set_title(&mut self, title: &str);
    fn replace_entries(&mut self, entries: Vec<String>);
    fn append_nav_item(&mut self, item: String);
    fn set_menu_hidden(&mut self, hidden: bool);
}

/// Keeps everything it is given. Used for snapshots and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDisplay {
    pub title: String,
    pub entries: Vec<String>,
    pub nav_items: Vec<String>,
    pub menu_hidden: bool,
}

impl RenderPort for MemoryDisplay {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn replace_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    fn append_nav_item(&mut self, item: String) {
        self.nav_items.push(item);
    }

    fn set_menu_hidden(&mut self, hidden: bool) {
        self.menu_hidden = hidden;
    }
}

#[derive(Debug)]
enum Frame {
    Title(String),
    Entries(Vec<String>),
    Menu(Vec<String>),
}

/// Writes markup as wrapped plain text.
///
/// Port calls only queue frames; a dedicated writer thread does the
/// markup conversion and the blocking writes. Dropping the display ends
/// the thread, whose join handle hands the writer back.
#[derive(Debug)]
pub struct TerminalDisplay {
    frames: Sender<Frame>,
    nav_items: Vec<String>,
}

impl TerminalDisplay {
    pub fn spawn<W>(out: W, width: usize) -> std::io::Result<(Self, JoinHandle<W>)>
    where
        W: Write + Send + 'static,
    {
        let (frames, receiver) = mpsc::channel();
        let writer = thread::Builder::new()
            .name("terminal-display".to_string())
            .spawn(move || write_frames(out, width.max(20), receiver))?;
        Ok((
            Self {
                frames,
                nav_items: Vec::new(),
            },
            writer,
        ))
    }

    fn send(&self, frame: Frame) {
        if self.frames.send(frame).is_err() {
            tracing::warn!("terminal writer has stopped");
        }
    }
}

impl RenderPort for TerminalDisplay {
    fn set_title(&mut self, title: &str) {
        self.send(Frame::Title(title.to_string()));
    }

    fn replace_entries(&mut self, entries: Vec<String>) {
        self.send(Frame::Entries(entries));
    }

    fn append_nav_item(&mut self, item: String) {
        self.nav_items.push(item);
    }

    fn set_menu_hidden(&mut self, hidden: bool) {
        if !hidden {
            self.send(Frame::Menu(self.nav_items.clone()));
        }
    }
}

fn write_frames<W: Write>(mut out: W, width: usize, frames: Receiver<Frame>) -> W {
    for frame in frames {
        let text = match frame {
            Frame::Title(title) => {
                let rule = "=".repeat(title.chars().count());
                format!("\n{title}\n{rule}\n")
            }
            Frame::Entries(entries) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| format!("[{}] {}\n\n", index + 1, to_text(entry, width)))
                .collect(),
            Frame::Menu(items) => {
                let mut text = "Feeds:\n".to_string();
                for (id, item) in items.iter().enumerate() {
                    text.push_str(&format!("  {id}: {}\n", to_text(item, width)));
                }
                text
            }
        };
        if let Err(error) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(error = %error, "terminal write failed");
        }
    }
    out
}

fn to_text(markup: &str, width: usize) -> String {
    match html2text::config::plain().string_from_read(markup.as_bytes(), width) {
        Ok(text) => text.trim_end().to_string(),
        Err(error) => {
            tracing::warn!(error = %error, "cannot convert markup to text");
            markup.to_string()
        }
    }
}
