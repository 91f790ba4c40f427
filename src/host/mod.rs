pub mod web;

/// The environment that displays markup and surfaces notices.
pub trait Host {
    /// Replace everything on screen with `markup`.
    fn mount(&mut self, markup: String);

    /// Dismiss the boot-time loading indicator.
    fn hide_loading(&mut self);

    /// Show a transient message without changing the view.
    fn notify(&mut self, message: &str);
}

/// Host that keeps everything in memory. Used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub markup: String,
    pub mounts: usize,
    pub loading_hidden: bool,
    pub notices: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for MemoryHost {
    fn mount(&mut self, markup: String) {
        self.markup = markup;
        self.mounts += 1;
    }

    fn hide_loading(&mut self) {
        self.loading_hidden = true;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
